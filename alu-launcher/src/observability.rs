//! Observability: tracing init and the bootstrap audit log.
//!
//! Uses `ObservabilityConfig` for ALU_LAUNCHER_QUIET, LOG_LEVEL, LOG_JSON, AUDIT_LOG.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use alu_launcher_core::config::ObservabilityConfig;
use chrono::Utc;
use serde_json::json;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Initialize tracing on stderr. Call once, after `.env` has been loaded.
/// `RUST_LOG` takes precedence over ALU_LAUNCHER_LOG_LEVEL.
pub fn init_tracing(cfg: &ObservabilityConfig) {
    let level = if cfg.quiet {
        "alu_launcher=warn".to_string()
    } else {
        cfg.log_level.clone()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init()
    };
}

/// Appends bootstrap events to ALU_LAUNCHER_AUDIT_LOG as JSON lines.
/// Disabled when the variable is unset; write errors are ignored.
pub struct AuditLog {
    path: Option<String>,
}

impl AuditLog {
    pub fn new(cfg: &ObservabilityConfig) -> Self {
        let path = cfg.audit_log.clone();
        if let Some(parent) = path.as_deref().and_then(|p| Path::new(p).parent()) {
            let _ = std::fs::create_dir_all(parent);
        }
        Self { path }
    }

    pub fn bootstrap_started(&self, launcher_dir: &Path, packages: &[String]) {
        self.append(json!({
            "ts": now(),
            "event": "bootstrap_started",
            "launcher_dir": launcher_dir.display().to_string(),
            "packages": packages,
        }));
    }

    pub fn bootstrap_completed(&self, env_created: bool, app_exit_code: Option<i32>) {
        self.append(json!({
            "ts": now(),
            "event": "bootstrap_completed",
            "env_created": env_created,
            "app_exit_code": app_exit_code,
        }));
    }

    pub fn bootstrap_failed(&self, kind: &str, message: &str) {
        self.append(json!({
            "ts": now(),
            "event": "bootstrap_failed",
            "kind": kind,
            "message": message,
        }));
    }

    fn append(&self, record: serde_json::Value) {
        let Some(ref path) = self.path else {
            return;
        };
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(path) {
            if let Ok(line) = serde_json::to_string(&record) {
                let _ = writeln!(f, "{}", line);
            }
        }
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
