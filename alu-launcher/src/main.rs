//! ALU Telemetry launcher.
//!
//! ```text
//! main() -> resolve launcher dir -> load .env -> init tracing
//!        -> Bootstrap::run(SystemRunner)   ensure venv, activate, pip install, main.py
//!        -> exit 0 | diagnostic + pause + exit 1
//! ```

mod cli;
mod observability;
mod presentation;

use std::path::PathBuf;
use std::process::ExitCode;

use alu_launcher_core::config::{self, LauncherConfig, ObservabilityConfig};
use alu_launcher_core::deps::DependencySet;
use alu_launcher_core::layout::LauncherLayout;
use alu_launcher_env::{Bootstrap, BootstrapError, BootstrapReport, EnvState, SystemRunner};
use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use observability::AuditLog;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let layout = match resolve_layout(&cli, &LauncherConfig::from_env()) {
        Ok(layout) => layout,
        Err(err) => {
            presentation::report_failure(&err, presentation::should_pause(cli.no_pause));
            return ExitCode::FAILURE;
        }
    };
    config::load_dotenv_from_dir(layout.launcher_dir());

    let obs = ObservabilityConfig::from_env();
    observability::init_tracing(&obs);
    let audit = AuditLog::new(&obs);
    let cfg = LauncherConfig::from_env();

    match run(&cli, &cfg, layout, &audit) {
        Ok(report) => {
            audit.bootstrap_completed(
                report.env_state == EnvState::Created,
                report.app_status.code,
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            let (kind, code) = match err.downcast_ref::<BootstrapError>() {
                Some(e) => (e.kind(), e.exit_code()),
                None => ("launcher_error", 1),
            };
            tracing::error!(kind, "Bootstrap failed");
            audit.bootstrap_failed(kind, &format!("{:#}", err));
            presentation::report_failure(&err, presentation::should_pause(cli.no_pause || cfg.no_pause));
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

/// `--launcher-dir`, then ALU_LAUNCHER_HOME, then the executable's directory.
fn resolve_layout(cli: &Cli, cfg: &LauncherConfig) -> Result<LauncherLayout> {
    if let Some(dir) = cli.launcher_dir.clone().or_else(|| cfg.launcher_dir.clone()) {
        return Ok(LauncherLayout::new(dir));
    }
    LauncherLayout::from_current_exe().context("Resolve launcher directory")
}

fn run(cli: &Cli, cfg: &LauncherConfig, layout: LauncherLayout, audit: &AuditLog) -> Result<BootstrapReport> {
    let dependencies = match cfg.packages.as_deref() {
        Some(list) => DependencySet::parse_list(list)
            .with_context(|| format!("Invalid {} value", config::env_keys::launcher::ALU_LAUNCHER_PACKAGES))?,
        None => DependencySet::default(),
    };
    let base_python: PathBuf = match cli.python.clone() {
        Some(python) => python,
        None => cfg.base_python(),
    };
    let index_url = cli.index_url.clone().or_else(|| cfg.index_url.clone());

    tracing::info!(
        launcher_dir = %layout.launcher_dir().display(),
        packages = %dependencies.as_slice().join(" "),
        "Starting launcher"
    );
    audit.bootstrap_started(layout.launcher_dir(), dependencies.as_slice());

    let boot = Bootstrap::new(layout, base_python, dependencies).with_index_url(index_url);
    let report = boot.run(&mut SystemRunner)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("alu-launcher").chain(args.iter().copied()))
            .expect("parse")
    }

    fn config_with_home(home: &str) -> LauncherConfig {
        LauncherConfig {
            launcher_dir: Some(PathBuf::from(home)),
            ..Default::default()
        }
    }

    #[test]
    fn test_cli_dir_beats_env_home() {
        let cli = parse(&["--launcher-dir", "/from/cli"]);
        let layout = resolve_layout(&cli, &config_with_home("/from/env")).expect("layout");
        assert_eq!(layout.launcher_dir(), Path::new("/from/cli"));
    }

    #[test]
    fn test_env_home_used_without_cli_dir() {
        let cli = parse(&[]);
        let layout = resolve_layout(&cli, &config_with_home("/from/env")).expect("layout");
        assert_eq!(layout.launcher_dir(), Path::new("/from/env"));
    }

    #[test]
    fn test_falls_back_to_executable_dir() {
        let cli = parse(&[]);
        let layout = resolve_layout(&cli, &LauncherConfig::default()).expect("layout");
        let exe = std::env::current_exe().expect("current exe");
        assert_eq!(Some(layout.launcher_dir()), exe.parent());
    }
}
