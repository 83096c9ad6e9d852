//! Typed configuration structs, loaded from environment variables.

use super::env_keys::{launcher as launcher_keys, observability as obv_keys};
use super::loader::{lookup_bool, lookup_optional, lookup_or};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Interpreter names probed in each `PATH` directory when no base
/// interpreter is configured. `python3.exe` on Windows is often the Store
/// alias stub, so it comes last there.
#[cfg(windows)]
pub const PYTHON_CANDIDATES: &[&str] = &["python", "py", "python3"];
#[cfg(not(windows))]
pub const PYTHON_CANDIDATES: &[&str] = &["python", "python3"];

/// Bootstrap inputs. Every field is optional; unset fields fall back to the
/// launcher's built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LauncherConfig {
    pub launcher_dir: Option<PathBuf>,
    pub python: Option<PathBuf>,
    /// Raw comma-separated override of the dependency set
    pub packages: Option<String>,
    pub no_pause: bool,
    pub index_url: Option<String>,
}

impl LauncherConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<L>(lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        Self {
            launcher_dir: lookup_optional(&lookup, launcher_keys::ALU_LAUNCHER_HOME, &[])
                .map(PathBuf::from),
            python: lookup_optional(&lookup, launcher_keys::ALU_LAUNCHER_PYTHON, &[])
                .map(PathBuf::from),
            packages: lookup_optional(&lookup, launcher_keys::ALU_LAUNCHER_PACKAGES, &[]),
            no_pause: lookup_bool(&lookup, launcher_keys::ALU_LAUNCHER_NO_PAUSE, &[], false),
            index_url: lookup_optional(
                &lookup,
                launcher_keys::PIP_INDEX_URL,
                launcher_keys::INDEX_URL_ALIASES,
            ),
        }
    }

    /// Base interpreter used to create the environment: the configured one,
    /// else the first [`PYTHON_CANDIDATES`] hit walking `PATH` in order, else
    /// plain `python` so that environment creation reports the missing install.
    pub fn base_python(&self) -> PathBuf {
        if let Some(ref python) = self.python {
            return python.clone();
        }
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        match find_python_in(std::env::var_os("PATH").as_deref(), &cwd) {
            Some(path) => {
                tracing::debug!(python = %path.display(), "Found base interpreter");
                path
            }
            None => {
                tracing::warn!("No Python interpreter found on PATH");
                PathBuf::from("python")
            }
        }
    }
}

/// First interpreter found in `path_var`. Directories are searched in order
/// and each is tried with every candidate before moving on, so an earlier
/// `python` beats a later `python3`.
pub fn find_python_in(path_var: Option<&OsStr>, cwd: &Path) -> Option<PathBuf> {
    let path_var = path_var?;
    std::env::split_paths(path_var).find_map(|dir| {
        PYTHON_CANDIDATES
            .iter()
            .find_map(|name| which::which_in(name, Some(&dir), cwd).ok())
    })
}

/// Observability settings: quiet, log_level, log_json, audit_log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
    pub audit_log: Option<String>,
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<L>(lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        Self {
            quiet: lookup_bool(&lookup, obv_keys::ALU_LAUNCHER_QUIET, &[], false),
            log_level: lookup_or(&lookup, obv_keys::ALU_LAUNCHER_LOG_LEVEL, &[], || {
                "alu_launcher=info".to_string()
            }),
            log_json: lookup_bool(&lookup, obv_keys::ALU_LAUNCHER_LOG_JSON, &[], false),
            audit_log: lookup_optional(&lookup, obv_keys::ALU_LAUNCHER_AUDIT_LOG, &[]),
        }
    }
}
