//! Environment activation.
//!
//! Sourcing an activate script only changes the shell that sources it. Here
//! activation is the equivalent overlay applied to every child process
//! started after it: `VIRTUAL_ENV` set, the scripts dir first on `PATH`,
//! `PYTHONHOME` removed.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use alu_launcher_core::layout::LauncherLayout;

use crate::runner::Invocation;

/// An activated environment: where its tools live and how to run them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivatedEnv {
    env_dir: PathBuf,
    scripts_dir: PathBuf,
    python: PathBuf,
    pip: PathBuf,
}

/// Activate the environment under `layout`.
///
/// Nothing is checked: an empty or broken environment still activates, and
/// the problem shows up when pip or the application is started.
pub fn activate(layout: &LauncherLayout) -> ActivatedEnv {
    let env = ActivatedEnv {
        env_dir: layout.env_dir(),
        scripts_dir: layout.scripts_dir(),
        python: layout.env_python(),
        pip: layout.env_pip(),
    };
    tracing::debug!(env_dir = %env.env_dir.display(), "Activated environment");
    env
}

impl ActivatedEnv {
    pub fn env_dir(&self) -> &Path {
        &self.env_dir
    }

    /// The isolated interpreter.
    pub fn python(&self) -> &Path {
        &self.python
    }

    /// Installer invocation: the env's own `pip` when present, otherwise
    /// `python -m pip` through the isolated interpreter.
    pub fn installer(&self) -> Invocation {
        let inv = if self.pip.is_file() {
            Invocation::new(&self.pip)
        } else {
            Invocation::new(&self.python).args(["-m", "pip"])
        };
        self.apply(inv)
    }

    /// Apply the activation overlay to `invocation`.
    pub fn apply(&self, invocation: Invocation) -> Invocation {
        invocation
            .env("VIRTUAL_ENV", &self.env_dir)
            .env("PATH", self.search_path(env::var_os("PATH")))
            .env_remove("PYTHONHOME")
    }

    /// `current` with the scripts dir prepended.
    fn search_path(&self, current: Option<OsString>) -> OsString {
        let mut dirs = vec![self.scripts_dir.clone()];
        if let Some(ref current) = current {
            dirs.extend(env::split_paths(current).filter(|d| *d != self.scripts_dir));
        }
        match env::join_paths(&dirs) {
            Ok(joined) => joined,
            Err(e) => {
                tracing::warn!(error = %e, "PATH entry not joinable, using scripts dir only");
                self.scripts_dir.clone().into_os_string()
            }
        }
    }
}
