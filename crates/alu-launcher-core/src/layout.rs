//! Filesystem layout around the launcher.
//!
//! ```text
//! <launcher-dir>/
//!   venv/                 isolated environment, owned by `python -m venv`
//!     bin/activate        marker (Unix)
//!     Scripts/activate.bat  marker (Windows)
//!   main.py               application entry point
//!   .env                  optional overrides
//! ```

use std::io;
use std::path::{Path, PathBuf};

pub const ENV_DIR_NAME: &str = "venv";
pub const ENTRY_POINT: &str = "main.py";

#[cfg(windows)]
pub const SCRIPTS_DIR: &str = "Scripts";
#[cfg(not(windows))]
pub const SCRIPTS_DIR: &str = "bin";

#[cfg(windows)]
pub const ACTIVATE_SCRIPT: &str = "activate.bat";
#[cfg(not(windows))]
pub const ACTIVATE_SCRIPT: &str = "activate";

#[cfg(windows)]
pub const PYTHON_EXE: &str = "python.exe";
#[cfg(not(windows))]
pub const PYTHON_EXE: &str = "python";

#[cfg(windows)]
pub const PIP_EXE: &str = "pip.exe";
#[cfg(not(windows))]
pub const PIP_EXE: &str = "pip";

/// Paths the bootstrap touches, all rooted at the launcher directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherLayout {
    launcher_dir: PathBuf,
}

impl LauncherLayout {
    pub fn new(launcher_dir: impl Into<PathBuf>) -> Self {
        Self {
            launcher_dir: launcher_dir.into(),
        }
    }

    /// Layout rooted at the directory holding the running executable.
    pub fn from_current_exe() -> io::Result<Self> {
        let exe = std::env::current_exe()?;
        let dir = exe
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "executable has no parent directory"))?;
        Ok(Self::new(dir))
    }

    pub fn launcher_dir(&self) -> &Path {
        &self.launcher_dir
    }

    pub fn env_dir(&self) -> PathBuf {
        self.launcher_dir.join(ENV_DIR_NAME)
    }

    pub fn scripts_dir(&self) -> PathBuf {
        self.env_dir().join(SCRIPTS_DIR)
    }

    /// The activation script; its presence means "environment already created".
    pub fn marker(&self) -> PathBuf {
        self.scripts_dir().join(ACTIVATE_SCRIPT)
    }

    pub fn env_python(&self) -> PathBuf {
        self.scripts_dir().join(PYTHON_EXE)
    }

    pub fn env_pip(&self) -> PathBuf {
        self.scripts_dir().join(PIP_EXE)
    }

    pub fn entry_point(&self) -> PathBuf {
        self.launcher_dir.join(ENTRY_POINT)
    }
}
