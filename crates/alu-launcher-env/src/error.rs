use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BootstrapError>;

/// Why an external tool step failed.
#[derive(Debug, Error)]
pub enum FailureReason {
    #[error("exited with {}", exit_label(.0))]
    ExitStatus(Option<i32>),

    #[error("could not be started: {0}")]
    Spawn(io::Error),

    #[error("filesystem error: {0}")]
    Filesystem(io::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Fatal bootstrap failures. None of them is retried.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(
        "Failed to create the Python environment at {}: venv {reason}. \
         Make sure Python 3 is installed and available on PATH",
        .env_dir.display()
    )]
    EnvironmentCreationFailed {
        env_dir: PathBuf,
        reason: FailureReason,
    },

    #[error("Failed to install dependencies ({}): pip {reason}", .packages.join(", "))]
    DependencyInstallFailed {
        packages: Vec<String>,
        reason: FailureReason,
    },

    #[error("Failed to launch {}", .entry_point.display())]
    LaunchFailed {
        entry_point: PathBuf,
        source: io::Error,
    },
}

impl BootstrapError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Short machine-readable label used in logs and the audit trail.
    pub fn kind(&self) -> &'static str {
        match self {
            BootstrapError::EnvironmentCreationFailed { .. } => "environment_creation_failed",
            BootstrapError::DependencyInstallFailed { .. } => "dependency_install_failed",
            BootstrapError::LaunchFailed { .. } => "launch_failed",
        }
    }
}
