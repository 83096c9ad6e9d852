//! Environment variable keys.
//!
//! Primary keys use the `ALU_LAUNCHER_*` prefix; aliases are read as fallbacks.

/// Launcher paths and bootstrap inputs
pub mod launcher {
    /// Overrides the directory that holds `venv/` and `main.py`
    pub const ALU_LAUNCHER_HOME: &str = "ALU_LAUNCHER_HOME";

    /// Base interpreter used to create the environment
    pub const ALU_LAUNCHER_PYTHON: &str = "ALU_LAUNCHER_PYTHON";

    /// Comma-separated package names replacing the default dependency set
    pub const ALU_LAUNCHER_PACKAGES: &str = "ALU_LAUNCHER_PACKAGES";

    pub const ALU_LAUNCHER_NO_PAUSE: &str = "ALU_LAUNCHER_NO_PAUSE";

    /// Package index handed to pip
    pub const PIP_INDEX_URL: &str = "PIP_INDEX_URL";
    pub const INDEX_URL_ALIASES: &[&str] = &["PYPI_MIRROR_URL"];
}

/// Logging and audit
pub mod observability {
    pub const ALU_LAUNCHER_QUIET: &str = "ALU_LAUNCHER_QUIET";
    pub const ALU_LAUNCHER_LOG_LEVEL: &str = "ALU_LAUNCHER_LOG_LEVEL";
    pub const ALU_LAUNCHER_LOG_JSON: &str = "ALU_LAUNCHER_LOG_JSON";
    pub const ALU_LAUNCHER_AUDIT_LOG: &str = "ALU_LAUNCHER_AUDIT_LOG";
}
