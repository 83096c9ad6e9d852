//! First-run bootstrap: create the isolated environment, install the
//! dependency set, hand off to the application.
//!
//! Every step is a plain function over a [`runner::ToolRunner`], so the whole
//! sequence can be driven without spawning real processes. Nothing here
//! prompts the user or exits the process; callers decide how to present a
//! [`error::BootstrapError`].

pub mod activation;
pub mod bootstrap;
pub mod builder;
pub mod error;
pub mod runner;

#[cfg(test)]
mod test_support;

pub use activation::{activate, ActivatedEnv};
pub use bootstrap::{Bootstrap, BootstrapReport};
pub use builder::{
    ensure_environment, environment_exists, install_dependencies, launch_application, EnvState,
    InstallOptions,
};
pub use error::{BootstrapError, FailureReason, Result};
pub use runner::{Invocation, SystemRunner, ToolRunner, ToolStatus};
