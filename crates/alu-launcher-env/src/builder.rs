//! The individual bootstrap steps.

use std::path::Path;

use alu_launcher_core::deps::DependencySet;
use alu_launcher_core::layout::LauncherLayout;

use crate::activation::ActivatedEnv;
use crate::error::{BootstrapError, FailureReason, Result};
use crate::runner::{Invocation, ToolRunner, ToolStatus};

/// Outcome of [`ensure_environment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvState {
    Created,
    Reused,
}

/// Extra installer options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Passed to pip as `--index-url`
    pub index_url: Option<String>,
}

/// True when the environment's activation script exists.
pub fn environment_exists(layout: &LauncherLayout) -> bool {
    layout.marker().is_file()
}

/// Create the environment with `<base_python> -m venv <env_dir>` unless the
/// marker is already present.
///
/// The env directory is created before the tool runs, so it exists after the
/// first launch even when a later step fails.
pub fn ensure_environment<R>(
    runner: &mut R,
    layout: &LauncherLayout,
    base_python: &Path,
) -> Result<EnvState>
where
    R: ToolRunner + ?Sized,
{
    let env_dir = layout.env_dir();
    if environment_exists(layout) {
        tracing::debug!(env_dir = %env_dir.display(), "Environment present, skipping creation");
        return Ok(EnvState::Reused);
    }

    tracing::info!(
        env_dir = %env_dir.display(),
        python = %base_python.display(),
        "Creating Python environment"
    );
    let fail = |reason| BootstrapError::EnvironmentCreationFailed {
        env_dir: env_dir.clone(),
        reason,
    };

    std::fs::create_dir_all(&env_dir).map_err(|e| fail(FailureReason::Filesystem(e)))?;

    let invocation = Invocation::new(base_python)
        .args(["-m", "venv"])
        .arg(&env_dir)
        .current_dir(layout.launcher_dir());
    let status = runner
        .run(&invocation)
        .map_err(|e| fail(FailureReason::Spawn(e)))?;
    if !status.success() {
        return Err(fail(FailureReason::ExitStatus(status.code)));
    }

    Ok(EnvState::Created)
}

/// Install or upgrade `deps` with a single quiet pip call. An empty set
/// skips the call.
pub fn install_dependencies<R>(
    runner: &mut R,
    env: &ActivatedEnv,
    deps: &DependencySet,
    options: &InstallOptions,
) -> Result<()>
where
    R: ToolRunner + ?Sized,
{
    if deps.is_empty() {
        tracing::debug!("Empty dependency set, skipping install");
        return Ok(());
    }

    let mut invocation = env.installer().args(["install", "--quiet", "--upgrade"]);
    if let Some(ref url) = options.index_url {
        invocation = invocation.arg("--index-url").arg(url);
    }
    let invocation = invocation.args(deps.iter());

    tracing::info!(packages = %deps.as_slice().join(" "), "Installing dependencies");
    let fail = |reason| BootstrapError::DependencyInstallFailed {
        packages: deps.as_slice().to_vec(),
        reason,
    };
    let status = runner
        .run(&invocation)
        .map_err(|e| fail(FailureReason::Spawn(e)))?;
    if !status.success() {
        return Err(fail(FailureReason::ExitStatus(status.code)));
    }
    Ok(())
}

/// Run `<python> main.py` from the launcher directory and wait for it.
/// The application's status is returned for logging only.
pub fn launch_application<R>(
    runner: &mut R,
    env: &ActivatedEnv,
    layout: &LauncherLayout,
) -> Result<ToolStatus>
where
    R: ToolRunner + ?Sized,
{
    let entry_point = layout.entry_point();
    let invocation = env.apply(
        Invocation::new(env.python())
            .arg(&entry_point)
            .current_dir(layout.launcher_dir()),
    );

    tracing::info!(entry_point = %entry_point.display(), "Launching application");
    let status = runner
        .run(&invocation)
        .map_err(|source| BootstrapError::LaunchFailed {
            entry_point: entry_point.clone(),
            source,
        })?;
    tracing::info!(code = ?status.code, "Application exited");
    Ok(status)
}
