//! The four-step bootstrap sequence.

use std::path::PathBuf;

use alu_launcher_core::deps::DependencySet;
use alu_launcher_core::layout::LauncherLayout;

use crate::activation::activate;
use crate::builder::{
    ensure_environment, install_dependencies, launch_application, EnvState, InstallOptions,
};
use crate::error::Result;
use crate::runner::{ToolRunner, ToolStatus};

/// Inputs for one launch.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    pub layout: LauncherLayout,
    pub base_python: PathBuf,
    pub dependencies: DependencySet,
    pub install: InstallOptions,
}

/// What a completed bootstrap did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapReport {
    pub env_state: EnvState,
    pub app_status: ToolStatus,
}

impl Bootstrap {
    pub fn new(layout: LauncherLayout, base_python: impl Into<PathBuf>, dependencies: DependencySet) -> Self {
        Self {
            layout,
            base_python: base_python.into(),
            dependencies,
            install: InstallOptions::default(),
        }
    }

    pub fn with_index_url(mut self, index_url: Option<String>) -> Self {
        self.install.index_url = index_url;
        self
    }

    /// Ensure, activate, install, launch. The first failure stops the
    /// sequence and nothing is rolled back.
    pub fn run<R>(&self, runner: &mut R) -> Result<BootstrapReport>
    where
        R: ToolRunner + ?Sized,
    {
        let env_state = ensure_environment(runner, &self.layout, &self.base_python)?;
        let env = activate(&self.layout);
        install_dependencies(runner, &env, &self.dependencies, &self.install)?;
        let app_status = launch_application(runner, &env, &self.layout)?;
        Ok(BootstrapReport {
            env_state,
            app_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BootstrapError;
    use crate::runner::SystemRunner;
    use crate::test_support::{write_marker, FakeRunner, Step};
    use std::collections::BTreeSet;

    fn bootstrap(dir: &std::path::Path) -> Bootstrap {
        Bootstrap::new(LauncherLayout::new(dir), "python3", DependencySet::default())
    }

    #[test]
    fn test_fresh_dir_runs_all_steps_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let boot = bootstrap(dir.path());
        let mut runner = FakeRunner::new(&boot.layout);

        let report = boot.run(&mut runner).expect("bootstrap");
        assert_eq!(report.env_state, EnvState::Created);
        assert!(report.app_status.success());
        assert_eq!(runner.steps(), vec![Step::CreateEnv, Step::Install, Step::Launch]);
    }

    #[test]
    fn test_env_dir_exists_even_when_install_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let boot = bootstrap(dir.path());
        let mut runner = FakeRunner::new(&boot.layout).fail(Step::Install, 1);

        let _ = boot.run(&mut runner);
        assert!(boot.layout.env_dir().is_dir());
    }

    #[test]
    fn test_existing_env_is_not_recreated() {
        let dir = tempfile::tempdir().expect("tempdir");
        let boot = bootstrap(dir.path());
        write_marker(&boot.layout);
        let mut runner = FakeRunner::new(&boot.layout);

        let report = boot.run(&mut runner).expect("bootstrap");
        assert_eq!(report.env_state, EnvState::Reused);
        assert_eq!(runner.count(Step::CreateEnv), 0);
        assert_eq!(runner.steps(), vec![Step::Install, Step::Launch]);
    }

    #[test]
    fn test_creation_failure_stops_before_install() {
        let dir = tempfile::tempdir().expect("tempdir");
        let boot = bootstrap(dir.path());
        let mut runner = FakeRunner::new(&boot.layout).fail(Step::CreateEnv, 1);

        let err = boot.run(&mut runner).expect_err("should fail");
        assert!(matches!(err, BootstrapError::EnvironmentCreationFailed { .. }));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(runner.steps(), vec![Step::CreateEnv]);
    }

    #[test]
    fn test_install_failure_stops_before_launch() {
        let dir = tempfile::tempdir().expect("tempdir");
        let boot = bootstrap(dir.path());
        let mut runner = FakeRunner::new(&boot.layout).fail(Step::Install, 1);

        let err = boot.run(&mut runner).expect_err("should fail");
        assert!(matches!(err, BootstrapError::DependencyInstallFailed { .. }));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(runner.count(Step::Launch), 0);
    }

    #[test]
    fn test_partial_env_is_reused_on_next_run() {
        let dir = tempfile::tempdir().expect("tempdir");
        let boot = bootstrap(dir.path());

        let mut first = FakeRunner::new(&boot.layout).fail(Step::Install, 1);
        assert!(boot.run(&mut first).is_err());

        let mut second = FakeRunner::new(&boot.layout);
        let report = boot.run(&mut second).expect("retry succeeds");
        assert_eq!(report.env_state, EnvState::Reused);
        assert_eq!(second.steps(), vec![Step::Install, Step::Launch]);
    }

    #[test]
    fn test_exactly_one_launch_with_no_arguments() {
        let dir = tempfile::tempdir().expect("tempdir");
        let boot = bootstrap(dir.path());
        let mut runner = FakeRunner::new(&boot.layout);

        boot.run(&mut runner).expect("bootstrap");
        assert_eq!(runner.count(Step::Launch), 1);
        let launch = runner.calls.last().expect("launch call");
        assert_eq!(launch.args, vec![boot.layout.entry_point().into_os_string()]);
    }

    #[test]
    fn test_same_packages_on_every_run() {
        let dir = tempfile::tempdir().expect("tempdir");
        let boot = bootstrap(dir.path());
        let mut runner = FakeRunner::new(&boot.layout);

        boot.run(&mut runner).expect("first run");
        boot.run(&mut runner).expect("second run");

        let installs = runner.installed_packages();
        assert_eq!(installs.len(), 2);
        let first: BTreeSet<&String> = installs[0].iter().collect();
        let second: BTreeSet<&String> = installs[1].iter().collect();
        assert_eq!(first, second);
        assert_eq!(installs[0], boot.dependencies.as_slice());
        assert_eq!(runner.count(Step::CreateEnv), 1);
    }

    // Activation never checks the environment: a marker with no interpreter
    // behind it only fails once pip is started.
    #[test]
    fn test_broken_env_surfaces_at_install() {
        let dir = tempfile::tempdir().expect("tempdir");
        let boot = bootstrap(dir.path());
        write_marker(&boot.layout);

        let err = boot.run(&mut SystemRunner).expect_err("no interpreter in env");
        match err {
            BootstrapError::DependencyInstallFailed { reason, .. } => {
                assert!(matches!(reason, crate::error::FailureReason::Spawn(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
