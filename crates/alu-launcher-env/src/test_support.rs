//! Recording runner for unit tests.

use std::collections::HashMap;
use std::io;

use alu_launcher_core::layout::LauncherLayout;

use crate::runner::{Invocation, ToolRunner, ToolStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    CreateEnv,
    Install,
    Launch,
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Exit(i32),
    Missing,
}

/// Records every invocation and answers with a scripted outcome per step.
/// A successful `CreateEnv` writes the activation marker the way venv would.
pub struct FakeRunner {
    layout: LauncherLayout,
    outcomes: HashMap<Step, Outcome>,
    pub calls: Vec<Invocation>,
}

impl FakeRunner {
    pub fn new(layout: &LauncherLayout) -> Self {
        Self {
            layout: layout.clone(),
            outcomes: HashMap::new(),
            calls: Vec::new(),
        }
    }

    pub fn fail(mut self, step: Step, code: i32) -> Self {
        self.outcomes.insert(step, Outcome::Exit(code));
        self
    }

    pub fn missing(mut self, step: Step) -> Self {
        self.outcomes.insert(step, Outcome::Missing);
        self
    }

    pub fn steps(&self) -> Vec<Step> {
        self.calls.iter().map(classify).collect()
    }

    pub fn count(&self, step: Step) -> usize {
        self.steps().into_iter().filter(|s| *s == step).count()
    }

    /// Package names of every install call, in call order.
    pub fn installed_packages(&self) -> Vec<Vec<String>> {
        self.calls
            .iter()
            .filter(|inv| classify(inv) == Step::Install)
            .map(|inv| {
                inv.args
                    .iter()
                    .map(|a| a.to_string_lossy().into_owned())
                    .skip_while(|a| a != "--upgrade")
                    .skip(1)
                    .collect()
            })
            .collect()
    }
}

fn classify(inv: &Invocation) -> Step {
    if inv.args.get(1).is_some_and(|a| a == "venv") {
        Step::CreateEnv
    } else if inv.args.iter().any(|a| a == "install") {
        Step::Install
    } else {
        Step::Launch
    }
}

pub fn write_marker(layout: &LauncherLayout) {
    std::fs::create_dir_all(layout.scripts_dir()).expect("scripts dir");
    std::fs::write(layout.marker(), b"# activate\n").expect("marker");
}

impl ToolRunner for FakeRunner {
    fn run(&mut self, invocation: &Invocation) -> io::Result<ToolStatus> {
        self.calls.push(invocation.clone());
        let step = classify(invocation);
        match self.outcomes.get(&step).copied().unwrap_or(Outcome::Exit(0)) {
            Outcome::Missing => Err(io::Error::new(io::ErrorKind::NotFound, "program not found")),
            Outcome::Exit(code) => {
                if code == 0 && step == Step::CreateEnv {
                    write_marker(&self.layout);
                }
                Ok(ToolStatus::from_code(code))
            }
        }
    }
}
