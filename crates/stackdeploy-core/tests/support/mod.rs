#![allow(dead_code)]

use std::cell::RefCell;

use stackdeploy_core::command::CommandSpec;
use stackdeploy_core::error::StackError;
use stackdeploy_core::runner::{CommandRunner, RunOutput};

/// Records every invocation and replies with a canned output.
pub struct RecordingRunner {
    reply: RunOutput,
    calls: RefCell<Vec<CommandSpec>>,
}

impl RecordingRunner {
    pub fn replying(reply: RunOutput) -> Self {
        Self {
            reply,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn ok() -> Self {
        Self::replying(RunOutput::succeeded())
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    pub fn only_call(&self) -> CommandSpec {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one invocation");
        calls.into_iter().next().unwrap()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, spec: &CommandSpec) -> Result<RunOutput, StackError> {
        self.calls.borrow_mut().push(spec.clone());
        Ok(self.reply.clone())
    }
}

/// Fails every invocation as if the program could not be started.
pub struct UnlaunchableRunner;

impl CommandRunner for UnlaunchableRunner {
    fn run(&self, spec: &CommandSpec) -> Result<RunOutput, StackError> {
        Err(StackError::Launch {
            program: spec.program.clone(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        })
    }
}
