//! Process execution for orchestration tool invocations.

use std::process::{Command, Stdio};

use crate::command::CommandSpec;
use crate::error::StackError;

/// Outcome of a finished tool process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// Whether the process exited with status zero
    pub success: bool,
    /// Exit code; `None` when terminated by a signal
    pub code: Option<i32>,
    /// Everything the process wrote to stderr
    pub diagnostics: String,
}

impl RunOutput {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            code: Some(0),
            diagnostics: String::new(),
        }
    }

    pub fn failed(code: i32, diagnostics: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            diagnostics: diagnostics.into(),
        }
    }
}

/// Runs a command to completion, blocking the caller.
pub trait CommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<RunOutput, StackError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, spec: &CommandSpec) -> Result<RunOutput, StackError> {
        (**self).run(spec)
    }
}

/// Spawns real processes. Stdout is discarded and stderr captured.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, spec: &CommandSpec) -> Result<RunOutput, StackError> {
        let output = Command::new(&spec.program)
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| StackError::Launch {
                program: spec.program.clone(),
                source,
            })?;

        Ok(RunOutput {
            success: output.status.success(),
            code: output.status.code(),
            diagnostics: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
