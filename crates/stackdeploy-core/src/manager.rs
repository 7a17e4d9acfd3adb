//! Stack deployment adapter.
//!
//! [`StackManager`] turns a stack and endpoint into one `docker stack`
//! invocation and maps the result. Every call spawns exactly one process and
//! blocks until it exits; there are no retries and no timeout.

use tracing::{debug, info, warn};

use crate::command::{self, CommandSpec};
use crate::error::StackError;
use crate::platform::Platform;
use crate::runner::{CommandRunner, ProcessRunner};
use crate::types::{EndpointDescriptor, StackDescriptor};

/// Default orchestration tool name.
pub const DEFAULT_TOOL: &str = "docker";

/// Deploys and removes stacks through the orchestration tool.
#[derive(Debug, Clone)]
pub struct StackManager<R = ProcessRunner> {
    platform: Platform,
    tool: String,
    runner: R,
}

impl StackManager<ProcessRunner> {
    /// Manager for the host platform spawning real `docker` processes.
    pub fn new() -> Self {
        Self::with_runner(Platform::host(), ProcessRunner::new())
    }
}

impl Default for StackManager<ProcessRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> StackManager<R> {
    pub fn with_runner(platform: Platform, runner: R) -> Self {
        Self {
            platform,
            tool: DEFAULT_TOOL.to_string(),
            runner,
        }
    }

    /// Override the tool name or path (the platform suffix is still applied).
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    /// Command line that [`deploy`](Self::deploy) would run.
    pub fn deploy_command(
        &self,
        stack: &StackDescriptor,
        endpoint: &EndpointDescriptor,
    ) -> CommandSpec {
        command::base_command(self.platform, &self.tool, endpoint).args(command::deploy_args(stack))
    }

    /// Command line that [`remove`](Self::remove) would run.
    pub fn remove_command(
        &self,
        stack: &StackDescriptor,
        endpoint: &EndpointDescriptor,
    ) -> CommandSpec {
        command::base_command(self.platform, &self.tool, endpoint).args(command::remove_args(stack))
    }

    /// Run `stack deploy` for `stack` against `endpoint`.
    pub fn deploy(
        &self,
        stack: &StackDescriptor,
        endpoint: &EndpointDescriptor,
    ) -> Result<(), StackError> {
        ensure_named(stack)?;
        let spec = self.deploy_command(stack, endpoint);
        self.execute(&spec)?;
        info!(stack = %stack.name, endpoint = %endpoint.url, "stack deployed");
        Ok(())
    }

    /// Run `stack rm` for `stack` against `endpoint`.
    pub fn remove(
        &self,
        stack: &StackDescriptor,
        endpoint: &EndpointDescriptor,
    ) -> Result<(), StackError> {
        ensure_named(stack)?;
        let spec = self.remove_command(stack, endpoint);
        self.execute(&spec)?;
        info!(stack = %stack.name, endpoint = %endpoint.url, "stack removed");
        Ok(())
    }

    fn execute(&self, spec: &CommandSpec) -> Result<(), StackError> {
        debug!(command = %spec, "running orchestration tool");
        let output = self.runner.run(spec)?;
        if output.success {
            return Ok(());
        }
        warn!(program = %spec.program, code = ?output.code, "orchestration tool failed");
        Err(StackError::Operation {
            detail: output.diagnostics,
            code: output.code,
        })
    }
}

fn ensure_named(stack: &StackDescriptor) -> Result<(), StackError> {
    if stack.name.is_empty() {
        return Err(StackError::InvalidStack(
            "stack name must not be empty".to_string(),
        ));
    }
    Ok(())
}
