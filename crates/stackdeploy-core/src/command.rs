//! Command-line construction for the orchestration tool.
//!
//! Produces a [`CommandSpec`] for each stack operation:
//!
//! ```text
//! <tool>[.exe] -H <url> [--tls [--tlsverify --tlscacert <ca>] [--tlscert <cert> --tlskey <key>]] stack ...
//! ```
//!
//! Global flags (`-H`, TLS) always precede the `stack` sub-command.

use std::ffi::OsString;
use std::fmt;

use crate::platform::Platform;
use crate::types::{EndpointDescriptor, StackDescriptor};

/// Executable specification: program plus argument vector.
///
/// Arguments are OS strings so project paths reach the tool byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<OsString>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Arguments decoded lossily, for display and assertions.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Build the program name and global flags targeting `endpoint`.
pub fn base_command(platform: Platform, tool: &str, endpoint: &EndpointDescriptor) -> CommandSpec {
    let mut spec =
        CommandSpec::new(platform.executable_name(tool)).args(["-H", endpoint.url.as_str()]);

    if let Some(tls) = endpoint.enabled_tls() {
        spec = spec.arg("--tls");

        if !tls.skip_verify {
            spec = spec.args(["--tlsverify", "--tlscacert", tls.ca_cert_path.as_str()]);
        }

        if tls.has_client_cert() {
            spec = spec.args([
                "--tlscert",
                tls.cert_path.as_str(),
                "--tlskey",
                tls.key_path.as_str(),
            ]);
        }
    }

    spec
}

/// `stack deploy --compose-file <manifest> <name>`
pub fn deploy_args(stack: &StackDescriptor) -> Vec<OsString> {
    vec![
        "stack".into(),
        "deploy".into(),
        "--compose-file".into(),
        stack.manifest_path().into_os_string(),
        stack.name.as_str().into(),
    ]
}

/// `stack rm <name>`
pub fn remove_args(stack: &StackDescriptor) -> Vec<OsString> {
    vec!["stack".into(), "rm".into(), stack.name.as_str().into()]
}
