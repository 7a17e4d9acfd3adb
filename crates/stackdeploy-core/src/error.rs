//! Error type for stack operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StackError {
    /// The orchestration tool could not be started.
    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The orchestration tool ran and exited non-zero.
    ///
    /// `detail` holds the tool's stderr verbatim and is the whole message.
    #[error("{detail}")]
    Operation { detail: String, code: Option<i32> },

    #[error("Invalid stack: {0}")]
    InvalidStack(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StackError {
    /// Raw diagnostics reported by the tool, if this is an operation failure.
    pub fn detail(&self) -> Option<&str> {
        match self {
            StackError::Operation { detail, .. } => Some(detail),
            _ => None,
        }
    }

    /// Exit code of the tool, if it ran and was not killed by a signal.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            StackError::Operation { code, .. } => *code,
            _ => None,
        }
    }
}
