//! Error kinds raised by the build pipeline.
//!
//! Everything is carried inside `anyhow::Error`; callers that care about the
//! kind (mostly tests) can `downcast_ref::<BuildError>()`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    /// An external command exited with a non-zero status or was killed.
    #[error("{command} {}", describe_status(.status))]
    CommandFailed {
        /// The command rendered shell-style.
        command: String,
        /// Exit code, `None` when terminated by a signal.
        status: Option<i32>,
    },

    /// A required environment variable was not set.
    #[error("missing required environment variable '{0}'")]
    MissingVariable(String),

    /// A build step asked the registry for a component it does not know.
    #[error("unknown component '{0}'")]
    UnknownComponent(String),
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

impl BuildError {
    /// Exit status of a failed command, if this is one.
    pub fn status(&self) -> Option<i32> {
        match self {
            BuildError::CommandFailed { status, .. } => *status,
            _ => None,
        }
    }
}
