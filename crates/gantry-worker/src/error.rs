//! Error types for the worker domain.

use std::path::PathBuf;

/// The result type used throughout gantry-worker.
pub type Result<T> = std::result::Result<T, Error>;

fn status_label(code: &Option<i32>) -> String {
    code.map_or_else(
        || "terminated by signal".to_string(),
        |code| format!("exit code {code}"),
    )
}

/// Errors that can occur while executing an attempt.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A subprocess could not be started at all.
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        /// The rendered command line.
        command: String,
        /// The underlying spawn failure.
        #[source]
        source: std::io::Error,
    },

    /// A subprocess ran but did not exit successfully.
    #[error("command failed ({}): `{command}`", status_label(.code))]
    CommandFailed {
        /// The rendered command line.
        command: String,
        /// The process exit code, absent when killed by a signal.
        code: Option<i32>,
    },

    /// An ephemeral workspace could not be created.
    #[error("failed to create workspace under {root}: {source}")]
    Workspace {
        /// The directory the workspace was to be created in.
        root: PathBuf,
        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// An error from gantry-core (queue, storage, serialization).
    #[error(transparent)]
    Core(#[from] gantry_core::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failure_includes_command_and_code() {
        let err = Error::CommandFailed {
            command: "git checkout deadbeef".to_string(),
            code: Some(128),
        };
        assert_eq!(
            err.to_string(),
            "command failed (exit code 128): `git checkout deadbeef`"
        );
    }

    #[test]
    fn signal_termination_is_described() {
        let err = Error::CommandFailed {
            command: "bench-tool".to_string(),
            code: None,
        };
        assert!(err.to_string().contains("terminated by signal"));
    }
}
