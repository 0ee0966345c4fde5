//! Subprocess helpers shared by the checkout fetcher and bench runner.

use tokio::process::Command;
use tracing::info;

use crate::error::{Error, Result};

/// Renders a command as a single loggable line.
pub(crate) fn render(command: &Command) -> String {
    let std = command.as_std();
    std::iter::once(std.get_program())
        .chain(std.get_args())
        .map(|arg| arg.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs a command to completion, treating non-zero exit as failure.
///
/// Inherits stdio so the child's output lands in the worker's log stream.
pub(crate) async fn run_checked(command: &mut Command) -> Result<()> {
    let rendered = render(command);
    info!(command = %rendered, "running");

    let status = command.status().await.map_err(|source| Error::Spawn {
        command: rendered.clone(),
        source,
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::CommandFailed {
            command: rendered,
            code: status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_includes_program_and_args() {
        let mut command = Command::new("git");
        command.args(["clone", "https://example.com/repo.git"]);
        assert_eq!(render(&command), "git clone https://example.com/repo.git");
    }

    #[tokio::test]
    async fn successful_command_is_ok() {
        let mut command = Command::new("sh");
        command.args(["-c", "exit 0"]);
        run_checked(&mut command).await.expect("exit 0");
    }

    #[tokio::test]
    async fn non_zero_exit_carries_the_code() {
        let mut command = Command::new("sh");
        command.args(["-c", "exit 3"]);
        let err = run_checked(&mut command).await.expect_err("exit 3");
        match err {
            Error::CommandFailed { code, .. } => assert_eq!(code, Some(3)),
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let mut command = Command::new("gantry-no-such-binary");
        let err = run_checked(&mut command).await.expect_err("spawn failure");
        assert!(matches!(err, Error::Spawn { .. }));
    }
}
