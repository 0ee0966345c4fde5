//! Builds and invokes the benchmark tool.
//!
//! The tool is a black box: it lives in a subdirectory of the checkout,
//! builds with its native toolchain, and writes whatever result files it
//! produces into the output directory handed to it. Nothing here parses
//! its output.

use std::path::Path;

use tokio::process::Command;

use gantry_core::WorkItem;

use crate::command::run_checked;
use crate::error::Result;

/// Default checkout subdirectory holding the tool's source.
pub const DEFAULT_TOOL_DIR: &str = "bench";

/// Name of the binary produced by the build step.
const TOOL_BINARY: &str = "bench-tool";

/// Builds the benchmark tool from a checkout and runs it for one attempt.
#[derive(Debug, Clone)]
pub struct BenchRunner {
    tool_dir: String,
}

impl Default for BenchRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL_DIR)
    }
}

impl BenchRunner {
    /// Creates a runner building the tool in `tool_dir` within a checkout.
    #[must_use]
    pub fn new(tool_dir: impl Into<String>) -> Self {
        Self {
            tool_dir: tool_dir.into(),
        }
    }

    /// Compiles the tool into a known binary path inside the checkout.
    ///
    /// # Errors
    ///
    /// Returns a spawn or command failure if the build does not succeed.
    pub async fn build(&self, checkout: &Path) -> Result<()> {
        let tool_dir = checkout.join(&self.tool_dir);
        let binary = tool_dir.join(TOOL_BINARY);

        run_checked(
            Command::new("go")
                .args(["build", "-o"])
                .arg(&binary)
                .arg(".")
                .current_dir(&tool_dir),
        )
        .await
    }

    /// Runs the built tool for one attempt, writing into `output_dir`.
    ///
    /// Invocation contract: `--model`, `--task`, `--attempt-group`,
    /// `--output-dir`; exit code 0 is success.
    ///
    /// # Errors
    ///
    /// Returns a spawn or command failure on non-zero exit.
    pub async fn run(&self, checkout: &Path, output_dir: &Path, item: &WorkItem) -> Result<()> {
        let tool_dir = checkout.join(&self.tool_dir);
        let binary = tool_dir.join(TOOL_BINARY);

        run_checked(
            Command::new(&binary)
                .arg("--model")
                .arg(&item.model)
                .arg("--task")
                .arg(&item.task)
                .arg("--attempt-group")
                .arg(&item.attempt_group)
                .arg("--output-dir")
                .arg(output_dir)
                .current_dir(&tool_dir),
        )
        .await
    }
}
