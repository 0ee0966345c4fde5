//! Attempt execution: one work item end to end.
//!
//! The [`AttemptRunner`] trait is the seam between the consumer loop and
//! the real checkout/build/run/upload pipeline; tests substitute trivial
//! implementations.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{Instrument, error, info};

use gantry_core::observability::attempt_span;
use gantry_core::store::ArtifactStore;
use gantry_core::WorkItem;

use crate::bench::{BenchRunner, DEFAULT_TOOL_DIR};
use crate::checkout::CheckoutFetcher;
use crate::error::Result;
use crate::publish::publish_directory;
use crate::workspace::WorkspaceFactory;

/// Result of executing one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Checkout, build, run, and upload all completed.
    Completed,
    /// Some step failed; the item should be redelivered.
    Failed,
}

impl AttemptOutcome {
    /// Returns true if the attempt completed.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Trait for executing a validated work item.
///
/// Implementations never surface errors: every failure is caught, logged
/// with diagnostic context, and reported as [`AttemptOutcome::Failed`].
#[async_trait]
pub trait AttemptRunner: Send + Sync {
    /// Executes one attempt end to end.
    async fn execute(&self, item: &WorkItem) -> AttemptOutcome;
}

/// The production attempt runner: fetches the requested checkout, builds
/// and runs the benchmark tool, and publishes the output tree under the
/// item's `repo_version` prefix.
///
/// Both ephemeral workspaces (checkout and output) are removed before
/// `execute` returns, whatever the outcome.
pub struct BenchAttemptRunner {
    repo_url: String,
    tool_dir: String,
    store: Arc<dyn ArtifactStore>,
    workspaces: WorkspaceFactory,
}

impl BenchAttemptRunner {
    /// Creates a runner cloning from `repo_url` and publishing to `store`.
    #[must_use]
    pub fn new(repo_url: impl Into<String>, store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            repo_url: repo_url.into(),
            tool_dir: DEFAULT_TOOL_DIR.to_string(),
            store,
            workspaces: WorkspaceFactory::new(),
        }
    }

    /// Overrides the checkout subdirectory holding the tool's source.
    #[must_use]
    pub fn with_tool_dir(mut self, tool_dir: impl Into<String>) -> Self {
        self.tool_dir = tool_dir.into();
        self
    }

    /// Roots ephemeral workspaces at `root` instead of the system temp
    /// directory.
    #[must_use]
    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspaces = WorkspaceFactory::rooted_at(root);
        self
    }

    async fn try_execute(&self, item: &WorkItem) -> Result<Vec<String>> {
        let fetcher = CheckoutFetcher::new(self.repo_url.as_str(), self.workspaces.clone());
        let bench = BenchRunner::new(self.tool_dir.as_str());

        // Both workspaces are owned by this scope; leaving it on any path
        // removes them.
        let checkout = fetcher.fetch(&item.repo_version).await?;
        let output = self.workspaces.create("gantry-out-")?;

        bench.build(checkout.path()).await?;
        bench.run(checkout.path(), output.path(), item).await?;

        let keys = publish_directory(self.store.as_ref(), &item.repo_version, output.path()).await?;
        Ok(keys)
    }
}

#[async_trait]
impl AttemptRunner for BenchAttemptRunner {
    async fn execute(&self, item: &WorkItem) -> AttemptOutcome {
        let span = attempt_span(&item.model, &item.task, &item.attempt_group, &item.repo_version);

        match self.try_execute(item).instrument(span).await {
            Ok(keys) => {
                info!(
                    model = %item.model,
                    task = %item.task,
                    uploaded = keys.len(),
                    "attempt completed"
                );
                AttemptOutcome::Completed
            }
            Err(error) => {
                error!(
                    model = %item.model,
                    task = %item.task,
                    error = %error,
                    "attempt failed"
                );
                AttemptOutcome::Failed
            }
        }
    }
}
