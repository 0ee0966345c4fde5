//! Materializes a versioned snapshot of the benchmark tool's source.

use tokio::process::Command;

use crate::command::run_checked;
use crate::error::Result;
use crate::workspace::{Workspace, WorkspaceFactory};

/// Fetches version-control checkouts into fresh ephemeral workspaces.
#[derive(Debug, Clone)]
pub struct CheckoutFetcher {
    repo_url: String,
    workspaces: WorkspaceFactory,
}

impl CheckoutFetcher {
    /// Creates a fetcher cloning from `repo_url`.
    #[must_use]
    pub fn new(repo_url: impl Into<String>, workspaces: WorkspaceFactory) -> Self {
        Self {
            repo_url: repo_url.into(),
            workspaces,
        }
    }

    /// Clones the repository, fetches all refs and tags, and checks out
    /// `reference` (a commit hash or tag) in a fresh workspace.
    ///
    /// On any failure the partially populated workspace is dropped, which
    /// removes it, before the error reaches the caller.
    ///
    /// # Errors
    ///
    /// Propagates workspace creation failures and any git command that
    /// cannot be spawned or exits non-zero (including unknown references).
    pub async fn fetch(&self, reference: &str) -> Result<Workspace> {
        let workspace = self.workspaces.create("gantry-repo-")?;

        run_checked(
            Command::new("git")
                .arg("clone")
                .arg(&self.repo_url)
                .arg(workspace.path()),
        )
        .await?;
        run_checked(
            Command::new("git")
                .arg("-C")
                .arg(workspace.path())
                .args(["fetch", "--all", "--tags"]),
        )
        .await?;
        run_checked(
            Command::new("git")
                .arg("-C")
                .arg(workspace.path())
                .args(["checkout", reference]),
        )
        .await?;

        Ok(workspace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failed_clone_removes_the_workspace() {
        let root = tempfile::tempdir().expect("root dir");
        let fetcher = CheckoutFetcher::new(
            "/gantry-no-such-repo.git",
            WorkspaceFactory::rooted_at(root.path()),
        );

        fetcher.fetch("deadbeef").await.expect_err("clone must fail");

        let leftover: Vec<_> = std::fs::read_dir(root.path())
            .expect("read root")
            .collect();
        assert!(leftover.is_empty());
    }
}
