//! Ephemeral filesystem workspaces for attempt execution.
//!
//! Every attempt gets two exclusively-owned directories: one for the
//! source checkout and one for the tool's output. Ownership is the
//! cleanup mechanism: a [`Workspace`] removes its directory tree when
//! dropped, on every exit path, and tolerates removal failure.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{Error, Result};

/// Creates prefix-named ephemeral directories.
///
/// By default workspaces live in the system temp directory; tests root
/// them at a known directory to observe the cleanup invariant.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceFactory {
    root: Option<PathBuf>,
}

impl WorkspaceFactory {
    /// Creates a factory placing workspaces in the system temp directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a factory placing workspaces under `root`.
    #[must_use]
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Creates a fresh empty workspace named after `prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Workspace`] if the directory cannot be created.
    pub fn create(&self, prefix: &str) -> Result<Workspace> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(prefix);

        let dir = match &self.root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|source| Error::Workspace {
            root: self
                .root
                .clone()
                .unwrap_or_else(std::env::temp_dir),
            source,
        })?;

        Ok(Workspace { dir })
    }
}

/// An exclusively-owned ephemeral directory.
///
/// Dropping the workspace removes the directory and everything in it;
/// removal failures are ignored rather than surfaced.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Returns the workspace directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_drop_removes_directory() {
        let factory = WorkspaceFactory::new();
        let workspace = factory.create("gantry-test-").expect("create workspace");
        let path = workspace.path().to_path_buf();
        assert!(path.is_dir());

        drop(workspace);
        assert!(!path.exists());
    }

    #[test]
    fn rooted_factory_places_workspaces_under_root() {
        let root = tempfile::tempdir().expect("root dir");
        let factory = WorkspaceFactory::rooted_at(root.path());

        let workspace = factory.create("gantry-test-").expect("create workspace");
        assert!(workspace.path().starts_with(root.path()));

        drop(workspace);
        let leftover: Vec<_> = std::fs::read_dir(root.path())
            .expect("read root")
            .collect();
        assert!(leftover.is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        let factory = WorkspaceFactory::rooted_at("/no/such/root/anywhere");
        assert!(factory.create("gantry-test-").is_err());
    }
}
