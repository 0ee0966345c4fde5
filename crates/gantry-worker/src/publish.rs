//! Publishes an attempt's output tree to the artifact store.

use std::path::Path;

use tracing::info;
use walkdir::WalkDir;

use gantry_core::store::ArtifactStore;

use crate::error::Result;

/// Uploads every regular file under `dir` to the store.
///
/// Keys are `{prefix}/{relative/path}` with forward-slash separators; a
/// trailing slash on the prefix is normalized away. Returns the uploaded
/// keys in walk order. A failure anywhere aborts the remaining uploads
/// and leaves already-uploaded objects in place.
///
/// # Errors
///
/// Propagates directory traversal and upload failures.
pub async fn publish_directory(
    store: &dyn ArtifactStore,
    prefix: &str,
    dir: &Path,
) -> Result<Vec<String>> {
    let prefix = prefix.trim_end_matches('/');
    let mut uploaded = Vec::new();

    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| {
            gantry_core::Error::storage_with_source(format!("failed to walk {}", dir.display()), e)
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(dir).map_err(|e| {
            gantry_core::Error::storage_with_source(
                format!("{} escapes {}", entry.path().display(), dir.display()),
                e,
            )
        })?;

        let key = artifact_key(prefix, relative);
        store.put_file(&key, entry.path()).await?;
        info!(key = %key, "uploaded artifact");
        uploaded.push(key);
    }

    Ok(uploaded)
}

/// Joins a normalized prefix and a relative path into a store key.
fn artifact_key(prefix: &str, relative: &Path) -> String {
    let relative = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    if prefix.is_empty() {
        relative
    } else {
        format!("{prefix}/{relative}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_core::store::InMemoryArtifactStore;
    use std::fs;

    fn write_file(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, contents).expect("write file");
    }

    #[tokio::test]
    async fn uploads_tree_under_prefix() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(&dir.path().join("a.txt"), "alpha");
        write_file(&dir.path().join("sub").join("b.txt"), "beta");

        let store = InMemoryArtifactStore::new();
        let mut keys = publish_directory(&store, "v1", dir.path())
            .await
            .expect("publish");
        keys.sort();

        assert_eq!(keys, vec!["v1/a.txt".to_string(), "v1/sub/b.txt".to_string()]);
        assert_eq!(store.keys().expect("keys"), keys);
        assert_eq!(
            store.get("v1/sub/b.txt").expect("get").expect("stored"),
            "beta"
        );
    }

    #[tokio::test]
    async fn trailing_slash_on_prefix_is_normalized() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(&dir.path().join("a.txt"), "alpha");

        let store = InMemoryArtifactStore::new();
        let keys = publish_directory(&store, "v1/", dir.path())
            .await
            .expect("publish");

        assert_eq!(keys, vec!["v1/a.txt".to_string()]);
    }

    #[tokio::test]
    async fn empty_directory_uploads_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = InMemoryArtifactStore::new();

        let keys = publish_directory(&store, "v1", dir.path())
            .await
            .expect("publish");

        assert!(keys.is_empty());
        assert!(store.is_empty().expect("is_empty"));
    }

    #[test]
    fn artifact_key_joins_with_forward_slashes() {
        let relative = Path::new("sub").join("deep").join("c.json");
        assert_eq!(artifact_key("v2", &relative), "v2/sub/deep/c.json");
        assert_eq!(artifact_key("", &relative), "sub/deep/c.json");
    }
}
