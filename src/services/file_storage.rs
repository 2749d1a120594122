use std::{
    env, fs,
    path::{Path, PathBuf},
};

use tokio::fs as async_fs;

use crate::models::{errors::AppError, upload::UploadedFile};

/// Persists uploaded files into a single upload directory.
///
/// The directory is created (recursively) on construction and canonicalized
/// so every saved path reported back to the client is absolute.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        let dir = if dir.is_absolute() {
            dir
        } else {
            env::current_dir()
                .map_err(|e| {
                    AppError::storage_failed(format!("failed to resolve working directory: {}", e))
                })?
                .join(dir)
        };

        fs::create_dir_all(&dir).map_err(|e| {
            AppError::storage_failed(format!(
                "failed to create upload directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let root = fs::canonicalize(&dir).map_err(|e| {
            AppError::storage_failed(format!(
                "failed to resolve upload directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        Ok(Self { root })
    }

    /// Write one uploaded file under the store root, overwriting any
    /// existing file of the same name.
    pub async fn save(&self, filename: &str, data: &[u8]) -> Result<UploadedFile, AppError> {
        let name = sanitize_filename(filename).ok_or_else(|| {
            AppError::storage_failed(format!("unusable filename {:?}", filename))
        })?;
        let path = self.root.join(name);

        async_fs::write(&path, data).await.map_err(|e| {
            AppError::storage_failed(format!("failed to write {}: {}", path.display(), e))
        })?;

        tracing::debug!("saved {} ({} bytes)", path.display(), data.len());

        Ok(UploadedFile {
            original_name: filename.to_string(),
            path,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Reduce a client-supplied filename to its final path component.
///
/// Both `/` and `\` are treated as separators regardless of platform, so a
/// crafted filename can never place a file outside the upload directory.
/// Returns `None` for names with no usable component (empty, `.`, `..`).
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let candidate = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let name = Path::new(candidate).file_name()?.to_str()?;
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn sanitize_keeps_plain_names() {
        assert_eq!(sanitize_filename("a.txt"), Some("a.txt".to_string()));
        assert_eq!(sanitize_filename("archive.tar.gz"), Some("archive.tar.gz".to_string()));
    }

    #[test]
    fn sanitize_strips_directory_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), Some("passwd".to_string()));
        assert_eq!(sanitize_filename("a/b/c.txt"), Some("c.txt".to_string()));
        assert_eq!(sanitize_filename("a\\b.txt"), Some("b.txt".to_string()));
        assert_eq!(sanitize_filename("/abs/path.bin"), Some("path.bin".to_string()));
    }

    #[test]
    fn sanitize_rejects_unusable_names() {
        assert_eq!(sanitize_filename(""), None);
        assert_eq!(sanitize_filename("."), None);
        assert_eq!(sanitize_filename(".."), None);
        assert_eq!(sanitize_filename("dir/"), None);
    }

    #[test]
    fn save_writes_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = UploadStore::new(dir.path()).unwrap();

        tokio_test::block_on(async {
            let first = store.save("note.txt", b"hello").await.unwrap();
            assert!(first.path.is_absolute());
            assert_eq!(std::fs::read(&first.path).unwrap(), b"hello");

            let second = store.save("note.txt", b"replaced").await.unwrap();
            assert_eq!(second.path, first.path);
            assert_eq!(std::fs::read(&second.path).unwrap(), b"replaced");
        });
    }

    #[test]
    fn save_refuses_traversal_names() {
        let dir = TempDir::new().unwrap();
        let store = UploadStore::new(dir.path()).unwrap();

        tokio_test::block_on(async {
            let saved = store.save("../escape.txt", b"data").await.unwrap();
            assert_eq!(saved.path, store.root().join("escape.txt"));
            assert!(store.save("..", b"data").await.is_err());
        });
    }

    #[test]
    fn new_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b/c");
        let store = UploadStore::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert!(store.root().is_absolute());
    }
}
