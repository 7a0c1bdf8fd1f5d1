pub mod mock;

use async_trait::async_trait;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Opaque access to a picked file's bytes. Owned by whatever did the
/// picking; the pipeline only borrows it for one read per attempt.
#[async_trait]
pub trait FileHandle: Send + Sync {
    async fn read(&self) -> io::Result<Vec<u8>>;
}

/// A user-chosen file: its display name plus the handle to read it through.
#[derive(Clone)]
pub struct FileRef {
    name: String,
    handle: Arc<dyn FileHandle>,
}

impl FileRef {
    pub fn new(name: impl Into<String>, handle: Arc<dyn FileHandle>) -> Self {
        Self {
            name: name.into(),
            handle,
        }
    }

    /// Refer to a file on disk. The name is the last path component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(name, Arc::new(PathHandle::new(path)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> &dyn FileHandle {
        self.handle.as_ref()
    }
}

impl fmt::Debug for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileRef").field("name", &self.name).finish()
    }
}

/// Reads a path from disk. Every call is a fresh read; nothing is cached.
#[derive(Debug, Clone)]
pub struct PathHandle {
    path: PathBuf,
}

impl PathHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FileHandle for PathHandle {
    async fn read(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_path_uses_file_name() {
        let file = FileRef::from_path("/tmp/some/notes.txt");
        assert_eq!(file.name(), "notes.txt");
    }

    #[test]
    fn debug_shows_only_name() {
        let file = FileRef::from_path("/tmp/notes.txt");
        assert_eq!(format!("{file:?}"), r#"FileRef { name: "notes.txt" }"#);
    }

    #[tokio::test]
    async fn path_handle_reads_fresh_each_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "first").unwrap();

        let handle = PathHandle::new(&path);
        assert_eq!(handle.read().await.unwrap(), b"first");

        std::fs::write(&path, "second").unwrap();
        assert_eq!(handle.read().await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn path_handle_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let handle = PathHandle::new(dir.path().join("gone.txt"));
        let err = handle.read().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
