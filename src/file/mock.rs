use async_trait::async_trait;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

use super::{FileHandle, FileRef};

/// An in-memory file for tests. Counts reads, can fail, and can be gated
/// so a read stays suspended until the test releases it.
pub struct MemoryFile {
    contents: Result<Vec<u8>, io::ErrorKind>,
    gate: Option<Arc<Notify>>,
    reads: AtomicUsize,
}

impl MemoryFile {
    pub fn new(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: Ok(contents.into()),
            gate: None,
            reads: AtomicUsize::new(0),
        }
    }

    /// Every read fails with the given error kind.
    pub fn failing(kind: io::ErrorKind) -> Self {
        Self {
            contents: Err(kind),
            gate: None,
            reads: AtomicUsize::new(0),
        }
    }

    /// Reads wait for `gate.notify_one()` before completing.
    pub fn gated(contents: impl Into<Vec<u8>>, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(contents)
        }
    }

    /// Shorthand for a [`FileRef`] backed by a fresh `MemoryFile`.
    pub fn file_ref(name: &str, contents: impl Into<Vec<u8>>) -> FileRef {
        FileRef::new(name, Arc::new(Self::new(contents)))
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FileHandle for MemoryFile {
    async fn read(&self) -> io::Result<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.contents {
            Ok(bytes) => Ok(bytes.clone()),
            Err(kind) => Err(io::Error::new(*kind, "memory file read failed")),
        }
    }
}
