//! One-shot asynchronous reads of a picked file's text.

use tracing::debug;

use crate::error::AnalysisError;
use crate::file::FileRef;

/// Text read from a file, plus its length in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingested {
    pub text: String,
    pub byte_len: usize,
}

/// Reads the whole file on every call. Nothing is cached between attempts,
/// even when the same file is analyzed twice.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileIngestor;

impl FileIngestor {
    pub fn new() -> Self {
        Self
    }

    /// Suspends until the read completes. Bytes are decoded as UTF-8 with
    /// invalid sequences replaced, so only I/O failures are errors.
    pub async fn read_as_text(&self, file: &FileRef) -> Result<Ingested, AnalysisError> {
        let bytes = file
            .handle()
            .read()
            .await
            .map_err(|e| AnalysisError::read(file.name(), e))?;

        let text = String::from_utf8_lossy(&bytes).into_owned();
        let byte_len = text.len();
        debug!(file = file.name(), byte_len, "file ingested");

        Ok(Ingested { text, byte_len })
    }
}
