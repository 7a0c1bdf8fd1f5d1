//! Per-attempt outcomes and the error taxonomy shown to the user.

use thiserror::Error;

/// Why an attempt did not reach the result surface.
///
/// Every variant is recovered locally. The `Display` text is exactly the
/// line appended to the log surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Select a text (.txt) file first.")]
    NoFileSelected,

    #[error("The analysis engine is not ready yet.")]
    EngineNotReady,

    #[error("Failed to read the file: {reason}")]
    Read { file: String, reason: String },

    #[error("Analysis failed: {0}")]
    Engine(String),

    /// A second request arrived while an attempt was still reading or invoking.
    #[error("An analysis is already running.")]
    AttemptInProgress,
}

/// Discriminant of [`AnalysisError`], for matching without payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NoFileSelected,
    EngineNotReady,
    ReadError,
    EngineError,
    AttemptInProgress,
}

impl AnalysisError {
    pub fn read(file: impl Into<String>, reason: impl ToString) -> Self {
        Self::Read {
            file: file.into(),
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoFileSelected => ErrorKind::NoFileSelected,
            Self::EngineNotReady => ErrorKind::EngineNotReady,
            Self::Read { .. } => ErrorKind::ReadError,
            Self::Engine(_) => ErrorKind::EngineError,
            Self::AttemptInProgress => ErrorKind::AttemptInProgress,
        }
    }
}

/// Result of one attempt. Consumed immediately, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    Failure(AnalysisError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Kind of the failure, `None` on success.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(e) => Some(e.kind()),
        }
    }
}
