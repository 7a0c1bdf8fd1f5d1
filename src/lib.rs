//! Readiness-gated file ingestion and analysis pipeline.
//!
//! A host (terminal, browser shell, test) owns the display surfaces and
//! forwards three triggers to a [`PipelineController`]: the engine became
//! ready, a file was picked, and analysis was requested.

pub mod banner;
pub mod commands;
pub mod config;
pub mod consts;
pub mod error;
pub mod feedback;
pub mod file;
pub mod ingest;
pub mod invoker;
pub mod pipeline;
pub mod processor;
pub mod readiness;
pub mod selection;
pub mod session;
pub mod surface;

pub use error::{AnalysisError, ErrorKind, Outcome};
pub use pipeline::PipelineController;
pub use session::{PipelineState, Session};
