//! Host and engine configuration, filled in from the command line.

use std::path::PathBuf;

use crate::consts::DEFAULT_LOG_LEVEL;

/// How to launch the external analysis engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Executable path, or a bare name looked up on the search path.
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("text-analyzer"),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub engine: EngineConfig,
    /// File to select before the first prompt.
    pub file: Option<PathBuf>,
    /// Analyze `file` once and exit.
    pub run_once: bool,
    /// `tracing` filter directive for diagnostics on stderr.
    pub log_level: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            file: None,
            run_once: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
