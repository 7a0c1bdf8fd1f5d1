pub mod command;
pub mod mock;

use anyhow::Result;

/// The external analysis engine. Takes the whole text, returns the whole
/// result. Could be a compiled binary, a library, or a test script.
///
/// Calls are synchronous with respect to the pipeline step.
pub trait TextProcessor: Send + Sync {
    fn process(&self, text: &str) -> Result<String>;
}
