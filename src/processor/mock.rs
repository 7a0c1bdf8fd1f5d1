use anyhow::Result;
use std::sync::Mutex;

use super::TextProcessor;

type Respond = Box<dyn Fn(&str) -> Result<String> + Send + Sync>;

/// A scripted engine for tests. Records every input it is called with.
pub struct MockProcessor {
    respond: Respond,
    inputs: Mutex<Vec<String>>,
}

impl MockProcessor {
    pub fn new(respond: impl Fn(&str) -> Result<String> + Send + Sync + 'static) -> Self {
        Self {
            respond: Box::new(respond),
            inputs: Mutex::new(Vec::new()),
        }
    }

    /// `process(s) = s.to_uppercase()`
    pub fn uppercase() -> Self {
        Self::new(|text| Ok(text.to_uppercase()))
    }

    /// Every call fails with `message`.
    pub fn failing(message: &str) -> Self {
        let message = message.to_string();
        Self::new(move |_| Err(anyhow::anyhow!("{message}")))
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.inputs.lock().unwrap().len()
    }
}

impl TextProcessor for MockProcessor {
    fn process(&self, text: &str) -> Result<String> {
        self.inputs.lock().unwrap().push(text.to_string());
        (self.respond)(text)
    }
}
