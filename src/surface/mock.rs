use std::sync::Mutex;

use super::Surface;

/// Everything a [`RecordingSurface`] has been told to display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recorded {
    pub file_name: Option<String>,
    pub log: Vec<String>,
    pub result: Option<String>,
    pub log_clears: usize,
}

/// A surface for tests. Keeps what a real page would currently show.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    recorded: Mutex<Recorded>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Recorded {
        self.recorded.lock().unwrap().clone()
    }
}

impl Surface for RecordingSurface {
    fn show_file_name(&self, name: &str) {
        self.recorded.lock().unwrap().file_name = Some(name.to_string());
    }

    fn append_log(&self, line: &str) {
        self.recorded.lock().unwrap().log.push(line.to_string());
    }

    fn clear_log(&self) {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.log.clear();
        recorded.log_clears += 1;
    }

    fn show_result(&self, text: &str) {
        self.recorded.lock().unwrap().result = Some(text.to_string());
    }
}
