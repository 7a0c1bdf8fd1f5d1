//! Progress and error lines for the log surface, and the final result.

use std::sync::Arc;

use crate::session::Session;
use crate::surface::Surface;

/// Keeps the session's log and result in step with the host's surfaces.
/// Lines are shown exactly as given.
#[derive(Clone)]
pub struct FeedbackPresenter {
    session: Arc<Session>,
    surface: Arc<dyn Surface>,
}

impl FeedbackPresenter {
    pub fn new(session: Arc<Session>, surface: Arc<dyn Surface>) -> Self {
        Self { session, surface }
    }

    pub fn append(&self, line: &str) {
        self.session.push_log(line.to_string());
        self.surface.append_log(line);
    }

    /// Clear the log. Called once per attempt, right after the file was
    /// read and before that attempt's first line.
    pub fn reset(&self) {
        self.session.clear_log();
        self.surface.clear_log();
    }

    pub fn show_result(&self, text: &str) {
        self.session.set_last_result(text.to_string());
        self.surface.show_result(text);
    }
}
