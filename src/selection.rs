//! The currently chosen input file.

use std::sync::Arc;
use tracing::debug;

use crate::consts::NO_FILE_PLACEHOLDER;
use crate::file::FileRef;
use crate::session::Session;
use crate::surface::Surface;

/// Replaces the selection on every pick. Any file is accepted; extension
/// filters are a picker affordance, not enforced here.
pub struct FileSelection {
    session: Arc<Session>,
    surface: Arc<dyn Surface>,
}

impl FileSelection {
    pub fn new(session: Arc<Session>, surface: Arc<dyn Surface>) -> Self {
        Self { session, surface }
    }

    pub fn on_file_picked(&self, file: Option<FileRef>) {
        let name = file
            .as_ref()
            .map_or(NO_FILE_PLACEHOLDER, |f| f.name())
            .to_string();
        debug!(file = %name, "file picked");
        self.session.replace_selected_file(file);
        self.surface.show_file_name(&name);
    }
}
