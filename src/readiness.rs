//! Whether the analysis engine is callable yet.

use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

use crate::consts::ENGINE_READY_MESSAGE;
use crate::feedback::FeedbackPresenter;
use crate::processor::TextProcessor;
use crate::session::Session;

/// Holds the engine handle once initialization has finished. Before that
/// there is no handle at all, so an early call cannot even be attempted.
pub struct EngineReadiness {
    session: Arc<Session>,
    feedback: FeedbackPresenter,
    engine: OnceLock<Arc<dyn TextProcessor>>,
}

impl EngineReadiness {
    pub fn new(session: Arc<Session>, feedback: FeedbackPresenter) -> Self {
        Self {
            session,
            feedback,
            engine: OnceLock::new(),
        }
    }

    /// Install the engine and announce readiness. Idempotent: only the first
    /// call installs and logs. Returns whether this call did it.
    pub fn mark_ready(&self, engine: Arc<dyn TextProcessor>) -> bool {
        if self.engine.set(engine).is_err() {
            debug!("engine already ready, ignoring");
            return false;
        }
        self.session.set_engine_ready();
        info!("engine ready");
        self.feedback.append(ENGINE_READY_MESSAGE);
        true
    }

    pub fn engine(&self) -> Option<Arc<dyn TextProcessor>> {
        self.engine.get().cloned()
    }
}
