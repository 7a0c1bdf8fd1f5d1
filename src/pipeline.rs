//! The per-attempt state machine tying the components together.
//!
//! ```text
//! Idle --engine ready--> ReadyNoFile --file picked--> ReadyWithFile
//! ReadyWithFile --analyze--> Reading --read ok--> Invoking --ok--> Displayed
//!                            Reading --read failed--> ReadyWithFile
//!                                       Invoking --failed--> ReadyWithFile
//! ```
//!
//! A selection cleared mid-attempt settles to `ReadyNoFile` instead of
//! `Displayed`. `analyze` requests while an attempt is in flight are ignored.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::consts::{ANALYSIS_DONE_MESSAGE, read_message};
use crate::error::{AnalysisError, Outcome};
use crate::feedback::FeedbackPresenter;
use crate::file::FileRef;
use crate::ingest::FileIngestor;
use crate::invoker::AnalysisInvoker;
use crate::processor::TextProcessor;
use crate::readiness::EngineReadiness;
use crate::selection::FileSelection;
use crate::session::{PipelineState, Session};
use crate::surface::Surface;

/// Reacts to the three host triggers. All methods take `&self`, so a host
/// can forward a second click while an attempt is suspended on its read.
pub struct PipelineController {
    session: Arc<Session>,
    readiness: EngineReadiness,
    selection: FileSelection,
    ingestor: FileIngestor,
    invoker: AnalysisInvoker,
    feedback: FeedbackPresenter,
}

impl PipelineController {
    pub fn new(session: Arc<Session>, surface: Arc<dyn Surface>) -> Self {
        let feedback = FeedbackPresenter::new(session.clone(), surface.clone());
        Self {
            readiness: EngineReadiness::new(session.clone(), feedback.clone()),
            selection: FileSelection::new(session.clone(), surface),
            ingestor: FileIngestor::new(),
            invoker: AnalysisInvoker::new(),
            feedback,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> PipelineState {
        self.session.state()
    }

    /// Engine initialization finished. Only the first call has any effect.
    pub fn on_engine_ready(&self, engine: Arc<dyn TextProcessor>) {
        if self.readiness.mark_ready(engine) {
            let state = self.session.settle();
            debug!(?state, "engine ready");
        }
    }

    /// The user picked a file, or cleared the picker (`None`).
    pub fn on_file_picked(&self, file: Option<FileRef>) {
        self.selection.on_file_picked(file);
        let state = self.session.settle();
        debug!(?state, "selection changed");
    }

    /// Run one attempt: read the selected file, hand its text to the engine,
    /// show the result. Every failure is reported on the log surface and
    /// leaves the pipeline ready for another attempt.
    pub async fn analyze(&self) -> Outcome {
        let (file, engine) = match self.begin_attempt() {
            Ok(ready) => ready,
            Err(e) => {
                self.session.settle();
                warn!(error = %e, "analysis request rejected");
                self.feedback.append(&e.to_string());
                return Outcome::Failure(e);
            }
        };
        debug!(file = file.name(), "reading");

        let ingested = match self.ingestor.read_as_text(&file).await {
            Ok(ingested) => ingested,
            Err(e) => return self.fail(e),
        };

        self.feedback.reset();
        self.feedback
            .append(&read_message(file.name(), ingested.byte_len));

        self.session.set_state(PipelineState::Invoking);
        debug!(file = file.name(), "invoking engine");

        match self.invoke_off_runtime(engine, ingested.text).await {
            Outcome::Success(result) => {
                self.feedback.show_result(&result);
                self.feedback.append(ANALYSIS_DONE_MESSAGE);
                let state = self.session.finish_succeeded();
                info!(file = file.name(), result_len = result.len(), ?state, "analysis displayed");
                Outcome::Success(result)
            }
            Outcome::Failure(e) => self.fail(e),
        }
    }

    /// Guard clauses, in order: in-flight attempt, missing file, engine not
    /// ready. On success the session is already in `Reading`.
    fn begin_attempt(&self) -> Result<(FileRef, Arc<dyn TextProcessor>), AnalysisError> {
        if self.session.state().is_in_flight() {
            return Err(AnalysisError::AttemptInProgress);
        }
        let file = self
            .session
            .selected_file()
            .ok_or(AnalysisError::NoFileSelected)?;
        let engine = self.readiness.engine().ok_or(AnalysisError::EngineNotReady)?;
        self.session
            .try_begin_reading()
            .map_err(|_| AnalysisError::AttemptInProgress)?;
        Ok((file, engine))
    }

    /// The engine call blocks, so it runs on the blocking pool. The attempt
    /// still waits for it before moving on.
    async fn invoke_off_runtime(&self, engine: Arc<dyn TextProcessor>, text: String) -> Outcome {
        let invoker = self.invoker;
        tokio::task::spawn_blocking(move || invoker.invoke(engine.as_ref(), &text))
            .await
            .unwrap_or_else(|e| Outcome::Failure(AnalysisError::Engine(e.to_string())))
    }

    fn fail(&self, error: AnalysisError) -> Outcome {
        let state = self.session.finish_failed();
        warn!(error = %error, ?state, "attempt failed");
        self.feedback.append(&error.to_string());
        Outcome::Failure(error)
    }
}
