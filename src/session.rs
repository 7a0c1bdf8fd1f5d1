//! The single state-holding object shared by every pipeline component.
//!
//! A host creates one [`Session`] and hands an `Arc` of it to each component
//! constructor. Nothing reaches it through globals, so tests can build as
//! many isolated sessions as they like.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::file::FileRef;

/// Where the pipeline is in its per-attempt state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Engine not ready yet.
    Idle,
    ReadyNoFile,
    ReadyWithFile,
    /// Waiting on the file read, the only suspension point.
    Reading,
    Invoking,
    /// Last attempt succeeded. Behaves like `ReadyWithFile` for every trigger.
    Displayed,
}

impl PipelineState {
    /// An attempt is between `Reading` and its outcome.
    pub fn is_in_flight(self) -> bool {
        matches!(self, PipelineState::Reading | PipelineState::Invoking)
    }
}

#[derive(Debug)]
struct State {
    engine_ready: bool,
    selected_file: Option<FileRef>,
    log: Vec<String>,
    last_result: Option<String>,
    pipeline: PipelineState,
}

/// Page-lifetime session state.
#[derive(Debug)]
pub struct Session {
    state: Mutex<State>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                engine_ready: false,
                selected_file: None,
                log: Vec::new(),
                last_result: None,
                pipeline: PipelineState::Idle,
            }),
        }
    }

    // Never held across an await; a poisoned lock still holds consistent data.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn engine_ready(&self) -> bool {
        self.lock().engine_ready
    }

    pub fn selected_file(&self) -> Option<FileRef> {
        self.lock().selected_file.clone()
    }

    /// Snapshot of the log surface contents.
    pub fn log(&self) -> Vec<String> {
        self.lock().log.clone()
    }

    pub fn last_result(&self) -> Option<String> {
        self.lock().last_result.clone()
    }

    pub fn state(&self) -> PipelineState {
        self.lock().pipeline
    }

    /// Returns `true` only on the false -> true transition.
    pub(crate) fn set_engine_ready(&self) -> bool {
        let mut state = self.lock();
        let changed = !state.engine_ready;
        state.engine_ready = true;
        changed
    }

    pub(crate) fn replace_selected_file(&self, file: Option<FileRef>) {
        self.lock().selected_file = file;
    }

    pub(crate) fn push_log(&self, line: String) {
        self.lock().log.push(line);
    }

    pub(crate) fn clear_log(&self) {
        self.lock().log.clear();
    }

    pub(crate) fn set_last_result(&self, text: String) {
        self.lock().last_result = Some(text);
    }

    pub(crate) fn set_state(&self, next: PipelineState) {
        self.lock().pipeline = next;
    }

    /// Atomically check that no attempt is in flight and enter `Reading`.
    /// Returns the state that was current when the check failed.
    pub(crate) fn try_begin_reading(&self) -> Result<(), PipelineState> {
        let mut state = self.lock();
        if state.pipeline.is_in_flight() {
            return Err(state.pipeline);
        }
        state.pipeline = PipelineState::Reading;
        Ok(())
    }

    /// Recompute the resting state from readiness and selection.
    /// In-flight states are left alone; the running attempt settles itself.
    pub(crate) fn settle(&self) -> PipelineState {
        let mut state = self.lock();
        if state.pipeline.is_in_flight() {
            return state.pipeline;
        }
        state.pipeline = resting_state(state.engine_ready, state.selected_file.is_some());
        state.pipeline
    }

    /// Leave an in-flight state after the result was shown. Only lands in
    /// `Displayed` while a file is still selected.
    pub(crate) fn finish_succeeded(&self) -> PipelineState {
        let mut state = self.lock();
        state.pipeline = if state.selected_file.is_some() {
            PipelineState::Displayed
        } else {
            resting_state(state.engine_ready, false)
        };
        state.pipeline
    }

    /// Leave an in-flight state after a failed step.
    pub(crate) fn finish_failed(&self) -> PipelineState {
        let mut state = self.lock();
        state.pipeline = resting_state(state.engine_ready, state.selected_file.is_some());
        state.pipeline
    }
}

fn resting_state(engine_ready: bool, has_file: bool) -> PipelineState {
    match (engine_ready, has_file) {
        (false, _) => PipelineState::Idle,
        (true, false) => PipelineState::ReadyNoFile,
        (true, true) => PipelineState::ReadyWithFile,
    }
}
