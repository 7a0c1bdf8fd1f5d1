//! Single call into the analysis engine.

use std::panic::{self, AssertUnwindSafe};
use tracing::warn;

use crate::error::{AnalysisError, Outcome};
use crate::processor::TextProcessor;

/// Calls the engine once per attempt, no retry. Any failure, including a
/// panic inside the engine, comes back as `Failure(Engine)`.
///
/// A caught panic still goes through the process panic hook first, so the
/// default hook's `thread ... panicked` message reaches stderr alongside the
/// log surface. Hosts that care install their own hook.
///
/// Readiness is the caller's precondition and is not re-checked here.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisInvoker;

impl AnalysisInvoker {
    pub fn new() -> Self {
        Self
    }

    pub fn invoke(&self, engine: &dyn TextProcessor, text: &str) -> Outcome {
        match panic::catch_unwind(AssertUnwindSafe(|| engine.process(text))) {
            Ok(Ok(result)) => Outcome::Success(result),
            Ok(Err(e)) => {
                warn!(error = %e, "engine call failed");
                Outcome::Failure(AnalysisError::Engine(format!("{e:#}")))
            }
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                warn!(reason = %reason, "engine panicked");
                Outcome::Failure(AnalysisError::Engine(reason))
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "engine panicked".to_string()
    }
}
