use std::io;
use std::sync::{Arc, Mutex, mpsc};

use tokio::sync::Notify;

use lexiscope::consts::{ANALYSIS_DONE_MESSAGE, ENGINE_READY_MESSAGE};
use lexiscope::file::FileRef;
use lexiscope::file::mock::MemoryFile;
use lexiscope::processor::mock::MockProcessor;
use lexiscope::surface::mock::RecordingSurface;
use lexiscope::{AnalysisError, ErrorKind, Outcome, PipelineController, PipelineState, Session};

struct Harness {
    pipeline: PipelineController,
    session: Arc<Session>,
    surface: Arc<RecordingSurface>,
    engine: Arc<MockProcessor>,
}

fn build(engine: MockProcessor) -> Harness {
    let session = Arc::new(Session::new());
    let surface = Arc::new(RecordingSurface::new());
    let pipeline = PipelineController::new(session.clone(), surface.clone());
    Harness {
        pipeline,
        session,
        surface,
        engine: Arc::new(engine),
    }
}

/// Engine ready, nothing picked yet.
fn ready(engine: MockProcessor) -> Harness {
    let h = build(engine);
    h.pipeline.on_engine_ready(h.engine.clone());
    h
}

#[tokio::test]
async fn hello_round_trip() {
    let h = ready(MockProcessor::uppercase());
    h.pipeline
        .on_file_picked(Some(MemoryFile::file_ref("hello.txt", "hello")));

    let outcome = h.pipeline.analyze().await;

    assert_eq!(outcome, Outcome::Success("HELLO".to_string()));
    assert_eq!(h.surface.snapshot().result.as_deref(), Some("HELLO"));
    assert_eq!(h.session.last_result().as_deref(), Some("HELLO"));
    assert_eq!(
        h.session.log(),
        vec![
            "Read hello.txt. Length: 5 bytes".to_string(),
            ANALYSIS_DONE_MESSAGE.to_string(),
        ]
    );
    assert_eq!(h.pipeline.state(), PipelineState::Displayed);
}

#[tokio::test]
async fn no_file_never_invokes_engine() {
    let h = ready(MockProcessor::uppercase());

    for _ in 0..3 {
        let outcome = h.pipeline.analyze().await;
        assert_eq!(outcome, Outcome::Failure(AnalysisError::NoFileSelected));
    }

    assert_eq!(h.engine.calls(), 0);
    let guidance = AnalysisError::NoFileSelected.to_string();
    assert_eq!(
        h.session.log(),
        vec![
            ENGINE_READY_MESSAGE.to_string(),
            guidance.clone(),
            guidance.clone(),
            guidance,
        ]
    );
    assert_eq!(h.pipeline.state(), PipelineState::ReadyNoFile);
}

#[tokio::test]
async fn engine_not_ready_never_reads_or_invokes() {
    let h = build(MockProcessor::uppercase());
    let handle = Arc::new(MemoryFile::new("hello"));
    h.pipeline
        .on_file_picked(Some(FileRef::new("hello.txt", handle.clone())));

    let outcome = h.pipeline.analyze().await;

    assert_eq!(outcome.error_kind(), Some(ErrorKind::EngineNotReady));
    assert_eq!(handle.reads(), 0);
    assert_eq!(h.engine.calls(), 0);
    assert_eq!(
        h.session.log(),
        vec![AnalysisError::EngineNotReady.to_string()]
    );
    assert_eq!(h.pipeline.state(), PipelineState::Idle);
}

#[tokio::test]
async fn no_file_and_no_engine_reports_missing_file() {
    let h = build(MockProcessor::uppercase());
    let outcome = h.pipeline.analyze().await;
    assert_eq!(outcome.error_kind(), Some(ErrorKind::NoFileSelected));
}

#[tokio::test]
async fn readiness_is_idempotent() {
    let h = build(MockProcessor::uppercase());
    h.pipeline.on_engine_ready(h.engine.clone());
    h.pipeline.on_engine_ready(h.engine.clone());

    assert!(h.session.engine_ready());
    assert_eq!(h.session.log(), vec![ENGINE_READY_MESSAGE.to_string()]);
    assert_eq!(h.pipeline.state(), PipelineState::ReadyNoFile);
}

#[tokio::test]
async fn latest_pick_is_the_one_ingested() {
    let h = ready(MockProcessor::uppercase());
    let first = Arc::new(MemoryFile::new("content of A"));
    h.pipeline
        .on_file_picked(Some(FileRef::new("a.txt", first.clone())));
    h.pipeline
        .on_file_picked(Some(MemoryFile::file_ref("b.txt", "content of B")));

    let outcome = h.pipeline.analyze().await;

    assert_eq!(outcome, Outcome::Success("CONTENT OF B".to_string()));
    assert_eq!(h.engine.inputs(), vec!["content of B".to_string()]);
    assert_eq!(first.reads(), 0);
    assert_eq!(h.surface.snapshot().file_name.as_deref(), Some("b.txt"));
}

#[tokio::test]
async fn read_failure_then_retry_recovers() {
    let h = ready(MockProcessor::uppercase());
    h.pipeline.on_file_picked(Some(FileRef::new(
        "vanished.txt",
        Arc::new(MemoryFile::failing(io::ErrorKind::NotFound)),
    )));

    let failed = h.pipeline.analyze().await;
    assert_eq!(failed.error_kind(), Some(ErrorKind::ReadError));
    assert_eq!(h.engine.calls(), 0);
    assert_eq!(h.pipeline.state(), PipelineState::ReadyWithFile);
    // selection survives so the user can retry
    assert_eq!(h.session.selected_file().unwrap().name(), "vanished.txt");
    // no reset on a failed read: the readiness line is still there
    let log = h.session.log();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0], ENGINE_READY_MESSAGE);
    assert!(log[1].starts_with("Failed to read the file: "));

    h.pipeline
        .on_file_picked(Some(MemoryFile::file_ref("ok.txt", "retry")));
    let retried = h.pipeline.analyze().await;

    assert_eq!(retried, Outcome::Success("RETRY".to_string()));
    assert_eq!(h.pipeline.state(), PipelineState::Displayed);
    assert_eq!(
        h.session.log(),
        vec![
            "Read ok.txt. Length: 5 bytes".to_string(),
            ANALYSIS_DONE_MESSAGE.to_string(),
        ]
    );
}

#[tokio::test]
async fn engine_failure_keeps_previous_result() {
    let h = build(MockProcessor::new(|text| {
        if text == "bad" {
            anyhow::bail!("cannot analyze")
        }
        Ok(text.to_uppercase())
    }));
    h.pipeline.on_engine_ready(h.engine.clone());

    h.pipeline
        .on_file_picked(Some(MemoryFile::file_ref("good.txt", "good")));
    h.pipeline.analyze().await;

    h.pipeline
        .on_file_picked(Some(MemoryFile::file_ref("bad.txt", "bad")));
    let outcome = h.pipeline.analyze().await;

    assert_eq!(
        outcome,
        Outcome::Failure(AnalysisError::Engine("cannot analyze".to_string()))
    );
    assert_eq!(h.pipeline.state(), PipelineState::ReadyWithFile);
    assert_eq!(h.surface.snapshot().result.as_deref(), Some("GOOD"));
    assert_eq!(h.session.last_result().as_deref(), Some("GOOD"));
    assert_eq!(
        h.session.log(),
        vec![
            "Read bad.txt. Length: 3 bytes".to_string(),
            "Analysis failed: cannot analyze".to_string(),
        ]
    );
}

#[tokio::test]
async fn engine_panic_is_recovered() {
    let h = ready(MockProcessor::new(|_| panic!("segfault-ish")));
    h.pipeline
        .on_file_picked(Some(MemoryFile::file_ref("a.txt", "a")));

    let outcome = h.pipeline.analyze().await;

    assert_eq!(outcome.error_kind(), Some(ErrorKind::EngineError));
    assert_eq!(h.pipeline.state(), PipelineState::ReadyWithFile);
    assert!(h.surface.snapshot().result.is_none());
}

#[tokio::test]
async fn blocking_engine_leaves_runtime_free() {
    // The engine waits on a task scheduled on the same single-threaded runtime.
    let (tx, rx) = mpsc::channel::<()>();
    let rx = Mutex::new(rx);
    let h = ready(MockProcessor::new(move |text| {
        rx.lock().unwrap().recv()?;
        Ok(text.to_uppercase())
    }));
    h.pipeline
        .on_file_picked(Some(MemoryFile::file_ref("a.txt", "wait")));

    let release = tokio::spawn(async move {
        tokio::task::yield_now().await;
        tx.send(()).unwrap();
    });

    let outcome = h.pipeline.analyze().await;
    release.await.unwrap();

    assert_eq!(outcome, Outcome::Success("WAIT".to_string()));
    assert_eq!(h.pipeline.state(), PipelineState::Displayed);
}

#[tokio::test]
async fn log_is_reset_once_per_successful_read() {
    let h = ready(MockProcessor::uppercase());
    h.pipeline
        .on_file_picked(Some(MemoryFile::file_ref("a.txt", "a")));

    h.pipeline.analyze().await;
    h.pipeline.analyze().await;

    assert_eq!(h.surface.snapshot().log_clears, 2);
    assert_eq!(h.session.log().len(), 2);
}

#[tokio::test]
async fn same_file_is_read_fresh_each_attempt() {
    let h = ready(MockProcessor::uppercase());
    let handle = Arc::new(MemoryFile::new("again"));
    h.pipeline
        .on_file_picked(Some(FileRef::new("again.txt", handle.clone())));

    h.pipeline.analyze().await;
    h.pipeline.analyze().await;

    assert_eq!(handle.reads(), 2);
    assert_eq!(h.engine.calls(), 2);
}

#[tokio::test]
async fn second_request_while_reading_is_ignored() {
    let h = ready(MockProcessor::uppercase());
    let gate = Arc::new(Notify::new());
    let handle = Arc::new(MemoryFile::gated("slow", gate.clone()));
    h.pipeline
        .on_file_picked(Some(FileRef::new("slow.txt", handle.clone())));

    let first = h.pipeline.analyze();
    tokio::pin!(first);
    assert!(futures::poll!(&mut first).is_pending());
    assert_eq!(h.pipeline.state(), PipelineState::Reading);

    let second = h.pipeline.analyze().await;
    assert_eq!(second, Outcome::Failure(AnalysisError::AttemptInProgress));
    assert_eq!(h.pipeline.state(), PipelineState::Reading);

    gate.notify_one();
    let outcome = first.await;

    assert_eq!(outcome, Outcome::Success("SLOW".to_string()));
    assert_eq!(handle.reads(), 1);
    assert_eq!(h.engine.calls(), 1);
    assert_eq!(h.pipeline.state(), PipelineState::Displayed);
}

#[tokio::test]
async fn picking_during_read_does_not_disturb_attempt() {
    let h = ready(MockProcessor::uppercase());
    let gate = Arc::new(Notify::new());
    h.pipeline.on_file_picked(Some(FileRef::new(
        "first.txt",
        Arc::new(MemoryFile::gated("first", gate.clone())),
    )));

    let attempt = h.pipeline.analyze();
    tokio::pin!(attempt);
    assert!(futures::poll!(&mut attempt).is_pending());

    h.pipeline
        .on_file_picked(Some(MemoryFile::file_ref("second.txt", "second")));
    assert_eq!(h.pipeline.state(), PipelineState::Reading);

    gate.notify_one();
    assert_eq!(attempt.await, Outcome::Success("FIRST".to_string()));

    let next = h.pipeline.analyze().await;
    assert_eq!(next, Outcome::Success("SECOND".to_string()));
}

#[tokio::test]
async fn clearing_during_read_settles_to_ready_no_file() {
    let h = ready(MockProcessor::uppercase());
    let gate = Arc::new(Notify::new());
    h.pipeline.on_file_picked(Some(FileRef::new(
        "first.txt",
        Arc::new(MemoryFile::gated("first", gate.clone())),
    )));

    let attempt = h.pipeline.analyze();
    tokio::pin!(attempt);
    assert!(futures::poll!(&mut attempt).is_pending());

    h.pipeline.on_file_picked(None);
    assert_eq!(h.pipeline.state(), PipelineState::Reading);

    gate.notify_one();
    // the running attempt still completes with the file it started on
    assert_eq!(attempt.await, Outcome::Success("FIRST".to_string()));
    assert!(h.session.selected_file().is_none());
    assert_eq!(h.pipeline.state(), PipelineState::ReadyNoFile);

    let next = h.pipeline.analyze().await;
    assert_eq!(next.error_kind(), Some(ErrorKind::NoFileSelected));
    assert_eq!(h.pipeline.state(), PipelineState::ReadyNoFile);
}

#[tokio::test]
async fn clearing_selection_returns_to_ready_no_file() {
    let h = ready(MockProcessor::uppercase());
    h.pipeline
        .on_file_picked(Some(MemoryFile::file_ref("a.txt", "a")));
    h.pipeline.on_file_picked(None);

    assert_eq!(h.pipeline.state(), PipelineState::ReadyNoFile);
    assert_eq!(
        h.surface.snapshot().file_name.as_deref(),
        Some("no file selected")
    );
    assert_eq!(
        h.pipeline.analyze().await.error_kind(),
        Some(ErrorKind::NoFileSelected)
    );
}
