//! Integration tests for the bulk generation orchestrator

use std::sync::Arc;
use std::time::Duration;

use curricula::catalog::Level;
use curricula::error::ApiError;
use curricula::generation::{BulkGenerationOrchestrator, CancellationToken, RunPhase};
use curricula::pacing::ItemPacer;
use curricula::progress::{BulkProgress, ProgressLog};
use curricula::provider::ResilientContentClient;

use crate::integration::test_utils::{recording_pacer, FailingStore, FlakyTransport, GatedTransport, RecordingSleeper};

fn quiet_pacer() -> ItemPacer {
    ItemPacer::new(Duration::ZERO, RecordingSleeper::new())
}

#[tokio::test]
async fn test_full_run_reports_every_lesson() {
    let (pacer, pauses) = recording_pacer();
    let orchestrator =
        BulkGenerationOrchestrator::new(ResilientContentClient::unconfigured()).with_pacer(pacer);
    let log = Arc::new(ProgressLog::new());
    let sink = log.clone();
    let callback = move |progress: &BulkProgress| sink.record(progress);

    let report = orchestrator.run_full_catalog(Some(&callback)).await.unwrap();

    assert_eq!(report.total_lessons, 294);
    assert_eq!(report.completed, 294);
    assert_eq!(report.failed, 0);
    assert_eq!(report.fallback_count, 294);
    assert!(!report.cancelled);

    let updates = log.snapshot();
    assert_eq!(updates.len(), 294);
    assert!(updates
        .windows(2)
        .all(|pair| pair[0].progress_percent <= pair[1].progress_percent));
    let last = log.last().unwrap();
    assert_eq!(last.progress_percent, 100.0);
    assert_eq!(last.level_label, "C2");
    assert_eq!(last.current_lesson_ordinal, 294);
    assert_eq!(last.total_lessons, 294);
    assert_eq!(updates[0].level_label, "A1");
    assert_eq!(updates[0].current_lesson_ordinal, 1);

    // One fixed pause per item
    let delays = pauses.delays();
    assert_eq!(delays.len(), 294);
    assert!(delays.iter().all(|d| *d == Duration::from_millis(100)));

    let status = orchestrator.status();
    assert_eq!(status.phase, RunPhase::Idle);
    assert!(!status.is_running);
    assert_eq!(status.progress_percent, 100.0);
    assert_eq!(status.current_level, Some(Level::C2));
    assert_eq!(status.current_lesson_ordinal, 294);
}

#[tokio::test]
async fn test_run_without_callback() {
    let orchestrator = BulkGenerationOrchestrator::new(ResilientContentClient::unconfigured())
        .with_pacer(quiet_pacer());

    let report = orchestrator.run_full_catalog(None).await.unwrap();

    assert_eq!(report.processed(), 294);
    assert!(!orchestrator.status().is_running);
}

#[tokio::test]
async fn test_item_failure_does_not_stop_the_run() {
    let store = FailingStore::failing_on(&["A2:w03:l02"]);
    let orchestrator = BulkGenerationOrchestrator::new(ResilientContentClient::unconfigured())
        .with_pacer(quiet_pacer())
        .with_store(store.clone());
    let log = Arc::new(ProgressLog::new());
    let sink = log.clone();
    let callback = move |progress: &BulkProgress| sink.record(progress);

    let report = orchestrator.run_full_catalog(Some(&callback)).await.unwrap();

    assert_eq!(report.completed, 293);
    assert_eq!(report.failed, 1);
    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.level_label, "A2");
    assert_eq!((failure.week, failure.lesson_in_week), (3, 2));
    // 48 A1 lessons, then two full A2 weeks of four
    assert_eq!(failure.ordinal, 58);
    assert!(failure.error.contains("disk full"));

    assert_eq!(store.saved_keys(), 293);
    assert_eq!(log.len(), 294);
    assert_eq!(log.last().unwrap().progress_percent, 100.0);
}

#[tokio::test]
async fn test_store_writes_run_off_the_async_thread() {
    let store = FailingStore::failing_on(&[]);
    let orchestrator = BulkGenerationOrchestrator::new(ResilientContentClient::unconfigured())
        .with_pacer(quiet_pacer())
        .with_store(store.clone());

    let report = orchestrator.run_full_catalog(None).await.unwrap();

    assert_eq!(report.completed, 294);
    assert_eq!(store.saved_keys(), 294);
    let writers = store.writer_threads();
    assert!(!writers.is_empty());
    // Current-thread runtime: the test thread is the only async thread
    assert!(!writers.contains(&std::thread::current().id()));
}

#[tokio::test]
async fn test_transient_transport_errors_are_absorbed_by_client() {
    let transport = FlakyTransport::new(2);
    let client = ResilientContentClient::new(Some(transport.clone()))
        .with_sleeper(RecordingSleeper::new());
    let orchestrator = BulkGenerationOrchestrator::new(client).with_pacer(quiet_pacer());

    let report = orchestrator.run_full_catalog(None).await.unwrap();

    assert_eq!(report.completed, 294);
    assert_eq!(report.fallback_count, 0);
    assert_eq!(transport.calls(), 296);
}

#[tokio::test]
async fn test_cancellation_stops_between_items() {
    let orchestrator = BulkGenerationOrchestrator::new(ResilientContentClient::unconfigured())
        .with_pacer(quiet_pacer());
    let token = CancellationToken::new();
    let trigger = token.clone();
    let callback = move |progress: &BulkProgress| {
        if progress.current_lesson_ordinal == 10 {
            trigger.cancel();
        }
    };

    let report = orchestrator
        .run_full_catalog_with_token(Some(&callback), token)
        .await
        .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.processed(), 10);
    let status = orchestrator.status();
    assert!(!status.is_running);
    assert!(status.progress_percent < 100.0);
}

#[tokio::test]
async fn test_second_run_is_rejected_while_first_is_active() {
    let transport = GatedTransport::new();
    let client = ResilientContentClient::new(Some(transport.clone()))
        .with_sleeper(RecordingSleeper::new());
    let orchestrator = Arc::new(BulkGenerationOrchestrator::new(client).with_pacer(quiet_pacer()));

    let first = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move { orchestrator.run_full_catalog(None).await })
    };

    while transport.calls() == 0 {
        tokio::task::yield_now().await;
    }
    let status = orchestrator.status();
    assert!(status.is_running);
    assert_eq!(status.phase, RunPhase::Running);
    assert_eq!(status.current_level, Some(Level::A1));
    assert_eq!(status.current_lesson_ordinal, 1);

    let second = orchestrator.run_full_catalog(None).await;
    assert!(matches!(second, Err(ApiError::AlreadyRunning)));

    assert!(orchestrator.cancel());
    transport.release_all();

    let report = first.await.unwrap().unwrap();
    assert!(report.cancelled);
    assert_eq!(report.processed(), 1);
    assert!(!orchestrator.status().is_running);
    assert!(!orchestrator.cancel());

    // Idle again, so a fresh run is accepted
    let rerun = orchestrator.run_full_catalog(None).await.unwrap();
    assert_eq!(rerun.processed(), 294);
}
