//! Transient failures must not change the exported output

use chrono::NaiveDate;
use std::num::NonZeroU32;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tempfile::TempDir;

use sumo_export::api::retry::RETRY_PAUSE;
use sumo_export::api::RetryPolicy;
use sumo_export::exporter::ExportError;
use sumo_export::Exporter;

use crate::support::{records, RecordingCompressor, ScriptedApi};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_failures_on_every_operation_leave_output_unchanged() {
    let day = records(42);
    let api = ScriptedApi::with_pending_polls(vec![day.clone()], 5);
    api.faults.submit.store(4, Ordering::SeqCst);
    api.faults.poll.store(3, Ordering::SeqCst);
    api.faults.pages.store(2, Ordering::SeqCst);

    let compressor = RecordingCompressor::default();
    let dir = TempDir::new().unwrap();
    let exporter = Exporter::new(
        Arc::clone(&api),
        compressor.clone(),
        dir.path().to_path_buf(),
    );

    let summary = exporter
        .run(Some(date("2023-06-01")), Some(date("2023-06-02")))
        .await
        .unwrap();

    assert_eq!(summary.windows, 1);
    assert_eq!(summary.files_written, 1);
    assert_eq!(summary.records, 42);

    // exactly one job despite the retried submissions
    assert_eq!(api.submits.lock().unwrap().len(), 1);

    let content = std::fs::read_to_string(dir.path().join("2023-06-01.json")).unwrap();
    let parsed: Vec<sumo_export::LogRecord> = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed, day);
    assert_eq!(compressor.compressed.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_bounded_policy_fails_the_export_when_submission_never_succeeds() {
    let api = ScriptedApi::new(vec![records(1)]);
    api.faults.submit.store(u32::MAX, Ordering::SeqCst);

    let dir = TempDir::new().unwrap();
    let exporter = Exporter::new(
        Arc::clone(&api),
        RecordingCompressor::default(),
        dir.path().to_path_buf(),
    )
    .with_retry_policy(RetryPolicy::bounded(RETRY_PAUSE, NonZeroU32::new(3).unwrap()));

    let error = exporter
        .run(Some(date("2023-06-01")), Some(date("2023-06-02")))
        .await
        .unwrap_err();

    match error {
        ExportError::RetriesExhausted(inner) => assert_eq!(inner.attempts, 3),
        other => panic!("unexpected error: {other}"),
    }
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}
