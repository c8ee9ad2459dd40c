//! Pagination behavior against a scripted API

use futures_util::StreamExt;
use std::num::NonZeroU32;
use std::sync::Arc;

use sumo_export::api::retry::RETRY_PAUSE;
use sumo_export::api::{Job, LogRecord, MessagePaginator, RetryPolicy};

use crate::support::{records, ScriptedApi};

async fn collect(paginator: &MessagePaginator<ScriptedApi>, count: u64) -> Vec<LogRecord> {
    let job = Job::new("https://fake/search/jobs/0".to_string());
    let mut stream = paginator.records(job, count);
    let mut collected = Vec::new();
    while let Some(item) = stream.next().await {
        collected.push(item.expect("page fetch should succeed"));
    }
    collected
}

#[tokio::test(start_paused = true)]
async fn test_pages_cover_count_in_ascending_offsets() {
    let expected = records(25_000);
    let api = ScriptedApi::new(vec![expected.clone()]);

    let paginator = MessagePaginator::new(Arc::clone(&api), RetryPolicy::default(), 10_000);
    let collected = collect(&paginator, 25_000).await;

    assert_eq!(collected, expected);

    let calls = api.page_calls.lock().unwrap();
    let offsets: Vec<(usize, usize)> = calls.iter().map(|(_, l, o)| (*l, *o)).collect();
    assert_eq!(offsets, vec![(10_000, 0), (10_000, 10_000), (10_000, 20_000)]);
}

#[tokio::test(start_paused = true)]
async fn test_exact_multiple_fetches_trailing_empty_page() {
    let expected = records(20_000);
    let api = ScriptedApi::new(vec![expected.clone()]);

    let paginator = MessagePaginator::new(Arc::clone(&api), RetryPolicy::default(), 10_000);
    let collected = collect(&paginator, 20_000).await;

    assert_eq!(collected, expected);
    // floor(20000 / 10000) + 1 pages, the last one empty
    assert_eq!(api.page_calls.lock().unwrap().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_page_failures_are_retried_without_loss_or_duplication() {
    let expected = records(15_000);
    let api = ScriptedApi::new(vec![expected.clone()]);
    api.faults
        .pages
        .store(3, std::sync::atomic::Ordering::SeqCst);

    let paginator = MessagePaginator::new(Arc::clone(&api), RetryPolicy::default(), 10_000);
    let collected = collect(&paginator, 15_000).await;

    assert_eq!(collected, expected);
    assert_eq!(api.page_calls.lock().unwrap().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_bounded_policy_surfaces_exhaustion_as_stream_error() {
    let api = ScriptedApi::new(vec![records(5)]);
    api.faults
        .pages
        .store(u32::MAX, std::sync::atomic::Ordering::SeqCst);

    let policy = RetryPolicy::bounded(RETRY_PAUSE, NonZeroU32::new(2).unwrap());
    let paginator = MessagePaginator::new(Arc::clone(&api), policy, 10_000);

    let job = Job::new("https://fake/search/jobs/0".to_string());
    let mut stream = paginator.records(job, 5);
    let first = stream.next().await.expect("stream yields the failure");
    let error = first.unwrap_err();
    assert_eq!(error.attempts, 2);
}
