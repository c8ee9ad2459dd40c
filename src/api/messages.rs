//! Result pagination
//!
//! Once a job is done gathering results, its messages are fetched in pages of
//! a fixed size at ascending offsets. The paginator produces a lazy,
//! forward-only stream of records: each page is fetched exactly once, under
//! the per-page retry policy, and records are yielded in server order without
//! buffering beyond the current page. The stream is not restartable once
//! consumed.

use futures_util::{stream, StreamExt};
use std::sync::Arc;
use tracing::debug;

use super::retry::{RetryExhausted, RetryPolicy};
use super::{Job, LogRecord, RecordStream, SearchJobApi};

/// Paginates a completed job's result set.
pub struct MessagePaginator<A> {
    api: Arc<A>,
    policy: RetryPolicy,
    page_size: usize,
}

impl<A: SearchJobApi + 'static> MessagePaginator<A> {
    /// Create a paginator fetching `page_size` messages per request.
    pub fn new(api: Arc<A>, policy: RetryPolicy, page_size: usize) -> Self {
        Self {
            api,
            policy,
            page_size,
        }
    }

    /// Number of page requests for a job with `message_count` messages:
    /// `floor(count / page_size) + 1`, matching the wire contract even when
    /// the count is an exact multiple of the page size (the trailing page is
    /// then empty).
    pub fn page_count(&self, message_count: u64) -> u64 {
        message_count / self.page_size as u64 + 1
    }

    /// Stream the job's records, page by page, in ascending offset order.
    ///
    /// Offsets are exact multiples of the page size and cover `[0, count)`
    /// with no duplicate or missing record. An `Err` item appears only when a
    /// bounded retry policy gives up on a page; consumption should stop
    /// there.
    pub fn records(&self, job: Job, message_count: u64) -> RecordStream {
        let api = Arc::clone(&self.api);
        let policy = self.policy.clone();
        let page_size = self.page_size;
        let pages = self.page_count(message_count);
        debug!(job = %job.url, message_count, pages, "starting pagination");

        let record_stream = stream::unfold(0u64, move |page| {
            let api = Arc::clone(&api);
            let policy = policy.clone();
            let job = job.clone();
            async move {
                if page >= pages {
                    return None;
                }
                let offset = (page * page_size as u64) as usize;
                debug!(page, offset, "fetching message page");
                let result = policy
                    .run("fetch message page", || {
                        api.job_messages(&job, page_size, offset)
                    })
                    .await;
                Some((result, page + 1))
            }
        })
        .flat_map(|page_result| {
            let items: Vec<Result<LogRecord, RetryExhausted>> = match page_result {
                Ok(records) => records.into_iter().map(Ok).collect(),
                Err(error) => vec![Err(error)],
            };
            stream::iter(items)
        });

        Box::pin(record_stream)
    }
}
