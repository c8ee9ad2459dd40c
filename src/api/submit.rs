//! Search job submission
//!
//! Builds the job payload for a date window and submits it under the retry
//! policy. The payload's `from`/`to` derive purely from the window bounds, so
//! repeated submissions across a long export do not drift with wall-clock
//! time.

use std::sync::Arc;
use tracing::info;

use super::retry::{RetryExhausted, RetryPolicy};
use super::{Job, SearchJobApi, SearchJobRequest};
use crate::schedule::DateWindow;

/// Format for the `from`/`to` payload fields: zone-less ISO-8601, with the
/// zone carried separately in `timeZone`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Submits one search job per date window.
pub struct JobSubmitter<A> {
    api: Arc<A>,
    policy: RetryPolicy,
    query: String,
    time_zone: String,
}

impl<A: SearchJobApi> JobSubmitter<A> {
    /// Create a submitter sending `query` over the given API.
    pub fn new(api: Arc<A>, policy: RetryPolicy, query: String, time_zone: String) -> Self {
        Self {
            api,
            policy,
            query,
            time_zone,
        }
    }

    /// Build the payload for a window.
    pub fn request_for(&self, window: &DateWindow) -> SearchJobRequest {
        SearchJobRequest {
            query: self.query.clone(),
            from: window.start.format(TIMESTAMP_FORMAT).to_string(),
            to: window.stop.format(TIMESTAMP_FORMAT).to_string(),
            time_zone: self.time_zone.clone(),
        }
    }

    /// Submit a search job for the window, retrying until the server
    /// acknowledges it.
    pub async fn submit(&self, window: &DateWindow) -> Result<Job, RetryExhausted> {
        let request = self.request_for(window);
        let job = self
            .policy
            .run("submit search job", || self.api.submit_job(&request))
            .await?;
        info!(window = %window.label(), job = %job.url, "search job created");
        Ok(job)
    }
}
