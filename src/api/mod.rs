//! Search-job API client implementations
//!
//! The [`SearchJobApi`] trait is the seam between the export pipeline and the
//! remote system: one method per wire operation, each performing a single
//! attempt and returning a typed [`ApiError`] on failure. Retrying lives in
//! [`retry::RetryPolicy`] and is applied per call site by the lifecycle
//! components ([`submit::JobSubmitter`], [`poll::JobPoller`],
//! [`messages::MessagePaginator`]).

use async_trait::async_trait;
use futures_util::Stream;
use serde::Serialize;
use std::pin::Pin;
use tracing::debug;

pub mod http;
pub mod messages;
pub mod poll;
pub mod retry;
pub mod session;
pub mod submit;

pub use http::HttpSearchApi;
pub use messages::MessagePaginator;
pub use poll::JobPoller;
pub use retry::{RetryExhausted, RetryPolicy};
pub use session::SessionContext;
pub use submit::JobSubmitter;

/// A single log record: an unordered mapping from field names to JSON values.
///
/// serde_json's default map representation keeps keys sorted, which the
/// output format relies on.
pub type LogRecord = serde_json::Map<String, serde_json::Value>;

/// API request errors (all transient: retried by the policy, never surfaced
/// under the default unbounded policy)
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a status the operation does not accept
    #[error("unexpected status {status} from {operation}")]
    UnexpectedStatus {
        /// Operation that saw the status
        operation: &'static str,
        /// HTTP status code
        status: u16,
    },

    /// The response body could not be interpreted
    #[error("malformed response from {operation}: {reason}")]
    MalformedResponse {
        /// Operation that received the body
        operation: &'static str,
        /// Parse failure description
        reason: String,
    },
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Search job payload submitted to the job collection endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SearchJobRequest {
    /// Query filter, `"*"` unless the caller narrows it
    pub query: String,
    /// Window start, zone-less ISO-8601
    pub from: String,
    /// Window stop (exclusive), zone-less ISO-8601
    pub to: String,
    /// Zone the from/to timestamps are interpreted in
    #[serde(rename = "timeZone")]
    pub time_zone: String,
}

/// Lifecycle states of a search job.
///
/// Every transition moves forward; there is no failed state because transient
/// failures loop back into the same state via retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Submitted and acknowledged by the server
    Created,
    /// Being polled for completion
    Polling,
    /// Server is done gathering results
    Ready,
    /// Result pages are being fetched
    Downloading,
    /// All pages consumed
    Done,
}

/// Handle to a server-side search job.
#[derive(Debug, Clone)]
pub struct Job {
    /// Resource URL of the job (`{base}/search/jobs/{id}`)
    pub url: String,
    /// Current lifecycle state
    pub state: JobState,
}

impl Job {
    /// Create a handle for a freshly submitted job.
    pub fn new(url: String) -> Self {
        Self {
            url,
            state: JobState::Created,
        }
    }

    /// Advance the job to the next lifecycle state.
    pub fn advance(&mut self, state: JobState) {
        debug!(job = %self.url, from = ?self.state, to = ?state, "job state transition");
        self.state = state;
    }
}

/// Job status as reported by the poll endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStatus {
    /// Raw server-side state string
    pub state: String,
    /// Number of messages gathered so far
    pub message_count: u64,
}

/// Stream of log records produced by the paginator.
///
/// Forward-only and finite; an `Err` item means a bounded retry policy gave
/// up on a page, and ends meaningful consumption.
pub type RecordStream = Pin<Box<dyn Stream<Item = Result<LogRecord, RetryExhausted>> + Send>>;

/// Wire operations of the remote search-job API (single attempt each).
#[async_trait]
pub trait SearchJobApi: Send + Sync {
    /// Submit a search job; success is HTTP 202 with a job id in the body.
    async fn submit_job(&self, request: &SearchJobRequest) -> ApiResult<Job>;

    /// Fetch the current status of a job; success is HTTP 200.
    async fn job_status(&self, job: &Job) -> ApiResult<JobStatus>;

    /// Fetch one page of result messages, in server order.
    async fn job_messages(&self, job: &Job, limit: usize, offset: usize)
        -> ApiResult<Vec<LogRecord>>;
}
