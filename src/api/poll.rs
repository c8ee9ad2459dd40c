//! Search job polling
//!
//! A submitted job gathers results asynchronously on the server. The poller
//! queries its status until the state equals the done sentinel, pausing the
//! retry interval between attempts. A failed request and a not-yet-done state
//! are treated identically: wait, then ask again. There is no growing
//! backoff.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::retry::{RetryExhausted, RetryPolicy};
use super::{Job, JobState, SearchJobApi};

/// Server state string signalling the job has finished gathering results.
pub const DONE_STATE: &str = "DONE GATHERING RESULTS";

/// Polls a search job until the server reports completion.
pub struct JobPoller<A> {
    api: Arc<A>,
    policy: RetryPolicy,
}

impl<A: SearchJobApi> JobPoller<A> {
    /// Create a poller over the given API.
    pub fn new(api: Arc<A>, policy: RetryPolicy) -> Self {
        Self { api, policy }
    }

    /// Poll until the job is done gathering results; returns the message
    /// count. Advances the job through Polling to Ready.
    ///
    /// Under the default unbounded policy this waits as long as it takes; a
    /// bounded policy returns [`RetryExhausted`] once its attempt limit is
    /// reached without the job completing.
    pub async fn wait_until_done(&self, job: &mut Job) -> Result<u64, RetryExhausted> {
        job.advance(JobState::Polling);

        let mut attempts: u32 = 0;
        loop {
            attempts += 1;
            match self.api.job_status(job).await {
                Ok(status) if status.state == DONE_STATE => {
                    job.advance(JobState::Ready);
                    info!(
                        job = %job.url,
                        message_count = status.message_count,
                        "search job done gathering results"
                    );
                    return Ok(status.message_count);
                }
                Ok(status) => {
                    debug!(job = %job.url, state = %status.state, attempt = attempts, "job not done yet");
                }
                Err(error) => {
                    warn!(job = %job.url, attempt = attempts, %error, "poll request failed, will retry");
                }
            }
            if self.policy.exhausted(attempts) {
                return Err(RetryExhausted {
                    operation: "poll search job",
                    attempts,
                });
            }
            tokio::time::sleep(self.policy.pause).await;
        }
    }
}
