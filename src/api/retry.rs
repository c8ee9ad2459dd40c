//! Retry policy for transient request failures
//!
//! The remote API is retried with a fixed pause between attempts. The default
//! policy is unbounded: a request loops until it succeeds and no error ever
//! reaches the caller. A maximum attempt count can be configured per call
//! site, in which case [`RetryExhausted`] surfaces after the bound is hit.

use std::future::Future;
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::warn;

use super::ApiResult;

/// Fixed pause between retry attempts.
/// 1 second is long enough for transient server hiccups to clear without
/// hammering the API between attempts.
pub const RETRY_PAUSE: Duration = Duration::from_secs(1);

/// An operation did not succeed within the configured attempt bound.
///
/// Each failed attempt is logged as it happens; this error only reports that
/// the bound was reached.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{operation} did not succeed within {attempts} attempts")]
pub struct RetryExhausted {
    /// Name of the operation that gave up
    pub operation: &'static str,
    /// Number of attempts made
    pub attempts: u32,
}

/// Fixed-pause retry policy, unbounded unless an attempt limit is set.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Pause between attempts
    pub pause: Duration,
    /// Maximum attempts, or `None` to retry forever
    pub max_attempts: Option<NonZeroU32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::unbounded(RETRY_PAUSE)
    }
}

impl RetryPolicy {
    /// Retry forever with the given pause between attempts.
    pub fn unbounded(pause: Duration) -> Self {
        Self {
            pause,
            max_attempts: None,
        }
    }

    /// Retry up to `max_attempts` times with the given pause.
    pub fn bounded(pause: Duration, max_attempts: NonZeroU32) -> Self {
        Self {
            pause,
            max_attempts: Some(max_attempts),
        }
    }

    /// Whether the policy permits no further attempts after `attempts`.
    pub fn exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max.get())
    }

    /// Run `call` until it succeeds, pausing between attempts.
    ///
    /// Every failure is logged and swallowed; under the default unbounded
    /// policy this function only ever returns `Ok`.
    pub async fn run<T, F, Fut>(
        &self,
        operation: &'static str,
        mut call: F,
    ) -> Result<T, RetryExhausted>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let mut attempts: u32 = 0;
        loop {
            attempts += 1;
            match call().await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    warn!(operation, attempt = attempts, %error, "request failed, will retry");
                }
            }
            if self.exhausted(attempts) {
                return Err(RetryExhausted {
                    operation,
                    attempts,
                });
            }
            tokio::time::sleep(self.pause).await;
        }
    }
}
