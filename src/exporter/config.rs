//! Export pipeline constants

use std::time::Duration;

/// Messages fetched per pagination request.
/// 10,000 keeps a page comfortably inside one response while bounding how
/// much of a window is held in a single page buffer.
pub const DEFAULT_PAGE_SIZE: usize = 10_000;

/// Pause between submitting a job and the first poll.
/// 60 seconds gives server-side aggregation time to start; polling earlier
/// just burns requests on "still gathering" answers.
pub const WARMUP_PAUSE: Duration = Duration::from_secs(60);

/// Query filter submitted when the caller does not narrow the export.
pub const DEFAULT_QUERY: &str = "*";

/// Time zone the from/to bounds of every search job are interpreted in.
pub const DEFAULT_TIME_ZONE: &str = "UTC";
