//! Date range validation and one-day window scheduling
//!
//! An export range is a half-open interval `[start, stop)` of whole days.
//! [`ExportRange::resolve`] validates caller input before any network I/O and
//! [`ExportRange::windows`] tiles the range into contiguous one-day
//! [`DateWindow`]s with no gaps or overlaps.

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Length of a single export window in days.
pub const WINDOW_DAYS: i64 = 1;

/// Default range length when no start date is given.
/// 30 days matches the typical hot-retention period of the remote system.
pub const DEFAULT_RANGE_DAYS: i64 = 30;

/// Input validation errors. Fatal: reported before any network I/O.
#[derive(Debug, thiserror::Error)]
pub enum InputValidationError {
    /// The date string did not parse as `YYYY-MM-DD`
    #[error("invalid date '{input}': {reason}")]
    Malformed {
        /// Raw input as given by the caller
        input: String,
        /// Parser failure description
        reason: String,
    },

    /// The date lies in the future
    #[error("date {0} lies in the future")]
    FutureDate(NaiveDate),

    /// The range is empty or inverted
    #[error("start {start} must be before stop {stop}")]
    EmptyRange {
        /// Requested start date
        start: NaiveDate,
        /// Requested stop date
        stop: NaiveDate,
    },
}

/// Parse a date in `YYYY-MM-DD` format.
pub fn parse_date(input: &str) -> Result<NaiveDate, InputValidationError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|e| {
        InputValidationError::Malformed {
            input: input.to_string(),
            reason: e.to_string(),
        }
    })
}

/// A half-open time interval covering exactly one scheduling increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// Inclusive start of the window (midnight UTC)
    pub start: DateTime<Utc>,
    /// Exclusive end of the window
    pub stop: DateTime<Utc>,
}

impl DateWindow {
    /// Date label used for the window's output file name (`YYYY-MM-DD`).
    pub fn label(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }
}

/// A validated `[start, stop)` export range aligned to midnight UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportRange {
    start: DateTime<Utc>,
    stop: DateTime<Utc>,
}

impl ExportRange {
    /// Validate and normalize an export range.
    ///
    /// Defaults when unspecified: `stop` is `now` normalized to midnight UTC,
    /// `start` is `stop` minus [`DEFAULT_RANGE_DAYS`]. Both dates must not lie
    /// in the future and `start` must be strictly before `stop`.
    pub fn resolve(
        start: Option<NaiveDate>,
        stop: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Result<Self, InputValidationError> {
        let today = now.date_naive();
        let stop = stop.unwrap_or(today);
        let start = start.unwrap_or(stop - Duration::days(DEFAULT_RANGE_DAYS));

        if start > today {
            return Err(InputValidationError::FutureDate(start));
        }
        if stop > today {
            return Err(InputValidationError::FutureDate(stop));
        }
        if start >= stop {
            return Err(InputValidationError::EmptyRange { start, stop });
        }

        Ok(Self {
            start: midnight(start),
            stop: midnight(stop),
        })
    }

    /// Inclusive start of the range.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive end of the range.
    pub fn stop(&self) -> DateTime<Utc> {
        self.stop
    }

    /// Number of windows the range decomposes into:
    /// `ceil((stop - start) / increment)`.
    pub fn window_count(&self) -> u64 {
        ((self.stop - self.start).num_days() as u64).div_ceil(WINDOW_DAYS as u64)
    }

    /// Lazy, finite iterator over the windows tiling this range.
    ///
    /// Restartable: each call produces a fresh iterator beginning at `start`.
    pub fn windows(&self) -> Windows {
        Windows {
            cursor: self.start,
            stop: self.stop,
        }
    }
}

/// Iterator over the one-day windows of an [`ExportRange`].
///
/// Windows derive purely from the cursor, never from elapsed wall-clock time,
/// so bounds do not drift across iterations.
#[derive(Debug, Clone)]
pub struct Windows {
    cursor: DateTime<Utc>,
    stop: DateTime<Utc>,
}

impl Iterator for Windows {
    type Item = DateWindow;

    fn next(&mut self) -> Option<DateWindow> {
        if self.cursor >= self.stop {
            return None;
        }
        let start = self.cursor;
        let stop = (start + Duration::days(WINDOW_DAYS)).min(self.stop);
        self.cursor = stop;
        Some(DateWindow { start, stop })
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc()
}
