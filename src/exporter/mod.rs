//! Export orchestration
//!
//! The exporter drives the per-window pipeline strictly sequentially:
//! validate the date range, then for each window submit a search job, wait
//! for server-side aggregation, poll to completion, paginate the results,
//! write one JSON file, and hand it to the compression collaborator. Window
//! N finishes completely before window N+1 begins.
//!
//! # Components
//!
//! - [`executor`] - The [`Exporter`] orchestrator
//! - [`config`] - Pipeline constants and their rationale
//!
//! # Error Handling
//!
//! Transient request failures never reach the orchestrator under the default
//! retry policy; it only fails on invalid input, filesystem problems, or an
//! explicitly bounded retry policy giving up.

pub mod config;
pub mod executor;

pub use executor::{ExportSummary, Exporter};

use crate::api::RetryExhausted;
use crate::output::OutputError;
use crate::schedule::InputValidationError;

/// Export errors
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Invalid input date range, reported before any network I/O
    #[error("input validation error: {0}")]
    Validation(#[from] InputValidationError),

    /// A bounded retry policy gave up on a request
    #[error(transparent)]
    RetriesExhausted(#[from] RetryExhausted),

    /// Writing or compressing an output file failed
    #[error("output error: {0}")]
    Output(#[from] OutputError),
}
