//! # Sumo Export Library
//!
//! Exports time-ranged log messages from a Sumo Logic search-job API into
//! local JSON files, one file per day.
//!
//! The export pipeline chunks a date range into one-day windows and, strictly
//! one window at a time: submits an asynchronous search job, polls the job
//! until the server reports it is done gathering results, paginates through
//! the result set, writes the records as pretty-printed JSON with sorted keys,
//! and hands the finished file to a compression collaborator.
//!
//! Transient request failures are absorbed by a retry policy that defaults to
//! retrying forever with a fixed one-second pause, so a flaky remote API slows
//! an export down rather than failing it. Session-affinity cookies returned by
//! the server are echoed on every subsequent request.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use sumo_export::api::HttpSearchApi;
//! use sumo_export::credentials::Credentials;
//! use sumo_export::exporter::Exporter;
//! use sumo_export::output::GzipCompressor;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = Credentials {
//!     email: "user@example.com".to_string(),
//!     password: "secret".to_string(),
//! };
//! let api = Arc::new(HttpSearchApi::new("https://api.sumologic.com/api/v1", credentials)?);
//! let exporter = Exporter::new(api, GzipCompressor, "exports".into());
//!
//! // Export the default range: the 30 days ending at midnight today.
//! let summary = exporter.run(None, None).await?;
//! println!("wrote {} files", summary.files_written);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`schedule`] - Date range validation and one-day window scheduling
//! - [`api`] - Search-job API client, session affinity, and retry policy
//! - [`exporter`] - Orchestration of the per-window export pipeline
//! - [`output`] - JSON file writing and the compression collaborator
//! - [`credentials`] - Credential provider interface
//! - [`cli`] - CLI command implementation

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Search-job API client, session handling, and retry policy
pub mod api;

/// CLI command implementation
pub mod cli;

/// Credential provider interface
pub mod credentials;

/// Export orchestration
pub mod exporter;

/// Output file writing and compression handoff
pub mod output;

/// Date range validation and window scheduling
pub mod schedule;

// Re-export commonly used types
pub use api::{HttpSearchApi, LogRecord, SearchJobApi};
pub use credentials::Credentials;
pub use exporter::{ExportSummary, Exporter};
pub use schedule::{DateWindow, ExportRange};
