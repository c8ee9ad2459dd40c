//! Output file writing and compression handoff
//!
//! One JSON file per exported window, named by the window's start date, then
//! handed to a [`Compressor`] once the file is closed.

pub mod compress;
pub mod json;

pub use compress::{Compressor, GzipCompressor};
pub use json::{window_file_path, write_window_file};

/// Output errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// Filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record serialization failure
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Compression collaborator failure
    #[error("compression error: {0}")]
    Compression(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
