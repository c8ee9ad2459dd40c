//! Compression collaborator
//!
//! Compression of finished window files is external to the export pipeline:
//! the pipeline's obligation ends at handing over a completed, closed file
//! path. [`GzipCompressor`] is the production collaborator and shells out to
//! `gzip`; tests substitute their own [`Compressor`].

use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

use super::{OutputError, OutputResult};

/// Compresses a finished window file in place.
#[async_trait]
pub trait Compressor: Send + Sync {
    /// Compress the file at `path`.
    async fn compress(&self, path: &Path) -> OutputResult<()>;
}

/// Invokes the `gzip` command on the file, replacing it with `{path}.gz`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GzipCompressor;

#[async_trait]
impl Compressor for GzipCompressor {
    async fn compress(&self, path: &Path) -> OutputResult<()> {
        debug!(path = %path.display(), "compressing window file");
        let status = Command::new("gzip")
            .arg("-f")
            .arg(path)
            .status()
            .await
            .map_err(|e| OutputError::Compression(format!("failed to run gzip: {e}")))?;

        if !status.success() {
            return Err(OutputError::Compression(format!(
                "gzip exited with {status} for {}",
                path.display()
            )));
        }
        Ok(())
    }
}
