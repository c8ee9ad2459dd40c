//! JSON window file writer
//!
//! Each window's records are written as a JSON array, pretty-printed, with
//! object keys sorted lexicographically (serde_json's default map ordering).
//! The file is flushed and closed before its path is returned, so the caller
//! can hand a completed file to the compression collaborator.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::OutputResult;
use crate::api::LogRecord;
use crate::schedule::DateWindow;

/// Path of the output file for a window: `{dir}/{YYYY-MM-DD}.json`,
/// named from the window's start date.
pub fn window_file_path(dir: &Path, window: &DateWindow) -> PathBuf {
    dir.join(format!("{}.json", window.label()))
}

/// Write a window's records and return the path of the closed file.
pub fn write_window_file(
    dir: &Path,
    window: &DateWindow,
    records: &[LogRecord],
) -> OutputResult<PathBuf> {
    let path = window_file_path(dir, window);
    debug!(path = %path.display(), records = records.len(), "writing window file");

    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;
    // writer (and the file handle) drop here, before the path is handed out

    Ok(path)
}
