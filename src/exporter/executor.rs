//! Export executor
//!
//! Composes the scheduler, submitter, poller, and paginator into the
//! one-window-at-a-time pipeline and tracks the job state machine
//! Created → Polling → Ready → Downloading → Done.

use chrono::{NaiveDate, Utc};
use futures_util::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, Instrument};

use super::config::{DEFAULT_PAGE_SIZE, DEFAULT_QUERY, DEFAULT_TIME_ZONE, WARMUP_PAUSE};
use super::ExportError;
use crate::api::{
    JobPoller, JobState, JobSubmitter, MessagePaginator, RetryPolicy, SearchJobApi,
};
use crate::output::{self, Compressor, OutputError};
use crate::schedule::{DateWindow, ExportRange};

/// Counters reported after a completed export.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    /// Windows processed
    pub windows: u64,
    /// Files written (and handed to compression)
    pub files_written: u64,
    /// Total records exported
    pub records: u64,
}

/// Orchestrates the export of a date range, one window at a time.
pub struct Exporter<A, C> {
    api: Arc<A>,
    compressor: C,
    output_dir: PathBuf,
    query: String,
    time_zone: String,
    page_size: usize,
    warmup: Duration,
    policy: RetryPolicy,
}

impl<A: SearchJobApi + 'static, C: Compressor> Exporter<A, C> {
    /// Create an exporter writing window files under `output_dir`.
    pub fn new(api: Arc<A>, compressor: C, output_dir: PathBuf) -> Self {
        Self {
            api,
            compressor,
            output_dir,
            query: DEFAULT_QUERY.to_string(),
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            warmup: WARMUP_PAUSE,
            policy: RetryPolicy::default(),
        }
    }

    /// Narrow the export to records matching `query`.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set the time zone sent with every search job.
    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = time_zone.into();
        self
    }

    /// Override the pagination page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Override the pause between job submission and the first poll.
    pub fn with_warmup(mut self, warmup: Duration) -> Self {
        self.warmup = warmup;
        self
    }

    /// Override the retry policy applied to every request.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validate the date range and export it.
    ///
    /// `start`/`stop` default to the 30 days ending at midnight today;
    /// invalid input fails here, before any network I/O.
    pub async fn run(
        &self,
        start: Option<NaiveDate>,
        stop: Option<NaiveDate>,
    ) -> Result<ExportSummary, ExportError> {
        let range = ExportRange::resolve(start, stop, Utc::now())?;
        self.export(&range).await
    }

    /// Export an already-validated range.
    pub async fn export(&self, range: &ExportRange) -> Result<ExportSummary, ExportError> {
        std::fs::create_dir_all(&self.output_dir).map_err(OutputError::from)?;

        info!(
            start = %range.start(),
            stop = %range.stop(),
            windows = range.window_count(),
            "starting export"
        );

        let submitter = JobSubmitter::new(
            Arc::clone(&self.api),
            self.policy.clone(),
            self.query.clone(),
            self.time_zone.clone(),
        );
        let poller = JobPoller::new(Arc::clone(&self.api), self.policy.clone());
        let paginator =
            MessagePaginator::new(Arc::clone(&self.api), self.policy.clone(), self.page_size);

        let mut summary = ExportSummary::default();
        for window in range.windows() {
            let span = tracing::info_span!("export_window", window = %window.label());
            self.export_window(&window, &submitter, &poller, &paginator, &mut summary)
                .instrument(span)
                .await?;
        }

        info!(
            windows = summary.windows,
            files = summary.files_written,
            records = summary.records,
            "export complete"
        );
        Ok(summary)
    }

    async fn export_window(
        &self,
        window: &DateWindow,
        submitter: &JobSubmitter<A>,
        poller: &JobPoller<A>,
        paginator: &MessagePaginator<A>,
        summary: &mut ExportSummary,
    ) -> Result<(), ExportError> {
        summary.windows += 1;

        let mut job = submitter.submit(window).await?;

        debug!(pause = ?self.warmup, "waiting for server-side aggregation");
        tokio::time::sleep(self.warmup).await;

        let count = poller.wait_until_done(&mut job).await?;
        if count == 0 {
            info!("window has no messages, skipping file");
            return Ok(());
        }

        job.advance(JobState::Downloading);
        let mut records = Vec::with_capacity(count as usize);
        let mut stream = paginator.records(job.clone(), count);
        while let Some(record) = stream.next().await {
            records.push(record?);
        }
        job.advance(JobState::Done);

        let path = output::write_window_file(&self.output_dir, window, &records)?;
        info!(path = %path.display(), records = records.len(), "window file written");

        self.compressor.compress(&path).await?;

        summary.files_written += 1;
        summary.records += records.len() as u64;
        Ok(())
    }
}
