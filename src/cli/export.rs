//! Export command implementation

use clap::Parser;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::Arc;

use super::CliError;
use crate::api::retry::{RetryPolicy, RETRY_PAUSE};
use crate::api::HttpSearchApi;
use crate::credentials::{CredentialProvider, OverrideCredentialProvider};
use crate::exporter::config::{DEFAULT_PAGE_SIZE, DEFAULT_QUERY, DEFAULT_TIME_ZONE};
use crate::exporter::{ExportSummary, Exporter};
use crate::output::GzipCompressor;
use crate::schedule::parse_date;

/// Sumo Export CLI
#[derive(Parser, Debug)]
#[command(name = "sumo-export")]
#[command(about = "Export log messages from a Sumo Logic search-job API to local JSON files", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Start date (YYYY-MM-DD, inclusive). Defaults to 30 days before stop.
    #[arg(long)]
    pub start: Option<String>,

    /// Stop date (YYYY-MM-DD, exclusive). Defaults to today.
    #[arg(long)]
    pub stop: Option<String>,

    /// Search query filter submitted with every job
    #[arg(long, default_value = DEFAULT_QUERY)]
    pub query: String,

    /// Base URL of the search-job API
    #[arg(long, default_value = "https://api.sumologic.com/api/v1")]
    pub base_url: String,

    /// Directory receiving one gzipped JSON file per exported day
    #[arg(long, default_value = "exports")]
    pub output_dir: PathBuf,

    /// Time zone name sent with every search job
    #[arg(long, default_value = DEFAULT_TIME_ZONE)]
    pub timezone: String,

    /// Messages fetched per pagination request
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Bound on retry attempts per request (default: retry forever)
    #[arg(long)]
    pub max_attempts: Option<NonZeroU32>,

    /// Account email for Basic authentication (falls back to SUMO_EXPORT_EMAIL)
    #[arg(long)]
    pub email: Option<String>,

    /// Account password for Basic authentication (falls back to SUMO_EXPORT_PASSWORD)
    #[arg(long)]
    pub password: Option<String>,
}

impl Cli {
    /// Run the export described by the parsed arguments.
    pub async fn execute(&self) -> Result<ExportSummary, CliError> {
        let credentials = self.credential_provider().credentials()?;
        let start = self.start.as_deref().map(parse_date).transpose()?;
        let stop = self.stop.as_deref().map(parse_date).transpose()?;

        let api = Arc::new(HttpSearchApi::new(&self.base_url, credentials)?);
        let policy = match self.max_attempts {
            Some(max) => RetryPolicy::bounded(RETRY_PAUSE, max),
            None => RetryPolicy::default(),
        };

        let exporter = Exporter::new(api, GzipCompressor, self.output_dir.clone())
            .with_query(self.query.clone())
            .with_time_zone(self.timezone.clone())
            .with_page_size(self.page_size)
            .with_retry_policy(policy);

        Ok(exporter.run(start, stop).await?)
    }

    /// The credential provider the pipeline is constructed with: flag values
    /// first, environment as the per-field fallback.
    fn credential_provider(&self) -> OverrideCredentialProvider {
        OverrideCredentialProvider::new(self.email.clone(), self.password.clone())
    }
}
