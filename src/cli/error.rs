//! CLI error types and conversions

use crate::api::ApiError;
use crate::credentials::CredentialError;
use crate::exporter::ExportError;
use crate::schedule::InputValidationError;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Invalid date argument
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InputValidationError),

    /// Missing or unusable credentials
    #[error("credential error: {0}")]
    Credentials(#[from] CredentialError),

    /// HTTP client construction failed
    #[error("API client error: {0}")]
    Api(#[from] ApiError),

    /// The export itself failed
    #[error("export error: {0}")]
    Export(#[from] ExportError),
}
