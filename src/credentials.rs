//! Credential provider interface
//!
//! The exporter needs an email/password pair for Basic authentication before
//! it starts. How the pair is persisted is not this crate's concern: callers
//! hand in any [`CredentialProvider`], and the bundled implementation simply
//! reads environment variables.

/// Environment variable holding the account email.
pub const EMAIL_VAR: &str = "SUMO_EXPORT_EMAIL";

/// Environment variable holding the account password.
pub const PASSWORD_VAR: &str = "SUMO_EXPORT_PASSWORD";

/// Credential errors
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// A required credential was not supplied
    #[error("missing credential: set {0} or pass the matching flag")]
    Missing(&'static str),
}

/// Basic-Auth credential pair.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

/// Source of credentials, consulted once before an export starts.
pub trait CredentialProvider {
    /// Produce the credential pair, or explain what is missing.
    fn credentials(&self) -> Result<Credentials, CredentialError>;
}

impl CredentialProvider for Credentials {
    fn credentials(&self) -> Result<Credentials, CredentialError> {
        Ok(self.clone())
    }
}

/// Reads credentials from [`EMAIL_VAR`] and [`PASSWORD_VAR`].
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// The email from the environment, if set and non-empty.
    pub fn email() -> Option<String> {
        non_empty_var(EMAIL_VAR)
    }

    /// The password from the environment, if set and non-empty.
    pub fn password() -> Option<String> {
        non_empty_var(PASSWORD_VAR)
    }
}

impl CredentialProvider for EnvCredentialProvider {
    fn credentials(&self) -> Result<Credentials, CredentialError> {
        let email = non_empty_var(EMAIL_VAR).ok_or(CredentialError::Missing(EMAIL_VAR))?;
        let password = non_empty_var(PASSWORD_VAR).ok_or(CredentialError::Missing(PASSWORD_VAR))?;
        Ok(Credentials { email, password })
    }
}

/// Provider combining explicit values with the environment.
///
/// Explicit values win per field; the environment fills whatever is missing.
/// This is the provider the CLI hands to the pipeline, so `--email` can be
/// combined with a password from the environment and vice versa.
#[derive(Debug, Default)]
pub struct OverrideCredentialProvider {
    email: Option<String>,
    password: Option<String>,
}

impl OverrideCredentialProvider {
    /// Create a provider preferring the given values over the environment.
    pub fn new(email: Option<String>, password: Option<String>) -> Self {
        Self { email, password }
    }
}

impl CredentialProvider for OverrideCredentialProvider {
    fn credentials(&self) -> Result<Credentials, CredentialError> {
        let email = self
            .email
            .clone()
            .or_else(EnvCredentialProvider::email)
            .ok_or(CredentialError::Missing(EMAIL_VAR))?;
        let password = self
            .password
            .clone()
            .or_else(EnvCredentialProvider::password)
            .ok_or(CredentialError::Missing(PASSWORD_VAR))?;
        Ok(Credentials { email, password })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
