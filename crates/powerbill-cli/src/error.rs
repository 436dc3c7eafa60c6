//! Error types for the powerbill CLI

use color_eyre::eyre::Report;
use powerbill_billing::BillingError;
use powerbill_common::ConfigurationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Failures reported by the billing core
    #[error(transparent)]
    Billing(BillingError),

    /// Configuration file or environment issues
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigurationError),

    /// Prompt could not be shown or read
    #[error("Interactive prompt failed: {0}")]
    Interactive(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Everything else (using color-eyre's Report for rich errors)
    #[error(transparent)]
    Internal(#[from] Report),
}

impl From<BillingError> for CliError {
    fn from(error: BillingError) -> Self {
        match error {
            BillingError::Configuration(e) => CliError::Config(e),
            other => CliError::Billing(other),
        }
    }
}

impl CliError {
    pub fn interactive(message: impl Into<String>) -> Self {
        CliError::Interactive(message.into())
    }

    /// Bad input or an unknown customer; the menu reports these and carries on.
    pub fn is_user_error(&self) -> bool {
        matches!(self, CliError::Billing(e) if e.is_user_error())
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(error: dialoguer::Error) -> Self {
        CliError::interactive(error.to_string())
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
