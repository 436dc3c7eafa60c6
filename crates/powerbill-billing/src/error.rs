use crate::domain::types::CustomerId;
use powerbill_common::ConfigurationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Customer not found: {id}")]
    CustomerNotFound { id: CustomerId },

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("Storage error during {operation}: {source}")]
    Storage {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid tariff: {0}")]
    InvalidTariff(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl BillingError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn malformed(line: u64, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    pub fn storage(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Storage {
            operation: operation.into(),
            source,
        }
    }

    /// True for errors caused by caller input rather than the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            BillingError::Validation { .. } | BillingError::CustomerNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BillingError>;
