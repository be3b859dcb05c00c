use thiserror::Error;

/// Error type that captures common accounting failures.
///
/// Missing records on update/delete are not represented here: those
/// operations report `Ok(None)` or `false` instead, since a lookup that
/// sometimes misses is an expected outcome rather than a failure.
#[derive(Debug, Error)]
pub enum AccountingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Tax rates not found for country `{0}`")]
    UnknownCountry(String),
    #[error("Unknown currency code `{0}`")]
    UnknownCurrency(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, AccountingError>;
