use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NowcastError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Invalid period: start date {start} must be before end date {end}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },

    #[error("Domain error in {context}: annual rate {rate_percent}% leaves no positive growth base")]
    DomainError { context: String, rate_percent: Decimal },

    #[error("Numeric overflow in {context}")]
    Overflow { context: String },

    #[error("Data unavailable for group '{group_code}': {reason}")]
    DataUnavailable { group_code: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl NowcastError {
    /// Messages suitable for listing back to the user.
    pub fn messages(&self) -> Vec<String> {
        match self {
            NowcastError::Validation(errors) => errors.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl From<serde_json::Error> for NowcastError {
    fn from(e: serde_json::Error) -> Self {
        NowcastError::SerializationError(e.to_string())
    }
}
