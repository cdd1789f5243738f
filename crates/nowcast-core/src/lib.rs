pub mod config;
pub mod error;
pub mod period;
pub mod scenarios;
pub mod time_value;
pub mod types;
pub mod validation;

#[cfg(feature = "data")]
pub mod data;

#[cfg(feature = "report")]
pub mod report;

#[cfg(all(feature = "data", feature = "report"))]
pub mod forecast;

pub use config::ForecastSettings;
pub use error::NowcastError;
pub use period::AnalysisPeriod;
pub use types::*;

/// Standard result type for all nowcast operations
pub type NowcastResult<T> = Result<T, NowcastError>;
