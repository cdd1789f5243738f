use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual growth rates expressed as percentages (7.0 = 7% per annum).
pub type Rate = Decimal;

/// A single dated cashflow. Positive amounts are contributions, negative are
/// fees or withdrawals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowRecord {
    pub date: NaiveDate,
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Calendar month of the flow relative to the period start. Display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_index: Option<u32>,
}

impl CashflowRecord {
    pub fn new(date: NaiveDate, amount: Money) -> Self {
        Self {
            date,
            amount,
            label: None,
            month_index: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Zero-amount flows are no-ops for valuation.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

/// A named annual growth assumption, e.g. `downside` at -5%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRate {
    pub name: String,
    pub annual_rate_percent: Rate,
}

impl ScenarioRate {
    pub fn new(name: impl Into<String>, annual_rate_percent: Rate) -> Self {
        Self {
            name: name.into(),
            annual_rate_percent,
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
