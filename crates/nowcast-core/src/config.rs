//! Validation limits and scenario defaults.
//!
//! Every field has a default, so a settings file only needs to name what it
//! overrides.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::NowcastError;
use crate::types::{Money, Rate};
use crate::NowcastResult;

/// Inclusive numeric range used by the input checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd> Bounds<T> {
    pub fn contains(&self, value: &T) -> bool {
        value >= &self.min && value <= &self.max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    pub beginning_mv: Bounds<Money>,
    pub rates: Bounds<Rate>,
    pub cashflow_amount: Bounds<Money>,
    pub max_cashflows: usize,
    pub max_group_code_len: usize,
    pub max_description_len: usize,
    /// How far before the as-of date a period may start.
    pub max_lookback_days: i64,
    /// How far after the as-of date a period may end.
    pub max_lookahead_days: i64,
    /// Scenario names in display order, lowest rate first.
    pub scenario_names: Vec<String>,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            beginning_mv: Bounds {
                min: dec!(1000),
                max: dec!(1000000000),
            },
            rates: Bounds {
                min: dec!(-50),
                max: dec!(100),
            },
            cashflow_amount: Bounds {
                min: dec!(-1000000000),
                max: dec!(1000000000),
            },
            max_cashflows: 10,
            max_group_code_len: 50,
            max_description_len: 100,
            max_lookback_days: 365 * 10,
            max_lookahead_days: 365 * 2,
            scenario_names: vec!["downside".into(), "base".into(), "upside".into()],
        }
    }
}

impl ForecastSettings {
    /// Load settings from a JSON file; absent fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> NowcastResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| NowcastError::InvalidInput {
            field: "settings".into(),
            reason: format!("failed to read '{}': {e}", path.display()),
        })?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> NowcastResult<Self> {
        let settings: Self = serde_json::from_str(contents)?;
        settings.check()?;
        Ok(settings)
    }

    fn check(&self) -> NowcastResult<()> {
        if self.scenario_names.is_empty() {
            return Err(NowcastError::InvalidInput {
                field: "scenario_names".into(),
                reason: "at least one scenario name is required".into(),
            });
        }
        if self.rates.min > self.rates.max || self.beginning_mv.min > self.beginning_mv.max {
            return Err(NowcastError::InvalidInput {
                field: "bounds".into(),
                reason: "min must not exceed max".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let settings = ForecastSettings::from_json_str(r#"{"max_cashflows": 25}"#).unwrap();
        assert_eq!(settings.max_cashflows, 25);
        assert_eq!(settings.rates.min, dec!(-50));
        assert_eq!(settings.scenario_names, vec!["downside", "base", "upside"]);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let json = r#"{"rates": {"min": "10", "max": "5"}}"#;
        assert!(ForecastSettings::from_json_str(json).is_err());
    }

    #[test]
    fn test_bounds_inclusive() {
        let b = Bounds {
            min: dec!(-50),
            max: dec!(100),
        };
        assert!(b.contains(&dec!(-50)));
        assert!(b.contains(&dec!(100)));
        assert!(!b.contains(&dec!(100.01)));
    }
}
