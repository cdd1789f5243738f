use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::period::AnalysisPeriod;
use crate::time_value::future_value_to_horizon;
use crate::types::{CashflowRecord, Money, ScenarioRate};
use crate::NowcastResult;

/// One cashflow carried to the horizon under every scenario.
///
/// Built once per request so that every scenario card and the forecast table
/// read from the same itemization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowProjection {
    pub date: NaiveDate,
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_index: Option<u32>,
    pub future_value_per_scenario: BTreeMap<String, Money>,
}

impl CashflowProjection {
    pub fn from_record(record: &CashflowRecord) -> Self {
        Self {
            date: record.date,
            amount: record.amount,
            label: record.label.clone(),
            month_index: record.month_index,
            future_value_per_scenario: BTreeMap::new(),
        }
    }

    pub fn future_value_for(&self, scenario_name: &str) -> Option<Money> {
        self.future_value_per_scenario.get(scenario_name).copied()
    }

    /// Whether this projection was built from `record`.
    pub fn matches(&self, record: &CashflowRecord) -> bool {
        self.date == record.date && self.amount == record.amount
    }
}

/// Non-zero cashflows in their original order.
pub fn active_cashflows(cashflows: &[CashflowRecord]) -> Vec<&CashflowRecord> {
    cashflows.iter().filter(|cf| !cf.is_zero()).collect()
}

/// Horizon value of each active cashflow under one scenario, in order.
pub fn scenario_values(
    active: &[&CashflowRecord],
    horizon: NaiveDate,
    scenario: &ScenarioRate,
) -> NowcastResult<Vec<Money>> {
    active
        .iter()
        .map(|cf| -> NowcastResult<Money> {
            let fv =
                future_value_to_horizon(cf.amount, scenario.annual_rate_percent, cf.date, horizon)?;
            log::debug!(
                "Cashflow FV [{}]: date={}, amount={}, fv={}",
                scenario.name,
                cf.date,
                cf.amount,
                fv
            );
            Ok(fv)
        })
        .collect()
}

/// Itemize every non-zero cashflow under every scenario.
///
/// Fails on the first scenario that cannot be valued; the orchestrator filters
/// out-of-domain scenarios before calling this.
pub fn build_projections(
    cashflows: &[CashflowRecord],
    period: &AnalysisPeriod,
    scenarios: &[ScenarioRate],
) -> NowcastResult<Vec<CashflowProjection>> {
    period.validate()?;

    let active = active_cashflows(cashflows);
    let mut projections: Vec<CashflowProjection> = active
        .iter()
        .map(|cf| CashflowProjection::from_record(cf))
        .collect();

    for scenario in scenarios {
        let values = scenario_values(&active, period.end_date, scenario)?;
        for (projection, value) in projections.iter_mut().zip(values) {
            projection
                .future_value_per_scenario
                .insert(scenario.name.clone(), value);
        }
    }

    Ok(projections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_zero_amounts_are_not_itemized() {
        let period = AnalysisPeriod::new(d(2024, 1, 1), d(2025, 1, 1)).unwrap();
        let flows = vec![
            CashflowRecord::new(d(2024, 2, 1), dec!(1000)),
            CashflowRecord::new(d(2024, 3, 1), dec!(0)),
            CashflowRecord::new(d(2024, 4, 1), dec!(-250)),
        ];
        let projections =
            build_projections(&flows, &period, &[ScenarioRate::new("base", dec!(7))]).unwrap();

        assert_eq!(projections.len(), 2);
        assert_eq!(projections[0].amount, dec!(1000));
        assert_eq!(projections[1].amount, dec!(-250));
    }

    #[test]
    fn test_every_scenario_keyed() {
        let period = AnalysisPeriod::new(d(2024, 1, 1), d(2025, 1, 1)).unwrap();
        let flows = vec![CashflowRecord::new(d(2024, 6, 1), dec!(1000))];
        let scenarios = vec![
            ScenarioRate::new("downside", dec!(-5)),
            ScenarioRate::new("base", dec!(7)),
            ScenarioRate::new("upside", dec!(15)),
        ];
        let projections = build_projections(&flows, &period, &scenarios).unwrap();
        let p = &projections[0];

        let down = p.future_value_for("downside").unwrap();
        let base = p.future_value_for("base").unwrap();
        let up = p.future_value_for("upside").unwrap();
        assert!(down < dec!(1000) && dec!(1000) < base && base < up);
        assert!(p.future_value_for("missing").is_none());
    }

    #[test]
    fn test_flow_on_horizon_is_not_grown() {
        let period = AnalysisPeriod::new(d(2024, 1, 1), d(2025, 1, 1)).unwrap();
        let flows = vec![CashflowRecord::new(d(2025, 1, 1), dec!(1000))];
        let projections =
            build_projections(&flows, &period, &[ScenarioRate::new("upside", dec!(15))]).unwrap();
        assert_eq!(projections[0].future_value_for("upside"), Some(dec!(1000)));
    }
}
