//! Tabular forecast: one market value row, one row per cashflow and a total
//! row, with a value column per scenario.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::period::{month_label, AnalysisPeriod};
use crate::scenarios::ScenarioResults;
use crate::types::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    MarketValue,
    Cashflow,
    Total,
}

impl std::fmt::Display for RowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowKind::MarketValue => write!(f, "Market Value"),
            RowKind::Cashflow => write!(f, "Cashflow"),
            RowKind::Total => write!(f, "Total"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub kind: RowKind,
    pub date: Option<NaiveDate>,
    pub month: Option<String>,
    pub amount: Option<Money>,
    /// One cell per scenario, in [`ForecastTable::scenarios`] order. `None`
    /// when the scenario was omitted.
    pub values: Vec<Option<Money>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastTable {
    pub scenarios: Vec<String>,
    pub rows: Vec<ForecastRow>,
}

impl ForecastTable {
    /// Lay out `results` with columns in the order of `scenarios`.
    pub fn build(
        beginning_mv: Money,
        period: &AnalysisPeriod,
        scenarios: &[String],
        results: &ScenarioResults,
    ) -> Self {
        let mut rows = vec![ForecastRow {
            kind: RowKind::MarketValue,
            date: Some(period.start_date),
            month: None,
            amount: Some(beginning_mv),
            values: column(scenarios, |name| results.get(name).map(|r| r.portfolio_future_value)),
        }];

        // Every result itemizes the same cashflows; take the layout from the first.
        let template = scenarios.iter().find_map(|name| results.get(name));
        if let Some(template) = template {
            for (idx, projection) in template.cashflow_projections.iter().enumerate() {
                rows.push(ForecastRow {
                    kind: RowKind::Cashflow,
                    date: Some(projection.date),
                    month: projection.month_index.map(month_label),
                    amount: Some(projection.amount),
                    values: column(scenarios, |name| {
                        results
                            .get(name)
                            .and_then(|r| r.cashflow_projections.get(idx))
                            .and_then(|p| p.future_value_for(name))
                    }),
                });
            }
        }

        rows.push(ForecastRow {
            kind: RowKind::Total,
            date: None,
            month: None,
            amount: None,
            values: column(scenarios, |name| results.get(name).map(|r| r.total_future_value)),
        });

        Self {
            scenarios: scenarios.to_vec(),
            rows,
        }
    }

    pub fn headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = ["Type", "Date", "Month", "Amount"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        headers.extend(self.scenarios.iter().map(|s| format!("{s} FV")));
        headers
    }

    /// Rows as display strings, money rounded to cents, blanks for gaps.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        let money = |v: Option<Money>| v.map(|m| m.round_dp(2).to_string()).unwrap_or_default();
        self.rows
            .iter()
            .map(|row| {
                let mut cells = vec![
                    row.kind.to_string(),
                    row.date.map(|d| d.to_string()).unwrap_or_default(),
                    row.month.clone().unwrap_or_default(),
                    money(row.amount),
                ];
                cells.extend(row.values.iter().map(|v| money(*v)));
                cells
            })
            .collect()
    }
}

fn column(scenarios: &[String], value: impl Fn(&str) -> Option<Money>) -> Vec<Option<Money>> {
    scenarios.iter().map(|name| value(name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::evaluate_all_scenarios;
    use crate::types::{CashflowRecord, ScenarioRate};
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_table_layout() {
        let period = AnalysisPeriod::new(d(2024, 1, 1), d(2024, 12, 31)).unwrap();
        let mut cf = CashflowRecord::new(d(2024, 4, 1), dec!(50000));
        cf.month_index = Some(4);
        let rates = vec![
            ScenarioRate::new("downside", dec!(-5)),
            ScenarioRate::new("base", dec!(7)),
        ];
        let results = evaluate_all_scenarios(dec!(1000000), &period, &rates, &[cf]).unwrap();
        let names: Vec<String> = vec!["base".into(), "downside".into()];
        let table = ForecastTable::build(dec!(1000000), &period, &names, &results);

        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0].kind, RowKind::MarketValue);
        assert_eq!(table.rows[1].month.as_deref(), Some("Month 4"));
        assert_eq!(table.rows[2].kind, RowKind::Total);
        assert_eq!(
            table.rows[2].values[0],
            Some(results["base"].total_future_value)
        );
        assert_eq!(
            table.rows[2].values[1],
            Some(results["downside"].total_future_value)
        );
        assert_eq!(table.headers()[4], "base FV");
    }

    #[test]
    fn test_missing_scenario_is_blank_not_zero() {
        let period = AnalysisPeriod::new(d(2024, 1, 1), d(2024, 12, 31)).unwrap();
        let rates = vec![
            ScenarioRate::new("base", dec!(7)),
            ScenarioRate::new("crash", dec!(-100)),
        ];
        let cfs = vec![CashflowRecord::new(d(2024, 6, 1), dec!(1000))];
        let results = evaluate_all_scenarios(dec!(5000), &period, &rates, &cfs).unwrap();
        let names: Vec<String> = vec!["base".into(), "crash".into()];
        let table = ForecastTable::build(dec!(5000), &period, &names, &results);

        for row in &table.rows {
            assert!(row.values[0].is_some());
            assert_eq!(row.values[1], None);
        }
        let display = table.display_rows();
        assert_eq!(display[2][0], "Total");
        assert_eq!(display[2][5], "");
    }
}
