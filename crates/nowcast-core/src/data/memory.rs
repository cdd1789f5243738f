use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::error::NowcastError;
use crate::NowcastResult;

use super::{MarketValues, PortfolioDataSource, RawCashflow};

/// One holding's market value on a date. Several rows per date are summed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingRow {
    pub date: NaiveDate,
    pub market_value: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupData {
    #[serde(default)]
    pub holdings: Vec<HoldingRow>,
    #[serde(default)]
    pub cashflows: Vec<RawCashflow>,
}

/// Holdings and cashflows held in memory, keyed by group code.
///
/// Loadable from JSON of the form
/// `{"groups": {"GRP01": {"holdings": [...], "cashflows": [...]}}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryDataSource {
    pub groups: HashMap<String, GroupData>,
}

impl InMemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> NowcastResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| NowcastError::DataUnavailable {
            group_code: "*".into(),
            reason: format!("failed to read '{}': {e}", path.display()),
        })?;
        let source: Self = serde_json::from_str(&contents)?;
        log::info!(
            "Loaded {} portfolio groups from {}",
            source.groups.len(),
            path.display()
        );
        Ok(source)
    }

    pub fn with_group(mut self, group_code: impl Into<String>, data: GroupData) -> Self {
        self.groups.insert(group_code.into(), data);
        self
    }

    fn group(&self, group_code: &str) -> NowcastResult<&GroupData> {
        self.groups
            .get(group_code)
            .ok_or_else(|| NowcastError::DataUnavailable {
                group_code: group_code.to_string(),
                reason: "unknown group code".into(),
            })
    }

    fn value_on(group: &GroupData, date: NaiveDate) -> Option<Decimal> {
        let mut rows = group.holdings.iter().filter(|h| h.date == date).peekable();
        rows.peek()?;
        Some(rows.map(|h| h.market_value).sum())
    }
}

impl PortfolioDataSource for InMemoryDataSource {
    fn market_values(
        &self,
        group_code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> NowcastResult<MarketValues> {
        let group = self.group(group_code)?;

        let beginning_mv =
            Self::value_on(group, start).ok_or_else(|| NowcastError::DataUnavailable {
                group_code: group_code.to_string(),
                reason: format!("no market value recorded on {start}"),
            })?;
        let ending_mv = Self::value_on(group, end);

        log::info!(
            "Retrieved market values for {group_code}: BMV={beginning_mv}, EMV={}",
            ending_mv.map_or_else(|| "n/a".to_string(), |v| v.to_string())
        );
        Ok(MarketValues {
            beginning_mv,
            ending_mv,
        })
    }

    fn cashflows(
        &self,
        group_code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> NowcastResult<Vec<RawCashflow>> {
        let group = self.group(group_code)?;

        let mut by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        for cf in group
            .cashflows
            .iter()
            .filter(|cf| cf.date >= start && cf.date <= end)
        {
            *by_date.entry(cf.date).or_insert(Decimal::ZERO) += cf.amount;
        }

        let rows: Vec<RawCashflow> = by_date
            .into_iter()
            .map(|(date, amount)| RawCashflow { date, amount })
            .collect();
        log::info!("Retrieved {} cashflows for {group_code}", rows.len());
        Ok(rows)
    }

    fn group_exists(&self, group_code: &str) -> bool {
        self.groups
            .get(group_code)
            .is_some_and(|g| !g.holdings.is_empty())
    }

    fn available_date_range(&self, group_code: &str) -> NowcastResult<(NaiveDate, NaiveDate)> {
        let group = self.group(group_code)?;
        let min = group.holdings.iter().map(|h| h.date).min();
        let max = group.holdings.iter().map(|h| h.date).max();
        match (min, max) {
            (Some(min), Some(max)) => Ok((min, max)),
            _ => Err(NowcastError::DataUnavailable {
                group_code: group_code.to_string(),
                reason: "no holdings recorded".into(),
            }),
        }
    }
}
