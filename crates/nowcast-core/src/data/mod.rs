//! Portfolio data retrieval.
//!
//! The engine never fetches anything itself. Hosts implement
//! [`PortfolioDataSource`] over their store and hand the typed results to the
//! forecast service.

mod memory;

pub use memory::{GroupData, HoldingRow, InMemoryDataSource};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::period::month_index;
use crate::types::{CashflowRecord, Money};
use crate::NowcastResult;

/// Beginning and ending market values for a period.
///
/// The ending value is informational; forecasts only consume `beginning_mv`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketValues {
    pub beginning_mv: Money,
    pub ending_mv: Option<Money>,
}

/// A cashflow as stored: date and (aggregated) amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawCashflow {
    pub date: NaiveDate,
    pub amount: Money,
}

pub trait PortfolioDataSource {
    /// Market values on `start` and `end` for a portfolio group.
    ///
    /// A missing beginning value is an error, never a silent zero.
    fn market_values(
        &self,
        group_code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> NowcastResult<MarketValues>;

    /// Cashflows dated within `[start, end]`, one per date, in date order.
    fn cashflows(
        &self,
        group_code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> NowcastResult<Vec<RawCashflow>>;

    fn group_exists(&self, group_code: &str) -> bool;

    /// Earliest and latest dates holding data exists for.
    fn available_date_range(&self, group_code: &str) -> NowcastResult<(NaiveDate, NaiveDate)>;
}

/// Convert stored rows to labelled records with a display month index.
pub fn to_cashflow_records(raw: &[RawCashflow], start: NaiveDate) -> Vec<CashflowRecord> {
    raw.iter()
        .map(|row| CashflowRecord {
            date: row.date,
            amount: row.amount,
            label: Some(format!("Cashflow on {}", row.date)),
            month_index: Some(month_index(start, row.date)),
        })
        .collect()
}
