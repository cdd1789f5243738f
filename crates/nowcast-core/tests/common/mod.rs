#![allow(dead_code)]

use chrono::NaiveDate;
use nowcast_core::data::{GroupData, HoldingRow, InMemoryDataSource, RawCashflow};
use nowcast_core::types::{CashflowRecord, Money, ScenarioRate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn assert_close(actual: Money, expected: Money, tolerance: Money, what: &str) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{what}: expected ~{expected}, got {actual}"
    );
}

pub fn standard_rates() -> Vec<ScenarioRate> {
    vec![
        ScenarioRate::new("downside", dec!(-5)),
        ScenarioRate::new("base", dec!(7)),
        ScenarioRate::new("upside", dec!(15)),
    ]
}

/// Contribution, fee and top-up spread over the first year after `start`.
pub fn demo_cashflows(start: NaiveDate) -> Vec<CashflowRecord> {
    vec![
        CashflowRecord::new(start + chrono::Duration::days(90), dec!(50000))
            .with_label("Quarterly contribution"),
        CashflowRecord::new(start + chrono::Duration::days(180), dec!(-2500))
            .with_label("Management fee"),
        CashflowRecord::new(start + chrono::Duration::days(270), dec!(25000))
            .with_label("Additional investment"),
    ]
}

/// GRP01: 1,000,000 on 2024-01-01 split over two holdings, flows in Feb and Mar.
pub fn demo_source() -> InMemoryDataSource {
    InMemoryDataSource::new().with_group(
        "GRP01",
        GroupData {
            holdings: vec![
                HoldingRow {
                    date: d(2024, 1, 1),
                    market_value: dec!(750000),
                },
                HoldingRow {
                    date: d(2024, 1, 1),
                    market_value: dec!(250000),
                },
                HoldingRow {
                    date: d(2024, 12, 31),
                    market_value: dec!(1081000),
                },
            ],
            cashflows: vec![
                RawCashflow {
                    date: d(2024, 2, 1),
                    amount: dec!(5000),
                },
                RawCashflow {
                    date: d(2024, 3, 1),
                    amount: dec!(20000),
                },
                RawCashflow {
                    date: d(2024, 3, 1),
                    amount: dec!(-1500),
                },
            ],
        },
    )
}

pub fn sum(values: impl Iterator<Item = Money>) -> Money {
    values.fold(Decimal::ZERO, |acc, v| acc + v)
}
