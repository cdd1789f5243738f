//! Input checks run before the engine. Each check collects every problem it
//! finds and reports them together as [`NowcastError::Validation`].

use chrono::{Duration, NaiveDate};

use crate::config::ForecastSettings;
use crate::error::NowcastError;
use crate::period::AnalysisPeriod;
use crate::types::{CashflowRecord, Money, ScenarioRate};
use crate::NowcastResult;

fn finish(errors: Vec<String>, what: &str) -> NowcastResult<()> {
    if errors.is_empty() {
        return Ok(());
    }
    log::warn!("{what} validation failed: {errors:?}");
    Err(NowcastError::Validation(errors))
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn check_group_code(group_code: Option<&str>, settings: &ForecastSettings, errors: &mut Vec<String>) {
    match group_code.map(str::trim) {
        None | Some("") => errors.push("Group code is required".into()),
        Some(code) if code.chars().count() > settings.max_group_code_len => errors.push(format!(
            "Group code must be {} characters or less",
            settings.max_group_code_len
        )),
        Some(_) => {}
    }
}

/// Group code and analysis window, relative to `as_of` (normally today).
pub fn validate_date_inputs(
    group_code: Option<&str>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    as_of: NaiveDate,
    settings: &ForecastSettings,
) -> NowcastResult<()> {
    let mut errors = Vec::new();
    check_group_code(group_code, settings, &mut errors);

    if start_date.is_none() {
        errors.push("Start date is required".into());
    }
    if end_date.is_none() {
        errors.push("End date is required".into());
    }

    if let (Some(start), Some(end)) = (start_date, end_date) {
        if start >= end {
            errors.push("Start date must be before end date".into());
        }

        let earliest = as_of - Duration::days(settings.max_lookback_days);
        let latest = as_of + Duration::days(settings.max_lookahead_days);
        if start < earliest {
            errors.push(format!(
                "Start date cannot be more than {} days before {as_of}",
                settings.max_lookback_days
            ));
        }
        if end > latest {
            errors.push(format!(
                "End date cannot be more than {} days after {as_of}",
                settings.max_lookahead_days
            ));
        }
    }

    finish(errors, "Date input")
}

/// Exactly the configured scenarios, each in range and strictly ordered
/// (downside < base < upside with the default names).
pub fn validate_scenario_inputs(
    rates: &[ScenarioRate],
    settings: &ForecastSettings,
) -> NowcastResult<()> {
    let mut errors = Vec::new();
    let mut in_range = Vec::new();

    for name in &settings.scenario_names {
        match rates.iter().find(|r| &r.name == name) {
            None => errors.push(format!("{} scenario rate is required", capitalize(name))),
            Some(r) if r.annual_rate_percent < settings.rates.min => errors.push(format!(
                "{} rate must be at least {}%",
                capitalize(name),
                settings.rates.min
            )),
            Some(r) if r.annual_rate_percent > settings.rates.max => errors.push(format!(
                "{} rate must be no more than {}%",
                capitalize(name),
                settings.rates.max
            )),
            Some(r) => in_range.push(r),
        }
    }

    for r in rates {
        if !settings.scenario_names.contains(&r.name) {
            errors.push(format!("Unknown scenario '{}'", r.name));
        }
    }

    if in_range.len() == settings.scenario_names.len() {
        for (i, lower) in in_range.iter().enumerate() {
            for higher in &in_range[i + 1..] {
                if lower.annual_rate_percent >= higher.annual_rate_percent {
                    errors.push(format!(
                        "{} rate should be lower than {} rate",
                        capitalize(&lower.name),
                        higher.name
                    ));
                }
            }
        }
    }

    finish(errors, "Scenario input")
}

/// Group code and a caller-supplied beginning market value.
pub fn validate_portfolio_inputs(
    group_code: Option<&str>,
    beginning_mv: Option<Money>,
    settings: &ForecastSettings,
) -> NowcastResult<()> {
    let mut errors = Vec::new();
    check_group_code(group_code, settings, &mut errors);

    match beginning_mv {
        None => errors.push("Beginning market value is required".into()),
        Some(mv) if mv < settings.beginning_mv.min => errors.push(format!(
            "Beginning market value must be at least ${}",
            settings.beginning_mv.min
        )),
        Some(mv) if mv > settings.beginning_mv.max => errors.push(format!(
            "Beginning market value must be less than ${}",
            settings.beginning_mv.max
        )),
        Some(_) => {}
    }

    finish(errors, "Portfolio input")
}

/// A single manually entered cashflow.
pub fn validate_cashflow_inputs(
    record: &CashflowRecord,
    settings: &ForecastSettings,
) -> NowcastResult<()> {
    let mut errors = Vec::new();

    if !settings.cashflow_amount.contains(&record.amount) {
        errors.push(format!(
            "Cashflow amount must be between ${} and ${}",
            settings.cashflow_amount.min, settings.cashflow_amount.max
        ));
    }
    if let Some(label) = &record.label {
        if label.chars().count() > settings.max_description_len {
            errors.push(format!(
                "Cashflow description must be {} characters or less",
                settings.max_description_len
            ));
        }
    }

    finish(errors, "Cashflow input")
}

/// Manually entered cashflows against the period: count limit and no flows
/// before the start.
pub fn validate_data_consistency(
    period: &AnalysisPeriod,
    cashflows: &[CashflowRecord],
    settings: &ForecastSettings,
) -> NowcastResult<()> {
    let mut errors = Vec::new();
    if cashflows.len() > settings.max_cashflows {
        errors.push(format!("Maximum {} cashflows allowed", settings.max_cashflows));
    }
    errors.extend(early_cashflows(period, cashflows));
    finish(errors, "Data consistency")
}

/// Stored cashflows against the period. The count limit applies to manual
/// entry only.
pub fn validate_cashflow_dates(
    period: &AnalysisPeriod,
    cashflows: &[CashflowRecord],
) -> NowcastResult<()> {
    finish(early_cashflows(period, cashflows), "Cashflow date")
}

fn early_cashflows(period: &AnalysisPeriod, cashflows: &[CashflowRecord]) -> Vec<String> {
    cashflows
        .iter()
        .enumerate()
        .filter(|(_, cf)| cf.date < period.start_date)
        .map(|(i, cf)| {
            format!(
                "Cashflow #{} on {} precedes the analysis period start {}",
                i + 1,
                cf.date,
                period.start_date
            )
        })
        .collect()
}

/// Flows dated after the horizon are valued at face amount; surface them.
pub fn horizon_warnings(period: &AnalysisPeriod, cashflows: &[CashflowRecord]) -> Vec<String> {
    cashflows
        .iter()
        .enumerate()
        .filter(|(_, cf)| cf.date > period.end_date && !cf.is_zero())
        .map(|(i, cf)| {
            format!(
                "Cashflow #{} on {} falls after the forecast end {} and is not grown",
                i + 1,
                cf.date,
                period.end_date
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn three(down: Money, base: Money, up: Money) -> Vec<ScenarioRate> {
        vec![
            ScenarioRate::new("downside", down),
            ScenarioRate::new("base", base),
            ScenarioRate::new("upside", up),
        ]
    }

    #[test]
    fn test_valid_dates() {
        let s = ForecastSettings::default();
        assert!(validate_date_inputs(
            Some("GRP01"),
            Some(d(2024, 1, 1)),
            Some(d(2025, 1, 1)),
            d(2025, 6, 1),
            &s
        )
        .is_ok());
    }

    #[test]
    fn test_date_errors_are_collected() {
        let s = ForecastSettings::default();
        let err = validate_date_inputs(Some("  "), Some(d(2025, 1, 1)), Some(d(2024, 1, 1)), d(2025, 6, 1), &s)
            .unwrap_err();
        let messages = err.messages();
        assert!(messages.contains(&"Group code is required".to_string()));
        assert!(messages.contains(&"Start date must be before end date".to_string()));
    }

    #[test]
    fn test_dates_outside_window() {
        let s = ForecastSettings::default();
        let err = validate_date_inputs(Some("G"), Some(d(2000, 1, 1)), Some(d(2030, 1, 1)), d(2025, 1, 1), &s)
            .unwrap_err();
        assert_eq!(err.messages().len(), 2);
    }

    #[test]
    fn test_missing_dates() {
        let s = ForecastSettings::default();
        let err = validate_date_inputs(Some("G"), None, None, d(2025, 1, 1), &s).unwrap_err();
        assert_eq!(
            err.messages(),
            vec!["Start date is required".to_string(), "End date is required".to_string()]
        );
    }

    #[test]
    fn test_scenario_ordering() {
        let s = ForecastSettings::default();
        assert!(validate_scenario_inputs(&three(dec!(-5), dec!(7), dec!(15)), &s).is_ok());

        let err = validate_scenario_inputs(&three(dec!(7), dec!(7), dec!(15)), &s).unwrap_err();
        assert_eq!(
            err.messages(),
            vec!["Downside rate should be lower than base rate".to_string()]
        );
    }

    #[test]
    fn test_scenario_range_and_missing() {
        let s = ForecastSettings::default();
        let rates = vec![
            ScenarioRate::new("downside", dec!(-60)),
            ScenarioRate::new("base", dec!(7)),
        ];
        let messages = validate_scenario_inputs(&rates, &s).unwrap_err().messages();
        assert!(messages.contains(&"Downside rate must be at least -50%".to_string()));
        assert!(messages.contains(&"Upside scenario rate is required".to_string()));
    }

    #[test]
    fn test_portfolio_inputs() {
        let s = ForecastSettings::default();
        assert!(validate_portfolio_inputs(Some("G"), Some(dec!(250000)), &s).is_ok());
        assert!(validate_portfolio_inputs(Some("G"), Some(dec!(10)), &s).is_err());
        assert!(validate_portfolio_inputs(Some("G"), None, &s).is_err());
    }

    #[test]
    fn test_cashflow_inputs() {
        let s = ForecastSettings::default();
        let ok = CashflowRecord::new(d(2024, 5, 1), dec!(-2500)).with_label("Management fee");
        assert!(validate_cashflow_inputs(&ok, &s).is_ok());

        let long = CashflowRecord::new(d(2024, 5, 1), dec!(10)).with_label("x".repeat(101));
        assert!(validate_cashflow_inputs(&long, &s).is_err());
    }

    #[test]
    fn test_data_consistency() {
        let s = ForecastSettings::default();
        let period = AnalysisPeriod::new(d(2024, 1, 1), d(2025, 1, 1)).unwrap();

        let too_many: Vec<_> = (1..=11u32)
            .map(|m| CashflowRecord::new(d(2024, m, 1), dec!(100)))
            .collect();
        assert!(validate_data_consistency(&period, &too_many, &s).is_err());

        let early = vec![CashflowRecord::new(d(2023, 12, 31), dec!(100))];
        assert!(validate_data_consistency(&period, &early, &s).is_err());

        assert!(validate_cashflow_dates(&period, &too_many).is_ok());
        assert!(validate_cashflow_dates(&period, &early).is_err());

        let late = vec![CashflowRecord::new(d(2025, 2, 1), dec!(100))];
        assert!(validate_data_consistency(&period, &late, &s).is_ok());
        assert_eq!(horizon_warnings(&period, &late).len(), 1);
    }
}
