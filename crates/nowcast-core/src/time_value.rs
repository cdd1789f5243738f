use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::NowcastError;
use crate::types::{Money, Rate};
use crate::NowcastResult;

/// Fixed day-count year. Leap days are not special-cased.
pub const DAYS_PER_YEAR: Decimal = dec!(365);

const ONE_HUNDRED: Decimal = dec!(100);

/// Whole days from `from` to `to`. Negative when `to` precedes `from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Fraction of a 365-day year covered by `elapsed_days`.
pub fn year_fraction(elapsed_days: i64) -> Decimal {
    Decimal::from(elapsed_days) / DAYS_PER_YEAR
}

/// Annual growth base `1 + rate/100`, rejected when it is not positive.
pub fn growth_base(annual_rate_percent: Rate) -> NowcastResult<Decimal> {
    let base = Decimal::ONE + annual_rate_percent / ONE_HUNDRED;
    if base <= Decimal::ZERO {
        return Err(NowcastError::DomainError {
            context: "compounding".into(),
            rate_percent: annual_rate_percent,
        });
    }
    Ok(base)
}

/// Future value under annual compounding with an exact day-count exponent:
///
/// `fv = pv * (1 + rate/100) ^ (elapsed_days / 365)`
///
/// A zero rate or zero elapsed days returns `present_value` unchanged. Rates at
/// or below -100% have no real-valued fractional power and fail with
/// [`NowcastError::DomainError`]. Results beyond the Decimal range fail with
/// [`NowcastError::Overflow`].
///
/// Whole-month compounding (`(1 + rate/1200) ^ months`) was used by earlier
/// versions of the tool and is superseded by this day-count form.
pub fn future_value(
    present_value: Money,
    annual_rate_percent: Rate,
    elapsed_days: i64,
) -> NowcastResult<Money> {
    if annual_rate_percent.is_zero() || elapsed_days == 0 {
        return Ok(present_value);
    }

    let base = growth_base(annual_rate_percent)?;
    let years = year_fraction(elapsed_days);

    let factor = base
        .checked_powd(years)
        .ok_or_else(|| NowcastError::Overflow {
            context: format!("growth factor at {annual_rate_percent}% over {elapsed_days} days"),
        })?;

    present_value
        .checked_mul(factor)
        .ok_or_else(|| NowcastError::Overflow {
            context: format!("future value of {present_value}"),
        })
}

/// Future value of `amount` carried from `from` to `horizon`.
///
/// Amounts landing on or after the horizon are not grown.
pub fn future_value_to_horizon(
    amount: Money,
    annual_rate_percent: Rate,
    from: NaiveDate,
    horizon: NaiveDate,
) -> NowcastResult<Money> {
    if from >= horizon {
        return Ok(amount);
    }
    future_value(amount, annual_rate_percent, days_between(from, horizon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_zero_rate_returns_present_value() {
        for days in [0, 1, 365, 3650, -30] {
            assert_eq!(future_value(dec!(1234.56), dec!(0), days).unwrap(), dec!(1234.56));
        }
    }

    #[test]
    fn test_zero_days_returns_present_value() {
        for rate in [dec!(-50), dec!(3.5), dec!(7), dec!(100)] {
            assert_eq!(future_value(dec!(1000), rate, 0).unwrap(), dec!(1000));
        }
    }

    #[test]
    fn test_one_full_year() {
        let fv = future_value(dec!(1000), dec!(10), 365).unwrap();
        assert!((fv - dec!(1100)).abs() < dec!(0.0001), "got {fv}");
    }

    #[test]
    fn test_leap_year_exceeds_one_rate_period() {
        // 366 days is slightly more than one 365-day year
        let fv = future_value(dec!(1000000), dec!(7), 366).unwrap();
        assert!(fv > dec!(1070000));
        assert!((fv - dec!(1070198.36)).abs() < dec!(1), "got {fv}");
    }

    #[test]
    fn test_negative_growth() {
        let fv = future_value(dec!(1000), dec!(-5), 365).unwrap();
        assert!((fv - dec!(950)).abs() < dec!(0.0001), "got {fv}");
    }

    #[test]
    fn test_rate_at_or_below_minus_hundred_rejected() {
        assert!(matches!(
            future_value(dec!(1000), dec!(-100), 30),
            Err(NowcastError::DomainError { .. })
        ));
        assert!(matches!(
            future_value(dec!(1000), dec!(-150), 30),
            Err(NowcastError::DomainError { .. })
        ));
    }

    #[test]
    fn test_overflow_is_not_a_domain_error() {
        let err = future_value(Decimal::MAX, dec!(7), 3650).unwrap_err();
        assert!(matches!(err, NowcastError::Overflow { .. }), "got {err}");
        assert!(err.to_string().contains("future value of"));
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(d(2024, 4, 1), d(2025, 1, 1)), 275);
        assert_eq!(days_between(d(2024, 1, 1), d(2025, 1, 1)), 366);
        assert_eq!(days_between(d(2025, 1, 1), d(2024, 12, 31)), -1);
    }

    #[test]
    fn test_horizon_clamp() {
        let end = d(2025, 1, 1);
        assert_eq!(
            future_value_to_horizon(dec!(500), dec!(15), end, end).unwrap(),
            dec!(500)
        );
        assert_eq!(
            future_value_to_horizon(dec!(-500), dec!(15), d(2025, 3, 1), end).unwrap(),
            dec!(-500)
        );
    }
}
