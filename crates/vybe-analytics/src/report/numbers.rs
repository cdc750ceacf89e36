//! Numeric and field rendering rules shared by every report.
//!
//! All rounding is two-decimal, half away from zero. Missing values render as
//! [`NA`].

use chrono::DateTime;
use rust_decimal::{Decimal, RoundingStrategy};

use super::markup::escape_html;

pub const NA: &str = "N/A";

const THOUSAND: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);
const MILLION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
const BILLION: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);
const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Fixed-point rendering with exactly `dp` decimals
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    format!("{:.*}", dp as usize, rounded)
}

/// Magnitude-scaled value: `1.50B`, `2.35M`, `1.20K`, `999.00`
pub fn format_value(value: Option<Decimal>) -> String {
    let Some(value) = value else {
        return NA.into();
    };

    let magnitude = value.abs();
    let (divisor, suffix) = if magnitude >= BILLION {
        (BILLION, "B")
    } else if magnitude >= MILLION {
        (MILLION, "M")
    } else if magnitude >= THOUSAND {
        (THOUSAND, "K")
    } else {
        (Decimal::ONE, "")
    };

    match value.checked_div(divisor) {
        Some(scaled) => format!("{}{}", format_fixed(scaled, 2), suffix),
        None => NA.into(),
    }
}

/// Currency with exactly two decimals: `$12.30`
pub fn format_usd(value: Option<Decimal>) -> String {
    value.map_or_else(|| NA.into(), |v| format!("${}", format_fixed(v, 2)))
}

/// Currency with magnitude scaling: `$1.50B`
pub fn format_usd_scaled(value: Option<Decimal>) -> String {
    value.map_or_else(|| NA.into(), |v| format!("${}", format_value(Some(v))))
}

/// A ratio rendered as a percentage: `0.4567` -> `45.67%`
pub fn format_ratio(ratio: Option<Decimal>) -> String {
    ratio
        .and_then(|r| r.checked_mul(HUNDRED))
        .map_or_else(|| NA.into(), |pct| format!("{}%", format_fixed(pct, 2)))
}

/// A value that already is a percentage: `2.5` -> `2.50%`
pub fn format_percent(pct: Option<Decimal>) -> String {
    pct.map_or_else(|| NA.into(), |p| format!("{}%", format_fixed(p, 2)))
}

/// `part / total * 100`; a zero or missing denominator is `None`
pub fn share_of(part: Option<Decimal>, total: Option<Decimal>) -> Option<Decimal> {
    let total = total.filter(|t| !t.is_zero())?;
    part?.checked_div(total)?.checked_mul(HUNDRED)
}

pub fn format_count(count: Option<u64>) -> String {
    count.map_or_else(|| NA.into(), |c| c.to_string())
}

/// Escaped text, `N/A` when missing or blank
pub fn format_text(text: Option<&str>) -> String {
    match text.map(str::trim) {
        Some(t) if !t.is_empty() => escape_html(t),
        _ => NA.into(),
    }
}

/// Checkmark/cross pair; a missing flag counts as unverified
pub fn format_verified(verified: Option<bool>) -> &'static str {
    if verified.unwrap_or(false) {
        "✅ Yes"
    } else {
        "❌ No"
    }
}

/// Unix seconds as a UTC date-time
pub fn format_timestamp(secs: Option<i64>) -> String {
    secs.and_then(|s| DateTime::from_timestamp(s, 0))
        .map_or_else(|| NA.into(), |t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

/// Short date label for chart axes
pub fn format_date_label(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map_or_else(|| secs.to_string(), |t| t.format("%b %d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_value_tiers() {
        assert_eq!(format_value(Some(dec!(1500000000))), "1.50B");
        assert_eq!(format_value(Some(dec!(2345678))), "2.35M");
        assert_eq!(format_value(Some(dec!(1200))), "1.20K");
        assert_eq!(format_value(Some(dec!(999))), "999.00");
        assert_eq!(format_value(Some(dec!(0.005))), "0.01");
        assert_eq!(format_value(None), "N/A");
    }

    #[test]
    fn test_format_value_negative_uses_magnitude() {
        assert_eq!(format_value(Some(dec!(-2500000))), "-2.50M");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(Some(dec!(12.3))), "$12.30");
        assert_eq!(format_usd(Some(dec!(-0.004))), "$0.00");
        assert_eq!(format_usd(None), "N/A");
        assert_eq!(format_usd_scaled(Some(dec!(4200000))), "$4.20M");
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(Some(dec!(0.4567))), "45.67%");
        assert_eq!(format_ratio(Some(dec!(0))), "0.00%");
        assert_eq!(format_ratio(None), "N/A");
    }

    #[test]
    fn test_share_of() {
        assert_eq!(share_of(Some(dec!(25)), Some(dec!(200))), Some(dec!(12.5)));
        assert_eq!(share_of(Some(dec!(25)), Some(dec!(0))), None);
        assert_eq!(share_of(None, Some(dec!(10))), None);
        assert_eq!(format_percent(share_of(Some(dec!(1)), Some(dec!(3)))), "33.33%");
    }

    #[test]
    fn test_text_and_flags() {
        assert_eq!(format_text(Some("  ")), "N/A");
        assert_eq!(format_text(Some("A&B")), "A&amp;B");
        assert_eq!(format_text(None), "N/A");
        assert_eq!(format_verified(Some(true)), "✅ Yes");
        assert_eq!(format_verified(None), "❌ No");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(Some(1_700_000_000)), "2023-11-14 22:13:20 UTC");
        assert_eq!(format_timestamp(None), "N/A");
        assert_eq!(format_date_label(1_700_000_000), "Nov 14");
    }
}
