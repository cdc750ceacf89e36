//! Trend Analyzer
//!
//! Period-over-period deltas between the first and last point of an OHLCV
//! series.

use rust_decimal::Decimal;

use crate::model::OhlcvPoint;
use crate::report::numbers::{format_fixed, NA};

/// Most recent points plotted and analysed per `/pricechart`
pub const MAX_CHART_POINTS: usize = 120;

const DEFAULT_PRECISION: u32 = 2;
const ESCALATED_PRECISION: u32 = 8;
const TINY_CHANGE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrendSummary {
    pub price_change_pct: Option<Decimal>,
    pub volume_change_pct: Option<Decimal>,
}

/// `(last - first) / first * 100`; `None` when `first` is zero
pub fn percent_change(first: Decimal, last: Decimal) -> Option<Decimal> {
    last.checked_sub(first)?
        .checked_div(first)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// Deltas over the series, `None` for fewer than two points
pub fn analyze(points: &[OhlcvPoint]) -> Option<TrendSummary> {
    let (first, last) = match points {
        [first, .., last] => (first, last),
        _ => return None,
    };

    Some(TrendSummary {
        price_change_pct: percent_change(first.close, last.close),
        volume_change_pct: percent_change(first.volume_usd, last.volume_usd),
    })
}

impl TrendSummary {
    /// Decimals used for both changes. Escalates only when both are defined
    /// and both round to zero at two decimals.
    pub fn precision(&self) -> u32 {
        match (self.price_change_pct, self.volume_change_pct) {
            (Some(p), Some(v)) if p.abs() < TINY_CHANGE && v.abs() < TINY_CHANGE => {
                ESCALATED_PRECISION
            }
            _ => DEFAULT_PRECISION,
        }
    }

    pub fn price_line(&self) -> String {
        self.render(self.price_change_pct)
    }

    pub fn volume_line(&self) -> String {
        self.render(self.volume_change_pct)
    }

    fn render(&self, change: Option<Decimal>) -> String {
        match change {
            Some(c) => format!("{} {}%", direction(c), format_fixed(c, self.precision())),
            None => NA.into(),
        }
    }
}

/// Sign only; zero counts as up
pub fn direction(change: Decimal) -> &'static str {
    if change.is_sign_negative() && !change.is_zero() {
        "📉"
    } else {
        "📈"
    }
}
