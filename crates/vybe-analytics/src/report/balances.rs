//! `/tokenbalances` report

use rust_decimal::Decimal;

use super::markup::{bold, code};
use super::numbers::{
    format_count, format_percent, format_text, format_usd, format_usd_scaled, format_value,
    format_verified, share_of,
};
use super::{more_trailer, rank, FormattedReport};
use crate::model::{TokenBalanceEntry, TokenBalances};

/// Maximum number of tokens rendered
pub const BALANCES_CAP: usize = 20;

/// Sum of every entry's USD value, the denominator of the wallet share.
/// `None` when no entry carries a value.
fn wallet_total(entries: &[TokenBalanceEntry]) -> Option<Decimal> {
    entries
        .iter()
        .filter_map(|e| e.value_usd)
        .try_fold(None, |acc: Option<Decimal>, v| {
            acc.unwrap_or(Decimal::ZERO).checked_add(v).map(Some)
        })
        .flatten()
}

pub fn token_balances_report(wallet: &str, balances: &TokenBalances) -> FormattedReport {
    let mut report = FormattedReport::new();

    report.push(format!(
        "🔵 {} {}\n\n\
         {} {}\n\
         {} {}\n\
         {} {}\n\n",
        bold("Token Balances for Wallet:"),
        code(wallet),
        bold("Total Token Value (USD):"),
        format_usd_scaled(balances.total_token_value_usd),
        bold("1-Day Change:"),
        format_percent(balances.total_value_change_1d_pct),
        bold("Total Tokens:"),
        format_count(balances.total_token_count.or(Some(balances.data.len() as u64))),
    ));

    let total = wallet_total(&balances.data);
    let (shown, hidden) = rank(&balances.data, BALANCES_CAP, |a, b| b.value_usd.cmp(&a.value_usd));

    for (i, token) in shown.iter().enumerate() {
        report.push(format!(
            "🔹 {}\n\
             \u{20}  {} {}\n\
             \u{20}  {} {}\n\
             \u{20}  {} {}\n\
             \u{20}  {} {}\n\
             \u{20}  {} {}\n\
             \u{20}  {} {}\n\
             \u{20}  {} {}\n\n",
            bold(&format!(
                "{}. {} ({})",
                i + 1,
                format_text(token.name.as_deref()),
                format_text(token.symbol.as_deref())
            )),
            bold("Amount:"),
            format_value(token.amount),
            bold("Value (USD):"),
            format_usd(token.value_usd),
            bold("Price (USD):"),
            format_usd(token.price_usd),
            bold("1-Day Price Change:"),
            format_percent(token.price_change_1d_pct),
            bold("Share of Wallet:"),
            format_percent(share_of(token.value_usd, total)),
            bold("Category:"),
            format_text(token.category.as_deref()),
            bold("Verified:"),
            format_verified(token.verified),
        ));
    }

    if hidden > 0 {
        report.push(more_trailer(hidden, "tokens"));
    }

    report
}
