//! `/topholders` report

use super::markup::{bold, code};
use super::numbers::{format_percent, format_text, format_usd, format_value};
use super::{more_trailer, rank, FormattedReport};
use crate::model::TopHolders;

/// Maximum number of holders rendered
pub const HOLDERS_CAP: usize = 10;

pub fn top_holders_report(token: &str, holders: &TopHolders) -> FormattedReport {
    let mut report = FormattedReport::new();
    report.push(format!("🔵 {} {}\n\n", bold("Top Holders for Token:"), code(token)));

    let (shown, hidden) = rank(&holders.data, HOLDERS_CAP, |a, b| a.rank.cmp(&b.rank));

    for holder in shown {
        let owner = match holder.owner_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => format!("{} ({})", format_text(Some(name)), code(&holder.owner_address)),
            _ => code(&holder.owner_address),
        };

        report.push(format!(
            "🔹 {} {}\n\
             \u{20}  {} {}\n\
             \u{20}  {} {}\n\
             \u{20}  {} {}\n\n",
            bold(&format!("#{}", holder.rank)),
            owner,
            bold("Balance:"),
            format_value(holder.balance),
            bold("Value (USD):"),
            format_usd(holder.value_usd),
            bold("Supply Held:"),
            format_percent(holder.percentage_of_supply_held),
        ));
    }

    if hidden > 0 {
        report.push(more_trailer(hidden, "holders"));
    }

    report
}
