//! `/tokendetail` report

use super::markup::{bold, code};
use super::numbers::{
    format_count, format_text, format_timestamp, format_usd, format_usd_scaled, format_value,
    format_verified,
};
use super::FormattedReport;
use crate::model::TokenDetails;

pub fn token_detail_report(address: &str, token: &TokenDetails) -> FormattedReport {
    let mut report = FormattedReport::new();

    report.push(format!(
        "🔵 {}\n\n\
         {} {}\n\
         {} {}\n\
         {} {}\n\
         {} {}\n\
         {} {}\n\
         {} {}\n\
         {} {}\n\
         {} {}\n\n",
        bold("Token Details:"),
        bold("Name:"),
        format_text(token.name.as_deref()),
        bold("Symbol:"),
        format_text(token.symbol.as_deref()),
        bold("Decimals:"),
        format_count(token.decimals.map(u64::from)),
        bold("Price:"),
        format_usd(token.price),
        bold("Current Supply:"),
        format_value(token.current_supply),
        bold("Market Cap:"),
        format_usd_scaled(token.market_cap),
        bold("24h Volume:"),
        format_usd_scaled(token.volume_24h_usd),
        bold("Token Address:"),
        code(address),
    ));

    report.push(format!(
        "{}\n\
         - {} {}\n\
         - {} {}\n\
         - {} {}\n",
        bold("Additional Info:"),
        bold("Category:"),
        format_text(token.category.as_deref()),
        bold("Verified:"),
        format_verified(token.verified),
        bold("Last Updated:"),
        format_timestamp(token.update_time),
    ));

    report
}
