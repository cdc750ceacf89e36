//! `/walletpnl` report

use super::markup::{bold, code};
use super::numbers::{format_count, format_ratio, format_text, format_usd, NA};
use super::FormattedReport;
use crate::model::{PerformingToken, WalletPnl};

fn performing(token: Option<&PerformingToken>) -> String {
    token
        .and_then(PerformingToken::label)
        .map_or_else(|| NA.into(), |label| format_text(Some(label)))
}

pub fn wallet_pnl_report(wallet: &str, pnl: &WalletPnl) -> FormattedReport {
    let mut report = FormattedReport::new();
    let summary = &pnl.summary;

    report.push(format!(
        "🔵 {} {}\n\n\
         {}\n\
         - {} {}\n\
         - {} {}\n\
         - {} {}\n\
         - {} {}\n\
         - {} {}\n\
         - {} {}\n\
         - {} {}\n\
         - {} {}\n\
         - {} {}\n\
         - {} {}\n\
         - {} {}\n\n",
        bold("Wallet PnL Analysis for:"),
        code(wallet),
        bold("Summary:"),
        bold("Win Rate:"),
        format_ratio(summary.win_rate),
        bold("Realized PnL (USD):"),
        format_usd(summary.realized_pnl_usd),
        bold("Unrealized PnL (USD):"),
        format_usd(summary.unrealized_pnl_usd),
        bold("Unique Tokens Traded:"),
        format_count(summary.unique_tokens_traded),
        bold("Average Trade (USD):"),
        format_usd(summary.average_trade_usd),
        bold("Total Trades:"),
        format_count(summary.trades_count),
        bold("Winning Trades:"),
        format_count(summary.winning_trades_count),
        bold("Losing Trades:"),
        format_count(summary.losing_trades_count),
        bold("Trades Volume (USD):"),
        format_usd(summary.trades_volume_usd),
        bold("Best Performing Token:"),
        performing(summary.best_performing_token.as_ref()),
        bold("Worst Performing Token:"),
        performing(summary.worst_performing_token.as_ref()),
    ));

    if !summary.pnl_trend_seven_days.is_empty() {
        let mut trend = format!("{}\n", bold("PnL Trend (Last 7 Days):"));
        for (day, value) in summary.pnl_trend_seven_days.iter().enumerate() {
            trend.push_str(&format!("   Day {}: {}\n", day + 1, format_usd(*value)));
        }
        trend.push('\n');
        report.push(trend);
    }

    if !pnl.token_metrics.is_empty() {
        report.push(format!("{}\n", bold("Token Metrics:")));
        for token in &pnl.token_metrics {
            report.push(format!(
                "🔹 {}\n\
                 \u{20}  - {} {}\n\
                 \u{20}  - {} {}\n\
                 \u{20}  - {} {}\n\
                 \u{20}  - {} {}\n\n",
                bold(&format!(
                    "{} ({})",
                    format_text(token.name.as_deref()),
                    format_text(token.symbol.as_deref())
                )),
                bold("Realized PnL (USD):"),
                format_usd(token.realized_pnl_usd),
                bold("Unrealized PnL (USD):"),
                format_usd(token.unrealized_pnl_usd),
                bold("Trades Count:"),
                format_count(token.trades_count),
                bold("Volume (USD):"),
                format_usd(token.volume_usd),
            ));
        }
    }

    report
}
