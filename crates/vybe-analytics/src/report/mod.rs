//! Response Formatter
//!
//! One pure function per command turning a parsed payload into a
//! [`FormattedReport`]: an ordered list of text blocks (header, summary,
//! per-item sections, optional "+N more" trailer). Blocks are the unit the
//! chunker never splits.

pub mod markup;
pub mod numbers;

mod balances;
mod holders;
mod pnl;
mod price_chart;
mod token_detail;

pub use balances::{token_balances_report, BALANCES_CAP};
pub use holders::{top_holders_report, HOLDERS_CAP};
pub use pnl::wallet_pnl_report;
pub use price_chart::{chart_caption, price_trend_analysis, price_trend_message, PriceChart};
pub use token_detail::token_detail_report;

use std::cmp::Ordering;

/// Ordered text blocks; their concatenation is the full report
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormattedReport {
    blocks: Vec<String>,
}

impl FormattedReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: impl Into<String>) {
        self.blocks.push(block.into());
    }

    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Full report text
    pub fn text(&self) -> String {
        self.blocks.concat()
    }
}

impl From<Vec<String>> for FormattedReport {
    fn from(blocks: Vec<String>) -> Self {
        Self { blocks }
    }
}

/// Stable-sort `items` with `compare`, then keep the first `cap`.
/// Returns the kept entries and how many were cut.
pub fn rank<'a, T, F>(items: &'a [T], cap: usize, mut compare: F) -> (Vec<&'a T>, usize)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| compare(a, b));
    let hidden = sorted.len().saturating_sub(cap);
    sorted.truncate(cap);
    (sorted, hidden)
}

/// Trailer block for truncated ranked lists
fn more_trailer(hidden: usize, noun: &str) -> String {
    format!("➕ <i>+{} more {} not shown</i>\n", hidden, noun)
}
