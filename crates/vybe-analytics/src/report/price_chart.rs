//! `/pricechart` chart input and trend message

use rust_decimal::prelude::ToPrimitive;

use super::markup::{bold, code, escape_html};
use super::numbers::format_date_label;
use super::FormattedReport;
use crate::model::OhlcvPoint;
use crate::trend::TrendSummary;

/// Renderer input: one label per point and two equally long series
#[derive(Clone, Debug, PartialEq)]
pub struct PriceChart {
    pub title: String,
    pub labels: Vec<String>,
    pub prices: Vec<f64>,
    pub volumes: Vec<f64>,
}

impl PriceChart {
    pub fn from_points(token: &str, points: &[OhlcvPoint]) -> Self {
        Self {
            title: format!("Price & Volume: {}", token),
            labels: points.iter().map(|p| format_date_label(p.time)).collect(),
            prices: points.iter().map(|p| p.close.to_f64().unwrap_or(f64::NAN)).collect(),
            volumes: points
                .iter()
                .map(|p| p.volume_usd.to_f64().unwrap_or(f64::NAN))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Short caption used when the full analysis does not fit under the photo
pub fn chart_caption(token: &str) -> String {
    format!("📊 {} {}", bold("Price & Volume Chart for"), code(token))
}

/// Chart caption, then the analysis blocks of [`price_trend_analysis`]
pub fn price_trend_message(token: &str, trend: &TrendSummary, verdict: &str) -> FormattedReport {
    let mut report = FormattedReport::new();
    report.push(format!("{}\n\n", chart_caption(token)));
    push_analysis(&mut report, trend, verdict);
    report
}

/// Price delta, then volume delta, then the advisor verdict; no caption
pub fn price_trend_analysis(trend: &TrendSummary, verdict: &str) -> FormattedReport {
    let mut report = FormattedReport::new();
    push_analysis(&mut report, trend, verdict);
    report
}

fn push_analysis(report: &mut FormattedReport, trend: &TrendSummary, verdict: &str) {
    report.push(format!(
        "{} {}\n{} {}\n\n",
        bold("Price Change:"),
        trend.price_line(),
        bold("Volume Change:"),
        trend.volume_line(),
    ));
    report.push(format!("{}\n{}\n", bold("AI Verdict:"), escape_html(verdict.trim())));
}
