//! Chart rendering
//!
//! [`ChartRenderer`] turns a [`PriceChart`] into an image. The QuickChart
//! renderer spools the PNG to a temporary file owned by [`TempChartFile`],
//! which removes it when dropped.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use vybe_analytics::report::PriceChart;

use crate::error::{BotError, Result};
use crate::transport::PhotoSource;

/// Rendered chart
#[derive(Debug)]
pub enum ChartImage {
    InMemory(Vec<u8>),
    File(TempChartFile),
}

impl ChartImage {
    pub fn photo_source(&self) -> PhotoSource {
        match self {
            ChartImage::InMemory(bytes) => PhotoSource::Bytes(bytes.clone()),
            ChartImage::File(file) => PhotoSource::File(file.path().to_path_buf()),
        }
    }
}

/// A chart image on disk, deleted on drop
#[derive(Debug)]
pub struct TempChartFile {
    path: PathBuf,
}

impl TempChartFile {
    /// Write `bytes` to a fresh file under the system temp directory
    pub async fn write(bytes: &[u8]) -> Result<Self> {
        Self::write_in(&std::env::temp_dir(), bytes).await
    }

    pub async fn write_in(dir: &Path, bytes: &[u8]) -> Result<Self> {
        let file = Self {
            path: dir.join(format!("vybe-chart-{}.png", uuid::Uuid::new_v4())),
        };
        // `file` already owns the path, so a failed write is cleaned up too
        tokio::fs::write(&file.path, bytes)
            .await
            .map_err(|e| BotError::Chart(format!("failed to write chart image: {}", e)))?;
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempChartFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Removed chart image"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove chart image"),
        }
    }
}

#[async_trait]
pub trait ChartRenderer: Send + Sync {
    async fn render(&self, chart: &PriceChart) -> Result<ChartImage>;
}

/// Renders Chart.js configurations through a QuickChart endpoint
pub struct QuickChartRenderer {
    client: reqwest::Client,
    endpoint: String,
}

impl QuickChartRenderer {
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| BotError::Config(format!("failed to build chart client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Request body: a price line over volume bars on separate axes
    pub fn request_body(chart: &PriceChart) -> Value {
        json!({
            "width": 800,
            "height": 450,
            "format": "png",
            "backgroundColor": "white",
            "chart": {
                "type": "bar",
                "data": {
                    "labels": chart.labels,
                    "datasets": [
                        {
                            "type": "line",
                            "label": "Close (USD)",
                            "data": chart.prices,
                            "yAxisID": "price",
                            "borderColor": "#2563eb",
                            "fill": false,
                            "pointRadius": 0
                        },
                        {
                            "type": "bar",
                            "label": "Volume (USD)",
                            "data": chart.volumes,
                            "yAxisID": "volume",
                            "backgroundColor": "rgba(16, 185, 129, 0.35)"
                        }
                    ]
                },
                "options": {
                    "title": { "display": true, "text": chart.title },
                    "scales": {
                        "yAxes": [
                            { "id": "price", "position": "left" },
                            { "id": "volume", "position": "right", "gridLines": { "drawOnChartArea": false } }
                        ]
                    }
                }
            }
        })
    }
}

#[async_trait]
impl ChartRenderer for QuickChartRenderer {
    async fn render(&self, chart: &PriceChart) -> Result<ChartImage> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&Self::request_body(chart))
            .send()
            .await
            .map_err(|e| BotError::Chart(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BotError::Chart(format!("renderer returned HTTP {}", status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BotError::Chart(e.without_url().to_string()))?;
        if bytes.is_empty() {
            return Err(BotError::Chart("renderer returned an empty image".into()));
        }

        tracing::debug!(points = chart.len(), bytes = bytes.len(), "Chart rendered");
        TempChartFile::write(&bytes).await.map(ChartImage::File)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_temp_file_removed_on_drop() {
        let file = TempChartFile::write(b"\x89PNG").await.unwrap();
        let path = file.path().to_path_buf();
        assert!(path.exists());
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("vybe-chart-"));

        drop(file);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_failed_write_reports_chart_error() {
        let missing = std::env::temp_dir().join(format!("vybe-missing-{}", uuid::Uuid::new_v4()));
        let err = TempChartFile::write_in(&missing, b"png").await.unwrap_err();
        assert!(matches!(err, BotError::Chart(_)));
    }

    #[tokio::test]
    async fn test_photo_source_points_at_file() {
        let image = ChartImage::File(TempChartFile::write(b"png").await.unwrap());
        let source = image.photo_source();
        let ChartImage::File(file) = &image else {
            unreachable!()
        };
        assert_eq!(source, PhotoSource::File(file.path().to_path_buf()));
    }

    #[test]
    fn test_request_body_carries_both_series() {
        let chart = PriceChart {
            title: "Price & Volume: Mint".into(),
            labels: vec!["Nov 14".into(), "Nov 15".into()],
            prices: vec![1.5, 1.75],
            volumes: vec![1000.0, 2500.0],
        };
        let body = QuickChartRenderer::request_body(&chart);
        let datasets = &body["chart"]["data"]["datasets"];

        assert_eq!(body["chart"]["data"]["labels"], json!(["Nov 14", "Nov 15"]));
        assert_eq!(datasets[0]["data"], json!([1.5, 1.75]));
        assert_eq!(datasets[1]["data"], json!([1000.0, 2500.0]));
        assert_eq!(body["chart"]["options"]["title"]["text"], "Price & Volume: Mint");
    }
}
