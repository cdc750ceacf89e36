//! # vybe-bot
//!
//! Telegram front-end for Vybe Network analytics.
//!
//! ```text
//! Telegram ──▶ telegram::run ──▶ BotApp::handle
//!                                   │
//!                     router::parse ┤
//!                                   ├──▶ AnalyticsClient ──▶ report::* ──▶ chunker ──▶ ChatTransport
//!                                   └──▶ /pricechart: trend + TrendAdvisor + ChartRenderer
//! ```
//!
//! The pipeline depends only on the [`transport::ChatTransport`],
//! [`chart::ChartRenderer`], [`vybe_analytics::DataProvider`] and
//! [`advisor_core::LlmProvider`] seams, all injected at startup.

pub mod chart;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod router;
pub mod telegram;
pub mod transport;

pub use config::BotConfig;
pub use error::{BotError, Result};
pub use pipeline::BotApp;
