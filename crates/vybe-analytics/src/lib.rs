//! # vybe-analytics
//!
//! Solana analytics for chat front-ends: fetches wallet and token data from
//! the Vybe Network API, renders it as chat-ready reports and condenses price
//! history into a trend verdict.
//!
//! ## Pipeline
//!
//! ```text
//! DataProvider ──▶ schema decode ──▶ report::* ──▶ chunker ──▶ messages
//!      │
//!      └─ OHLCV ──▶ trend::analyze ──▶ TrendAdvisor (LLM, fallback on failure)
//! ```
//!
//! Every formatter is pure. Fetch failures never reach a formatter; callers
//! reply with [`FetchError::user_message`] instead.

pub mod chunker;
pub mod error;
pub mod model;
pub mod narrative;
pub mod provider;
pub mod report;
pub mod trend;

pub use chunker::{chunk, CAPTION_LIMIT, DEFAULT_CHUNK_LIMIT};
pub use error::{FetchError, FetchErrorKind, Result};
pub use narrative::{TrendAdvisor, FALLBACK_VERDICT};
pub use provider::{
    AnalyticsClient, DataProvider, Endpoint, MockDataProvider, VybeClient, VybeConfig,
};
pub use report::FormattedReport;
pub use trend::{analyze, TrendSummary, MAX_CHART_POINTS};
