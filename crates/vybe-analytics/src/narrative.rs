//! Advisor Bridge
//!
//! Turns an OHLCV series into a short verdict from an [`LlmProvider`].
//! Provider failures degrade into [`FALLBACK_VERDICT`]; this module never
//! returns an error.

use std::sync::Arc;

use advisor_core::{GenerationOptions, LlmProvider, Message};

use crate::model::OhlcvPoint;

/// Verdict used whenever the advisor cannot produce one
pub const FALLBACK_VERDICT: &str =
    "⚠️ Analysis unavailable. Unable to provide a recommendation due to a technical error.";

/// System prompt for the trend advisor
pub const TREND_ADVISOR_PROMPT: &str = r#"You are a concise on-chain market analyst.

You receive the recent price and volume history of a single Solana token and answer with a 2-3 line verdict on its recent trend and trading activity.

Rules:
1. Base the verdict solely on the history provided
2. Consider price movement, volume spikes and notable patterns
3. Phrase it as a direct recommendation
4. Start with a single emoji conveying the sentiment (🚀 bullish, ⚠️ caution, 🛑 bearish)
5. No markdown, no headings, no disclaimers"#;

pub struct TrendAdvisor {
    provider: Arc<dyn LlmProvider>,
    options: GenerationOptions,
}

impl TrendAdvisor {
    pub fn new(provider: Arc<dyn LlmProvider>, options: GenerationOptions) -> Self {
        Self { provider, options }
    }

    /// System and user messages for one token's history
    pub fn build_prompt(token: &str, points: &[OhlcvPoint]) -> Vec<Message> {
        let history = points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                format!(
                    "Period {}: Time: {}, Close: {}, VolumeUSD: {}",
                    i + 1,
                    p.iso_time(),
                    p.close.normalize(),
                    p.volume_usd.normalize()
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        vec![
            Message::system(TREND_ADVISOR_PROMPT),
            Message::user(format!(
                "Token Address: {}\n\nRecent Price and Volume History:\n{}\n\n\
                 Give your verdict on this token's recent trend.",
                token, history
            )),
        ]
    }

    /// The advisor's verdict, or [`FALLBACK_VERDICT`] on any failure
    pub async fn verdict(&self, token: &str, points: &[OhlcvPoint]) -> String {
        if points.is_empty() {
            return FALLBACK_VERDICT.to_string();
        }

        let messages = Self::build_prompt(token, points);
        match self.provider.complete(&messages, &self.options).await {
            Ok(completion) if !completion.is_blank() => {
                tracing::debug!(
                    provider = self.provider.name(),
                    model = %completion.model,
                    token,
                    "advisor verdict received"
                );
                completion.content.trim().to_string()
            }
            Ok(_) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    token,
                    kind = "empty_response",
                    "advisor returned no text, using fallback"
                );
                FALLBACK_VERDICT.to_string()
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    token,
                    kind = "advisor",
                    error = %e,
                    "advisor call failed, using fallback"
                );
                FALLBACK_VERDICT.to_string()
            }
        }
    }
}
