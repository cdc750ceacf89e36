//! Error types for the bot front-end

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BotError>;

#[derive(Error, Debug)]
pub enum BotError {
    /// The chat transport rejected or failed a send
    #[error("Chat transport error: {0}")]
    Transport(String),

    /// A chunked reply stopped midway; earlier chunks stay delivered
    #[error("Partial delivery: {sent} of {total} chunks sent")]
    PartialDelivery { sent: usize, total: usize },

    #[error("Chart rendering failed: {0}")]
    Chart(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BotError {
    /// Short label for the `kind` log field
    pub fn kind(&self) -> &'static str {
        match self {
            BotError::Transport(_) => "transport",
            BotError::PartialDelivery { .. } => "partial_delivery",
            BotError::Chart(_) => "chart",
            BotError::Config(_) => "config",
        }
    }
}
