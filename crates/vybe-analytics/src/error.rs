//! Error Types for Analytics Fetching

use thiserror::Error;

use crate::report::markup::escape_html;

pub type Result<T> = std::result::Result<T, FetchError>;

/// Coarse failure class, used for logging and for picking the reply text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchErrorKind {
    Transport,
    Upstream,
    Config,
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchErrorKind::Transport => write!(f, "transport"),
            FetchErrorKind::Upstream => write!(f, "upstream"),
            FetchErrorKind::Config => write!(f, "config"),
        }
    }
}

/// Outcome of a failed provider request. A fetch is never partially valid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Request failed, non-2xx status or empty body
    #[error("Transport error: {0}")]
    Transport(String),

    /// 2xx response whose payload signals failure or violates the schema.
    /// Carries the upstream message when the provider supplied one.
    #[error("Upstream error: {}", .0.as_deref().unwrap_or("malformed payload"))]
    Upstream(Option<String>),

    /// Request could not be built
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Transport(_) => FetchErrorKind::Transport,
            FetchError::Upstream(_) => FetchErrorKind::Upstream,
            FetchError::Config(_) => FetchErrorKind::Config,
        }
    }

    /// Fixed reply text for the chat user; `subject` names what was requested
    /// (e.g. "token details").
    pub fn user_message(&self, subject: &str) -> String {
        match self {
            FetchError::Transport(_) | FetchError::Config(_) => {
                format!("❌ Failed to fetch {}. Please try again later.", subject)
            }
            FetchError::Upstream(Some(msg)) => format!("❌ Error: {}", escape_html(msg)),
            FetchError::Upstream(None) => format!("❌ Error: Failed to fetch {}", subject),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(FetchError::Transport("503".into()).kind(), FetchErrorKind::Transport);
        assert_eq!(FetchError::Upstream(None).kind(), FetchErrorKind::Upstream);
    }

    #[test]
    fn test_user_messages() {
        let transport = FetchError::Transport("HTTP 502".into());
        assert_eq!(
            transport.user_message("token balances"),
            "❌ Failed to fetch token balances. Please try again later."
        );

        let upstream = FetchError::Upstream(Some("Invalid address".into()));
        assert_eq!(upstream.user_message("token balances"), "❌ Error: Invalid address");

        let malformed = FetchError::Upstream(None);
        assert_eq!(malformed.user_message("wallet PnL data"), "❌ Error: Failed to fetch wallet PnL data");
    }

    #[test]
    fn test_upstream_message_is_escaped() {
        let upstream = FetchError::Upstream(Some("bad <address>".into()));
        assert_eq!(upstream.user_message("token details"), "❌ Error: bad &lt;address&gt;");
    }
}
