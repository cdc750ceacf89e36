//! Environment configuration
//!
//! Everything comes from environment variables (optionally seeded from a
//! `.env` file by the binary). Secrets are redacted from `Debug`.

use std::fmt;

use vybe_analytics::provider::VybeConfig;

use crate::error::{BotError, Result};

pub const DEFAULT_VYBE_API_URL: &str = "https://api.vybenetwork.xyz";
pub const DEFAULT_QUICKCHART_URL: &str = "https://quickchart.io/chart";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CHART_RESOLUTION: &str = "1d";

/// Which narrative backend the trend advisor talks to
#[derive(Clone, PartialEq, Eq)]
pub enum AdvisorSettings {
    Gemini { api_key: String, model: String },
    Ollama { host: String, port: u16, model: String },
}

impl AdvisorSettings {
    pub fn model(&self) -> &str {
        match self {
            AdvisorSettings::Gemini { model, .. } | AdvisorSettings::Ollama { model, .. } => model,
        }
    }
}

impl fmt::Debug for AdvisorSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvisorSettings::Gemini { model, .. } => f
                .debug_struct("Gemini")
                .field("api_key", &"<redacted>")
                .field("model", model)
                .finish(),
            AdvisorSettings::Ollama { host, port, model } => f
                .debug_struct("Ollama")
                .field("host", host)
                .field("port", port)
                .field("model", model)
                .finish(),
        }
    }
}

#[derive(Clone)]
pub struct BotConfig {
    pub bot_token: String,
    pub api_token: String,
    pub vybe_api_url: String,
    pub http_timeout_secs: u64,
    pub chart_resolution: String,
    pub quickchart_url: String,
    pub advisor: AdvisorSettings,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("bot_token", &"<redacted>")
            .field("api_token", &"<redacted>")
            .field("vybe_api_url", &self.vybe_api_url)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("chart_resolution", &self.chart_resolution)
            .field("quickchart_url", &self.quickchart_url)
            .field("advisor", &self.advisor)
            .finish()
    }
}

impl BotConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| BotError::Config(format!("{} environment variable is not set", key)))
        };

        let http_timeout_secs = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| BotError::Config("HTTP_TIMEOUT_SECS must be a positive integer".into()))?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let provider = get("ADVISOR_PROVIDER").unwrap_or_else(|| "gemini".into());
        let advisor = match provider.to_ascii_lowercase().as_str() {
            "gemini" => AdvisorSettings::Gemini {
                api_key: required("GEMINI_API_KEY")?,
                model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into()),
            },
            "ollama" => AdvisorSettings::Ollama {
                host: get("OLLAMA_HOST").unwrap_or_else(|| "http://localhost".into()),
                port: match get("OLLAMA_PORT") {
                    Some(raw) => raw
                        .parse()
                        .map_err(|_| BotError::Config("OLLAMA_PORT must be a port number".into()))?,
                    None => 11434,
                },
                model: get("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.into()),
            },
            other => {
                return Err(BotError::Config(format!(
                    "ADVISOR_PROVIDER must be 'gemini' or 'ollama', got '{}'",
                    other
                )))
            }
        };

        Ok(Self {
            bot_token: required("BOT_TOKEN")?,
            api_token: required("API_TOKEN")?,
            vybe_api_url: get("VYBE_API_URL").unwrap_or_else(|| DEFAULT_VYBE_API_URL.into()),
            http_timeout_secs,
            chart_resolution: get("CHART_RESOLUTION").unwrap_or_else(|| DEFAULT_CHART_RESOLUTION.into()),
            quickchart_url: get("QUICKCHART_URL").unwrap_or_else(|| DEFAULT_QUICKCHART_URL.into()),
            advisor,
        })
    }

    /// Settings for the analytics HTTP client
    pub fn vybe(&self) -> VybeConfig {
        VybeConfig {
            base_url: self.vybe_api_url.clone(),
            api_key: self.api_token.clone(),
            timeout_secs: self.http_timeout_secs,
        }
    }
}
