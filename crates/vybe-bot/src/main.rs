//! Vybe Telegram bot
//!
//! Loads configuration from the environment, wires the analytics client,
//! trend advisor and chart renderer into a [`BotApp`] and long-polls Telegram.

use std::sync::Arc;

use anyhow::Context;
use teloxide::Bot;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use advisor_core::{GenerationOptions, LlmProvider};
use advisor_runtime::{GeminiConfig, GeminiProvider, OllamaConfig, OllamaProvider};
use vybe_analytics::{AnalyticsClient, TrendAdvisor, VybeClient};
use vybe_bot::chart::QuickChartRenderer;
use vybe_bot::config::{AdvisorSettings, BotConfig};
use vybe_bot::router::COMMANDS;
use vybe_bot::telegram::{self, TelegramTransport};
use vybe_bot::BotApp;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment first so RUST_LOG from .env applies
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,vybe_bot=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BotConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    // Advisor provider
    let provider = advisor_provider(&config)?;
    match provider.health_check().await {
        Ok(true) => tracing::info!("✓ Connected to {} ({})", provider.name(), config.advisor.model()),
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ {} not reachable - /pricechart will use the fallback verdict", provider.name());
        }
    }
    let advisor = TrendAdvisor::new(provider, GenerationOptions::with_model(config.advisor.model()));

    // Analytics provider
    let vybe = VybeClient::new(config.vybe()).context("failed to build Vybe API client")?;
    let analytics = AnalyticsClient::new(Arc::new(vybe), config.chart_resolution.clone());

    let renderer = QuickChartRenderer::new(config.quickchart_url.clone(), config.http_timeout_secs)?;

    let bot = Bot::new(config.bot_token.clone());
    let app = Arc::new(BotApp::new(
        Arc::new(TelegramTransport::new(bot.clone())),
        analytics,
        advisor,
        Arc::new(renderer),
    ));

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 Vybe bot polling Telegram");
    tracing::info!("══════════════════════════════════════════════════");
    for spec in COMMANDS {
        tracing::info!("  /{:<14} - {}", spec.name, spec.description);
    }

    telegram::run(bot, app).await;

    Ok(())
}

fn advisor_provider(config: &BotConfig) -> anyhow::Result<Arc<dyn LlmProvider>> {
    match &config.advisor {
        AdvisorSettings::Gemini { api_key, .. } => {
            let gemini = GeminiConfig {
                timeout_secs: config.http_timeout_secs,
                ..GeminiConfig::new(api_key.clone())
            };
            Ok(Arc::new(GeminiProvider::from_config(gemini)?))
        }
        AdvisorSettings::Ollama { host, port, .. } => Ok(Arc::new(OllamaProvider::from_config(OllamaConfig {
            host: host.clone(),
            port: *port,
            ..Default::default()
        }))),
    }
}
