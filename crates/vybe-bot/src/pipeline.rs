//! Command pipeline
//!
//! One sequential run per inbound message: route, fetch, format, chunk and
//! reply. Every path ends in exactly one reply (a text, a photo, or an ordered
//! run of chunks); fetch failures turn into fixed error messages and advisor
//! failures into the fallback verdict.

use std::sync::Arc;

use vybe_analytics::chunker::{chunk, fits, CAPTION_LIMIT, DEFAULT_CHUNK_LIMIT};
use vybe_analytics::report::{
    chart_caption, price_trend_analysis, price_trend_message, token_balances_report,
    token_detail_report, top_holders_report, wallet_pnl_report, FormattedReport, PriceChart,
};
use vybe_analytics::trend::{analyze, MAX_CHART_POINTS};
use vybe_analytics::{AnalyticsClient, FetchError, TrendAdvisor};

use crate::chart::ChartRenderer;
use crate::error::{BotError, Result};
use crate::router::{self, CommandKind, RouteOutcome};
use crate::transport::{ChatTransport, IncomingMessage, PhotoSource};

const NOT_ENOUGH_HISTORY: &str =
    "📉 Not enough price history to analyse this token yet. Please try again later.";

/// Everything a command run needs, built once at startup
pub struct BotApp {
    transport: Arc<dyn ChatTransport>,
    analytics: AnalyticsClient,
    advisor: TrendAdvisor,
    renderer: Arc<dyn ChartRenderer>,
}

impl BotApp {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        analytics: AnalyticsClient,
        advisor: TrendAdvisor,
        renderer: Arc<dyn ChartRenderer>,
    ) -> Self {
        Self {
            transport,
            analytics,
            advisor,
            renderer,
        }
    }

    /// Answer one inbound message
    pub async fn handle(&self, msg: &IncomingMessage) -> Result<()> {
        let chat_id = msg.chat_id;

        let Some(text) = msg.text.as_deref() else {
            tracing::debug!(chat_id, user_id = msg.user_id, "Non-text message");
            return self.reply(chat_id, router::UNSUPPORTED_MESSAGE).await;
        };

        match router::parse(text) {
            RouteOutcome::NotACommand => {
                tracing::debug!(chat_id, user_id = msg.user_id, "Plain text message");
                self.reply(chat_id, router::UNSUPPORTED_MESSAGE).await
            }
            RouteOutcome::Unknown(text) => {
                let command = text.split_whitespace().next().unwrap_or_default();
                tracing::info!(chat_id, user_id = msg.user_id, command, "Unknown command");
                self.reply(chat_id, &router::unknown_command(&text)).await
            }
            RouteOutcome::MissingArgument(command) => {
                tracing::info!(
                    chat_id,
                    user_id = msg.user_id,
                    command = %command,
                    kind = "usage",
                    "Missing command argument"
                );
                self.reply(chat_id, &command.usage()).await
            }
            RouteOutcome::Command { kind, argument } => {
                tracing::info!(
                    chat_id,
                    user_id = msg.user_id,
                    command = %kind,
                    argument = argument.as_deref().unwrap_or_default(),
                    "Command received"
                );
                self.run(msg, kind, argument.as_deref()).await
            }
        }
    }

    async fn run(&self, msg: &IncomingMessage, command: CommandKind, argument: Option<&str>) -> Result<()> {
        let chat_id = msg.chat_id;

        let address = match (command, argument) {
            (CommandKind::Start, _) => {
                return self.reply(chat_id, &router::greeting(msg.first_name.as_deref())).await;
            }
            (CommandKind::Help, _) => return self.reply(chat_id, &router::help_text()).await,
            (_, Some(address)) => address,
            (_, None) => return self.reply(chat_id, &command.usage()).await,
        };

        self.typing(chat_id).await;

        match command {
            CommandKind::TokenDetail => self.token_detail(chat_id, address).await,
            CommandKind::TokenBalances => {
                let report = self.analytics.token_balances(address).await;
                self.report(chat_id, command, address, report.map(|b| token_balances_report(address, &b)))
                    .await
            }
            CommandKind::WalletPnl => {
                let report = self.analytics.wallet_pnl(address).await;
                self.report(chat_id, command, address, report.map(|p| wallet_pnl_report(address, &p)))
                    .await
            }
            CommandKind::TopHolders => {
                let report = self.analytics.top_holders(address).await;
                self.report(chat_id, command, address, report.map(|h| top_holders_report(address, &h)))
                    .await
            }
            CommandKind::PriceChart => self.price_chart(chat_id, address).await,
            CommandKind::Start | CommandKind::Help => Ok(()),
        }
    }

    async fn token_detail(&self, chat_id: i64, address: &str) -> Result<()> {
        let details = match self.analytics.token_details(address).await {
            Ok(details) => details,
            Err(e) => return self.fetch_failed(chat_id, CommandKind::TokenDetail, address, &e).await,
        };

        let report = token_detail_report(address, &details);
        let text = report.text();

        let logo = details.logo_url.as_deref().map(str::trim).filter(|u| !u.is_empty());
        if let Some(logo) = logo.filter(|_| fits(&text, CAPTION_LIMIT)) {
            match self
                .transport
                .send_photo(chat_id, PhotoSource::Url(logo.to_string()), Some(&text))
                .await
            {
                Ok(()) => return Ok(()),
                Err(e) => tracing::warn!(
                    chat_id,
                    command = "tokendetail",
                    argument = address,
                    kind = e.kind(),
                    error = %e,
                    "Logo photo rejected, sending text"
                ),
            }
        }

        self.send_report(chat_id, CommandKind::TokenDetail, address, &report).await
    }

    async fn price_chart(&self, chat_id: i64, address: &str) -> Result<()> {
        let ohlcv = match self.analytics.token_ohlcv(address).await {
            Ok(ohlcv) => ohlcv,
            Err(e) => return self.fetch_failed(chat_id, CommandKind::PriceChart, address, &e).await,
        };

        let points = ohlcv.into_points(MAX_CHART_POINTS);
        let Some(trend) = analyze(&points) else {
            tracing::info!(chat_id, command = "pricechart", argument = address, points = points.len(), "Not enough history");
            return self.reply(chat_id, NOT_ENOUGH_HISTORY).await;
        };

        let verdict = self.advisor.verdict(address, &points).await;
        let message = price_trend_message(address, &trend, &verdict);
        let chart = PriceChart::from_points(address, &points);

        // the image, and any file behind it, lives until the end of this scope
        let image = match self.renderer.render(&chart).await {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(
                    chat_id,
                    command = "pricechart",
                    argument = address,
                    kind = e.kind(),
                    error = %e,
                    "Chart rendering failed, sending text only"
                );
                return self.send_report(chat_id, CommandKind::PriceChart, address, &message).await;
            }
        };

        let text = message.text();
        if fits(&text, CAPTION_LIMIT) {
            return self.transport.send_photo(chat_id, image.photo_source(), Some(&text)).await;
        }

        self.transport
            .send_photo(chat_id, image.photo_source(), Some(&chart_caption(address)))
            .await?;
        let analysis = price_trend_analysis(&trend, &verdict);
        self.send_report(chat_id, CommandKind::PriceChart, address, &analysis).await
    }

    async fn report(
        &self,
        chat_id: i64,
        command: CommandKind,
        address: &str,
        report: vybe_analytics::Result<FormattedReport>,
    ) -> Result<()> {
        match report {
            Ok(report) => self.send_report(chat_id, command, address, &report).await,
            Err(e) => self.fetch_failed(chat_id, command, address, &e).await,
        }
    }

    async fn fetch_failed(
        &self,
        chat_id: i64,
        command: CommandKind,
        address: &str,
        err: &FetchError,
    ) -> Result<()> {
        tracing::warn!(
            chat_id,
            command = %command,
            argument = address,
            kind = %err.kind(),
            error = %err,
            "Fetch failed"
        );
        self.reply(chat_id, &err.user_message(subject(command))).await
    }

    /// Chunk `report` and send the chunks in order. Stops at the first failed
    /// send; chunks already delivered stay delivered.
    async fn send_report(
        &self,
        chat_id: i64,
        command: CommandKind,
        argument: &str,
        report: &FormattedReport,
    ) -> Result<()> {
        let chunks = chunk(report, DEFAULT_CHUNK_LIMIT);
        let total = chunks.len();

        for (sent, text) in chunks.iter().enumerate() {
            if let Err(e) = self.transport.send_text(chat_id, text).await {
                tracing::warn!(
                    chat_id,
                    command = %command,
                    argument,
                    sent,
                    total,
                    kind = e.kind(),
                    error = %e,
                    "Chunk delivery failed"
                );
                return Err(if sent == 0 {
                    e
                } else {
                    BotError::PartialDelivery { sent, total }
                });
            }
        }

        tracing::debug!(chat_id, command = %command, argument, chunks = total, "Report delivered");
        Ok(())
    }

    async fn reply(&self, chat_id: i64, text: &str) -> Result<()> {
        self.transport.send_text(chat_id, text).await
    }

    async fn typing(&self, chat_id: i64) {
        if let Err(e) = self.transport.send_typing(chat_id).await {
            tracing::debug!(chat_id, error = %e, "Typing indicator failed");
        }
    }
}

/// What a command fetches, as named in error replies
fn subject(command: CommandKind) -> &'static str {
    match command {
        CommandKind::TokenDetail => "token details",
        CommandKind::TokenBalances => "token balances",
        CommandKind::WalletPnl => "wallet PnL data",
        CommandKind::TopHolders => "top holders",
        CommandKind::PriceChart => "price history",
        CommandKind::Start | CommandKind::Help => "data",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use advisor_core::{GenerationOptions, MockProvider};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use tokio::sync::Mutex;
    use vybe_analytics::provider::{Endpoint, MockDataProvider};
    use vybe_analytics::FALLBACK_VERDICT;

    use crate::chart::{ChartImage, TempChartFile};

    #[derive(Clone, Debug, PartialEq)]
    enum Sent {
        Text(String),
        Photo {
            source: PhotoSource,
            caption: Option<String>,
        },
        Typing,
    }

    /// Records every send; text sends fail once `text_budget` is used up
    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<Sent>>,
        text_budget: Option<usize>,
        texts: AtomicUsize,
        fail_photos: bool,
    }

    impl RecordingTransport {
        async fn sent(&self) -> Vec<Sent> {
            self.sent.lock().await.clone()
        }

        async fn texts(&self) -> Vec<String> {
            self.sent()
                .await
                .into_iter()
                .filter_map(|s| match s {
                    Sent::Text(t) => Some(t),
                    _ => None,
                })
                .collect()
        }

        async fn replies(&self) -> Vec<Sent> {
            self.sent().await.into_iter().filter(|s| *s != Sent::Typing).collect()
        }
    }

    #[async_trait]
    impl ChatTransport for RecordingTransport {
        async fn send_text(&self, _chat_id: i64, html: &str) -> Result<()> {
            let n = self.texts.fetch_add(1, Ordering::SeqCst);
            if self.text_budget.is_some_and(|budget| n >= budget) {
                return Err(BotError::Transport("message rejected".into()));
            }
            self.sent.lock().await.push(Sent::Text(html.to_string()));
            Ok(())
        }

        async fn send_photo(&self, _chat_id: i64, photo: PhotoSource, caption: Option<&str>) -> Result<()> {
            if self.fail_photos {
                return Err(BotError::Transport("photo rejected".into()));
            }
            self.sent.lock().await.push(Sent::Photo {
                source: photo,
                caption: caption.map(str::to_string),
            });
            Ok(())
        }

        async fn send_typing(&self, _chat_id: i64) -> Result<()> {
            self.sent.lock().await.push(Sent::Typing);
            Ok(())
        }
    }

    /// Shared sink for captured log output
    struct LogBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Writes a real temp file per render and remembers its path
    #[derive(Default)]
    struct StubRenderer {
        fail: bool,
        calls: AtomicUsize,
        last_path: Mutex<Option<PathBuf>>,
    }

    #[async_trait]
    impl ChartRenderer for StubRenderer {
        async fn render(&self, chart: &PriceChart) -> Result<ChartImage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(BotError::Chart("renderer down".into()));
            }
            assert_eq!(chart.labels.len(), chart.prices.len());
            assert_eq!(chart.prices.len(), chart.volumes.len());

            let file = TempChartFile::write(b"\x89PNG").await?;
            *self.last_path.lock().await = Some(file.path().to_path_buf());
            Ok(ChartImage::File(file))
        }
    }

    struct Harness {
        app: BotApp,
        transport: Arc<RecordingTransport>,
        data: Arc<MockDataProvider>,
        advisor: Arc<MockProvider>,
        renderer: Arc<StubRenderer>,
    }

    fn harness_with(
        data: MockDataProvider,
        advisor: MockProvider,
        transport: RecordingTransport,
        renderer: StubRenderer,
    ) -> Harness {
        let transport = Arc::new(transport);
        let data = Arc::new(data);
        let advisor = Arc::new(advisor);
        let renderer = Arc::new(renderer);

        let app = BotApp::new(
            transport.clone(),
            AnalyticsClient::new(data.clone(), "1d"),
            TrendAdvisor::new(advisor.clone(), GenerationOptions::default()),
            renderer.clone(),
        );

        Harness {
            app,
            transport,
            data,
            advisor,
            renderer,
        }
    }

    fn harness(data: MockDataProvider) -> Harness {
        harness_with(
            data,
            MockProvider::replying("🚀 Momentum is building."),
            RecordingTransport::default(),
            StubRenderer::default(),
        )
    }

    fn ohlcv(points: usize) -> Value {
        let data: Vec<Value> = (0..points)
            .map(|i| {
                json!({
                    "time": 1_700_000_000 + (i as i64) * 86_400,
                    "open": "1.0",
                    "close": format!("{}", 1 + i),
                    "volumeUsd": "1000",
                })
            })
            .collect();
        json!({ "data": data })
    }

    fn balances(entries: usize) -> Value {
        let data: Vec<Value> = (1..=entries)
            .map(|i| {
                json!({
                    "name": format!("Token {}", i),
                    "symbol": format!("T{}", i),
                    "amount": "100",
                    "valueUsd": (i * 10).to_string(),
                    "priceUsd": "1.5",
                    "priceUsd1dChange": "-2.5",
                    "category": "Meme",
                    "verified": true,
                })
            })
            .collect();
        json!({
            "ownerAddress": "Wallet1",
            "totalTokenValueUsd": "3250",
            "totalTokenValueUsd1dChange": "1.25",
            "totalTokenCount": entries,
            "data": data,
        })
    }

    #[tokio::test]
    async fn test_missing_argument_makes_no_external_calls() {
        let h = harness(MockDataProvider::new());

        for text in ["/tokendetail", "/tokenbalances", "/walletpnl  ", "/topholders", "/pricechart"] {
            h.app.handle(&IncomingMessage::text(1, text)).await.unwrap();
        }

        assert_eq!(h.data.calls(), 0);
        assert_eq!(h.advisor.calls(), 0);
        assert_eq!(h.renderer.calls.load(Ordering::SeqCst), 0);

        let replies = h.transport.replies().await;
        assert_eq!(replies.len(), 5);
        assert!(matches!(&replies[4], Sent::Text(t) if t.starts_with("Please provide a valid token address.")));
        assert!(!h.transport.sent().await.contains(&Sent::Typing));
    }

    #[tokio::test]
    async fn test_unknown_and_unsupported_messages() {
        let h = harness(MockDataProvider::new());

        h.app.handle(&IncomingMessage::text(1, "/tokendetailx abc")).await.unwrap();
        h.app.handle(&IncomingMessage::text(1, "gm")).await.unwrap();
        h.app
            .handle(&IncomingMessage {
                chat_id: 1,
                ..Default::default()
            })
            .await
            .unwrap();

        let texts = h.transport.texts().await;
        assert_eq!(texts.len(), 3);
        assert!(texts[0].starts_with("⚠️ Unknown command: \"/tokendetailx abc\""));
        assert_eq!(texts[1], router::UNSUPPORTED_MESSAGE);
        assert_eq!(texts[2], router::UNSUPPORTED_MESSAGE);
        assert_eq!(h.data.calls(), 0);
    }

    #[tokio::test]
    async fn test_start_and_help() {
        let h = harness(MockDataProvider::new());
        let start = IncomingMessage {
            chat_id: 9,
            first_name: Some("Ada".into()),
            text: Some("/start".into()),
            ..Default::default()
        };

        h.app.handle(&start).await.unwrap();
        h.app.handle(&IncomingMessage::text(9, "/help@VybeBot")).await.unwrap();

        let texts = h.transport.texts().await;
        assert!(texts[0].contains("Hello Ada!"));
        assert!(texts[1].contains("/pricechart"));
    }

    #[tokio::test]
    async fn test_balances_end_to_end() {
        let h = harness(MockDataProvider::new().with_payload(Endpoint::TokenBalances, balances(25)));

        h.app.handle(&IncomingMessage::text(7, "/tokenbalances Wallet1")).await.unwrap();

        let sent = h.transport.sent().await;
        assert_eq!(sent[0], Sent::Typing);

        let texts = h.transport.texts().await;
        assert!(texts.len() >= 2, "report should span several chunks");
        assert!(texts.iter().all(|t| t.chars().count() <= DEFAULT_CHUNK_LIMIT));

        let full = texts.concat();
        assert!(full.contains("1. Token 25 (T25)"));
        assert!(full.contains("20. Token 6 (T6)"));
        assert!(!full.contains("Token 5 (T5)"));
        assert!(full.contains("+5 more tokens"));
        assert!(full.contains("<b>Share of Wallet:</b> 7.69%"));
        assert_eq!(h.data.calls(), 1);
    }

    #[tokio::test]
    async fn test_partial_delivery_is_reported() {
        let h = harness_with(
            MockDataProvider::new().with_payload(Endpoint::TokenBalances, balances(25)),
            MockProvider::replying("unused"),
            RecordingTransport {
                text_budget: Some(1),
                ..Default::default()
            },
            StubRenderer::default(),
        );

        let logs = Arc::new(std::sync::Mutex::new(Vec::new()));
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || LogBuffer(writer.clone()))
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let err = h
            .app
            .handle(&IncomingMessage::text(7, "/tokenbalances Wallet1"))
            .await
            .unwrap_err();

        assert!(matches!(err, BotError::PartialDelivery { sent: 1, total } if total >= 2));
        assert_eq!(h.transport.texts().await.len(), 1);

        let logs = String::from_utf8(logs.lock().unwrap().clone()).unwrap();
        let line = logs.lines().find(|l| l.contains("Chunk delivery failed")).unwrap();
        assert!(line.contains("command=tokenbalances"));
        assert!(line.contains("Wallet1"));
    }

    #[tokio::test]
    async fn test_fetch_errors_become_fixed_replies() {
        let h = harness(
            MockDataProvider::new()
                .with_error(Endpoint::WalletPnl, FetchError::Transport("HTTP 500".into()))
                .with_payload(Endpoint::TopHolders, json!({ "error": "Token not found" })),
        );

        h.app.handle(&IncomingMessage::text(1, "/walletpnl W")).await.unwrap();
        h.app.handle(&IncomingMessage::text(1, "/topholders T")).await.unwrap();

        let texts = h.transport.texts().await;
        assert_eq!(texts[0], "❌ Failed to fetch wallet PnL data. Please try again later.");
        assert_eq!(texts[1], "❌ Error: Token not found");
    }

    #[tokio::test]
    async fn test_schema_violation_is_upstream_error() {
        let h = harness(MockDataProvider::new().with_payload(Endpoint::WalletPnl, json!({ "summary": 42 })));

        h.app.handle(&IncomingMessage::text(1, "/walletpnl W")).await.unwrap();

        assert_eq!(h.transport.texts().await, vec!["❌ Error: Failed to fetch wallet PnL data"]);
    }

    #[tokio::test]
    async fn test_token_detail_uses_logo_caption() {
        let h = harness(MockDataProvider::new().with_payload(
            Endpoint::TokenDetails,
            json!({ "name": "Bonk", "symbol": "BONK", "logoUrl": "https://example.com/bonk.png" }),
        ));

        h.app.handle(&IncomingMessage::text(1, "/tokendetail Mint")).await.unwrap();

        let replies = h.transport.replies().await;
        assert_eq!(replies.len(), 1);
        assert!(matches!(
            &replies[0],
            Sent::Photo { source: PhotoSource::Url(url), caption: Some(c) }
                if url == "https://example.com/bonk.png" && c.contains("<b>Name:</b> Bonk")
        ));
    }

    #[tokio::test]
    async fn test_token_detail_falls_back_to_text_when_photo_fails() {
        let h = harness_with(
            MockDataProvider::new().with_payload(
                Endpoint::TokenDetails,
                json!({ "name": "Bonk", "logoUrl": "https://example.com/bonk.png" }),
            ),
            MockProvider::replying("unused"),
            RecordingTransport {
                fail_photos: true,
                ..Default::default()
            },
            StubRenderer::default(),
        );

        h.app.handle(&IncomingMessage::text(1, "/tokendetail Mint")).await.unwrap();

        let texts = h.transport.texts().await;
        assert_eq!(texts.len(), 1);
        assert!(texts[0].contains("<b>Token Details:</b>"));
    }

    #[tokio::test]
    async fn test_price_chart_with_verdict() {
        let h = harness(MockDataProvider::new().with_payload(Endpoint::TokenOhlcv, ohlcv(4)));

        h.app.handle(&IncomingMessage::text(1, "/pricechart Mint")).await.unwrap();

        let requests = h.data.requests().await;
        assert_eq!(requests[0].query, vec![("resolution".to_string(), "1d".to_string())]);
        assert_eq!(h.advisor.calls(), 1);

        let replies = h.transport.replies().await;
        assert_eq!(replies.len(), 1);
        let Sent::Photo { caption: Some(caption), source } = &replies[0] else {
            panic!("expected a captioned photo, got {:?}", replies[0]);
        };
        assert!(matches!(source, PhotoSource::File(_)));
        assert!(caption.contains("📈 300.00%"));
        assert!(caption.contains("🚀 Momentum is building."));

        let path = h.renderer.last_path.lock().await.clone().unwrap();
        assert!(!path.exists(), "chart file should be removed after replying");
    }

    #[tokio::test]
    async fn test_advisor_failure_degrades_to_fallback() {
        let h = harness_with(
            MockDataProvider::new().with_payload(Endpoint::TokenOhlcv, ohlcv(3)),
            MockProvider::failing("deadline exceeded"),
            RecordingTransport::default(),
            StubRenderer::default(),
        );

        h.app.handle(&IncomingMessage::text(1, "/pricechart Mint")).await.unwrap();

        let replies = h.transport.replies().await;
        let Sent::Photo { caption: Some(caption), .. } = &replies[0] else {
            panic!("expected a captioned photo");
        };
        assert!(caption.contains(FALLBACK_VERDICT));
        assert_eq!(h.advisor.calls(), 1);
    }

    #[tokio::test]
    async fn test_chart_file_removed_when_photo_send_fails() {
        let h = harness_with(
            MockDataProvider::new().with_payload(Endpoint::TokenOhlcv, ohlcv(3)),
            MockProvider::replying("ok"),
            RecordingTransport {
                fail_photos: true,
                ..Default::default()
            },
            StubRenderer::default(),
        );

        let err = h.app.handle(&IncomingMessage::text(1, "/pricechart Mint")).await.unwrap_err();
        assert!(matches!(err, BotError::Transport(_)));

        let path = h.renderer.last_path.lock().await.clone().unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_renderer_failure_sends_text_analysis() {
        let h = harness_with(
            MockDataProvider::new().with_payload(Endpoint::TokenOhlcv, ohlcv(3)),
            MockProvider::replying("🛑 Fading."),
            RecordingTransport::default(),
            StubRenderer {
                fail: true,
                ..Default::default()
            },
        );

        h.app.handle(&IncomingMessage::text(1, "/pricechart Mint")).await.unwrap();

        let texts = h.transport.texts().await;
        assert_eq!(texts.len(), 1);
        assert!(texts[0].contains("Price Change:"));
        assert!(texts[0].contains("🛑 Fading."));
    }

    #[tokio::test]
    async fn test_long_analysis_goes_below_short_caption() {
        let verdict = "📊 ".to_string() + &"steady ".repeat(200);
        let h = harness_with(
            MockDataProvider::new().with_payload(Endpoint::TokenOhlcv, ohlcv(3)),
            MockProvider::replying(verdict),
            RecordingTransport::default(),
            StubRenderer::default(),
        );

        h.app.handle(&IncomingMessage::text(1, "/pricechart Mint")).await.unwrap();

        let replies = h.transport.replies().await;
        assert_eq!(replies.len(), 2);
        assert!(matches!(&replies[0], Sent::Photo { caption: Some(c), .. } if *c == chart_caption("Mint")));
        assert!(matches!(&replies[1], Sent::Text(t) if t.contains("steady steady")));

        let follow_up = h.transport.texts().await.concat();
        assert!(follow_up.starts_with("<b>Price Change:</b>"));
        assert!(!follow_up.contains(&chart_caption("Mint")));
    }

    #[tokio::test]
    async fn test_short_history_skips_advisor() {
        let h = harness(MockDataProvider::new().with_payload(Endpoint::TokenOhlcv, ohlcv(1)));

        h.app.handle(&IncomingMessage::text(1, "/pricechart Mint")).await.unwrap();

        assert_eq!(h.advisor.calls(), 0);
        assert_eq!(h.renderer.calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.transport.texts().await, vec![NOT_ENOUGH_HISTORY]);
    }
}
