//! Telegram binding (teloxide)

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::{
    dispatching::{Dispatcher, UpdateFilterExt},
    dptree,
    error_handlers::LoggingErrorHandler,
    payloads::setters::*,
    prelude::*,
    types::{ChatAction, InputFile, ParseMode, Update},
};

use crate::error::{BotError, Result};
use crate::pipeline::BotApp;
use crate::transport::{ChatTransport, IncomingMessage, PhotoSource};

/// [`ChatTransport`] over the Telegram Bot API
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn transport_error(e: teloxide::RequestError) -> BotError {
    BotError::Transport(e.to_string())
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_text(&self, chat_id: i64, html: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), html)
            .parse_mode(ParseMode::Html)
            .await
            .map_err(transport_error)?;
        Ok(())
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        photo: PhotoSource,
        caption: Option<&str>,
    ) -> Result<()> {
        let file = match photo {
            PhotoSource::Url(url) => InputFile::url(
                url.parse()
                    .map_err(|e| BotError::Transport(format!("invalid photo URL: {}", e)))?,
            ),
            PhotoSource::Bytes(bytes) => InputFile::memory(bytes).file_name("chart.png"),
            PhotoSource::File(path) => InputFile::file(path),
        };

        let mut request = self.bot.send_photo(ChatId(chat_id), file);
        if let Some(caption) = caption {
            request = request.caption(caption).parse_mode(ParseMode::Html);
        }
        request.await.map_err(transport_error)?;
        Ok(())
    }

    async fn send_typing(&self, chat_id: i64) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(chat_id), ChatAction::Typing)
            .await
            .map_err(transport_error)?;
        Ok(())
    }
}

/// Reduce a Telegram message to the pipeline's view of it
pub fn incoming(msg: &Message) -> IncomingMessage {
    IncomingMessage {
        chat_id: msg.chat.id.0,
        user_id: msg.from.as_ref().map(|u| u.id.0),
        first_name: msg.from.as_ref().map(|u| u.first_name.clone()),
        text: msg.text().map(str::to_string),
    }
}

/// Long-poll Telegram and feed every message to `app` until Ctrl-C
pub async fn run(bot: Bot, app: Arc<BotApp>) {
    let handler = Update::filter_message().endpoint(message_handler);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![app])
        .default_handler(|upd| async move {
            tracing::debug!(update_id = ?upd.id, "Unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error in message handler",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::warn!("Dispatcher stopped");
}

async fn message_handler(msg: Message, app: Arc<BotApp>) -> ResponseResult<()> {
    let incoming = incoming(&msg);

    if let Err(e) = app.handle(&incoming).await {
        let mut words = incoming.text.as_deref().unwrap_or_default().split_whitespace();
        tracing::error!(
            chat_id = incoming.chat_id,
            user_id = incoming.user_id,
            command = words.next().unwrap_or_default(),
            argument = words.next().unwrap_or_default(),
            kind = e.kind(),
            error = %e,
            "Failed to answer message"
        );
    }

    Ok(())
}
