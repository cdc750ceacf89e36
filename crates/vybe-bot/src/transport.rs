//! Chat transport seam
//!
//! The pipeline only talks to [`ChatTransport`]; the Telegram binding lives in
//! [`crate::telegram`] and tests use a recording fake.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;

/// Photo payload accepted by the transport
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PhotoSource {
    Url(String),
    Bytes(Vec<u8>),
    File(PathBuf),
}

/// Inbound message reduced to what the pipeline reads
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IncomingMessage {
    pub chat_id: i64,
    pub user_id: Option<u64>,
    pub first_name: Option<String>,
    /// `None` for stickers, photos and other non-text messages
    pub text: Option<String>,
}

impl IncomingMessage {
    pub fn text(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send one message in HTML parse mode
    async fn send_text(&self, chat_id: i64, html: &str) -> Result<()>;

    /// Send a photo, optionally captioned (HTML)
    async fn send_photo(&self, chat_id: i64, photo: PhotoSource, caption: Option<&str>)
    -> Result<()>;

    /// Show the "typing" chat action
    async fn send_typing(&self, chat_id: i64) -> Result<()>;
}
