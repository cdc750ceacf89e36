//! Mock LLM Provider
//!
//! Scriptable provider for tests and offline runs. Counts calls and keeps the
//! prompts it received.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{AdvisorError, Result};
use crate::message::Message;
use crate::provider::{Completion, FinishReason, GenerationOptions, LlmProvider};

#[derive(Clone, Debug)]
enum Script {
    Reply(String),
    Fail(String),
}

/// Provider that answers every request with the same scripted outcome
pub struct MockProvider {
    script: Script,
    calls: AtomicUsize,
    prompts: Mutex<Vec<Vec<Message>>>,
}

impl MockProvider {
    /// Always reply with `text`
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_script(Script::Reply(text.into()))
    }

    /// Always fail with a provider error carrying `reason`
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_script(Script::Fail(reason.into()))
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Number of `complete` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Messages of the most recent `complete` call
    pub async fn last_prompt(&self) -> Option<Vec<Message>> {
        self.prompts.lock().await.last().cloned()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(matches!(self.script, Script::Reply(_)))
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().await.push(messages.to_vec());

        match &self.script {
            Script::Reply(text) => Ok(Completion {
                content: text.clone(),
                model: options.model.clone(),
                usage: None,
                finish_reason: Some(FinishReason::Stop),
            }),
            Script::Fail(reason) => Err(AdvisorError::Provider(reason.clone())),
        }
    }
}
