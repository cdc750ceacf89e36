//! # advisor-core
//!
//! Provider-agnostic LLM abstraction used to turn market data into a short
//! narrative verdict.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                  Trend advisor                   │
//! │  ┌──────────────┐        ┌────────────────────┐  │
//! │  │   Messages   │───────▶│    LlmProvider     │  │
//! │  │   (prompt)   │        │    (Strategy)      │  │
//! │  └──────────────┘        └────────────────────┘  │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait enables swapping between Gemini, Ollama,
//! or any other backend without changing advisor logic.

pub mod error;
pub mod message;
pub mod mock;
pub mod provider;

pub use error::{AdvisorError, Result};
pub use message::{Message, Role};
pub use mock::MockProvider;
pub use provider::{Completion, GenerationOptions, LlmProvider};
