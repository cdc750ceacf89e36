//! # advisor-runtime
//!
//! Concrete narrative providers for the trend advisor.
//!
//! ## Providers
//!
//! - **Gemini** (default): Google Generative Language API over HTTPS
//! - **Ollama** (feature `ollama`): local inference via Ollama
//!
//! ## Usage
//!
//! ```rust,ignore
//! use advisor_runtime::{GeminiConfig, GeminiProvider};
//!
//! let provider = GeminiProvider::from_config(GeminiConfig::new(api_key))?;
//! let advisor = TrendAdvisor::new(Arc::new(provider), options);
//! ```

pub mod gemini;

#[cfg(feature = "ollama")]
pub mod ollama;

pub use gemini::{GeminiConfig, GeminiProvider};

#[cfg(feature = "ollama")]
pub use ollama::{OllamaConfig, OllamaProvider};

// Re-export core types for convenience
pub use advisor_core::{AdvisorError, GenerationOptions, LlmProvider, Message, Result, Role};
