//! Optional text-generation capability
//!
//! The analysis engine can ask a language model for a narrative
//! recommendation. The model is never required: every backend can report
//! itself unavailable, and every failure is handled by the caller falling
//! back to rule-based text.
//!
//! # Architecture
//!
//! - `TextGenerator` trait: `try_load` / `generate` contract
//! - `GenerationClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `OllamaBackend`, `MockBackend`, `DisabledBackend`
//!
//! # Configuration
//!
//! Built from [`GenerationConfig`](crate::config::GenerationConfig):
//! - `backend = "disabled"` (default): the null backend, never loads
//! - `backend = "ollama"`: requires `host` (or `OLLAMA_HOST`)
//! - `backend = "mock"`: canned output for development

mod disabled;
mod mock;
mod ollama;

pub use disabled::DisabledBackend;
pub use mock::{MockBackend, MockReply};
pub use ollama::OllamaBackend;

use async_trait::async_trait;

use crate::config::{BackendKind, GenerationConfig};
use crate::error::Result;

/// Contract with an external text-generation backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Probe whether the backend can serve requests
    ///
    /// Idempotent and side-effect free on failure; never errors.
    async fn try_load(&self) -> bool;

    /// Generate free text for a prompt
    ///
    /// `max_length` bounds the number of generated tokens; `temperature` is a
    /// sampling hint the backend may ignore.
    async fn generate(&self, prompt: &str, max_length: u32, temperature: f32) -> Result<String>;

    /// Backend name (for logging)
    fn name(&self) -> &str;
}

/// Concrete generation client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum GenerationClient {
    /// Ollama HTTP API
    Ollama(OllamaBackend),
    /// Scripted backend for tests and development
    Mock(MockBackend),
    /// No capability configured
    Disabled(DisabledBackend),
}

impl GenerationClient {
    /// Build the client selected by configuration
    ///
    /// An ollama backend without a host degrades to `Disabled`.
    pub fn from_config(config: &GenerationConfig) -> Self {
        match config.backend {
            BackendKind::Ollama => match config.host.as_deref() {
                Some(host) => GenerationClient::Ollama(OllamaBackend::new(host, &config.model)),
                None => {
                    tracing::warn!("Ollama backend selected without a host, generation disabled");
                    GenerationClient::disabled()
                }
            },
            BackendKind::Mock => GenerationClient::Mock(MockBackend::new()),
            BackendKind::Disabled => GenerationClient::disabled(),
        }
    }

    pub fn disabled() -> Self {
        GenerationClient::Disabled(DisabledBackend)
    }

    pub fn mock(backend: MockBackend) -> Self {
        GenerationClient::Mock(backend)
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, GenerationClient::Disabled(_))
    }
}

impl Default for GenerationClient {
    fn default() -> Self {
        Self::disabled()
    }
}

// Implement TextGenerator for GenerationClient by delegating to the inner backend
#[async_trait]
impl TextGenerator for GenerationClient {
    async fn try_load(&self) -> bool {
        match self {
            GenerationClient::Ollama(b) => b.try_load().await,
            GenerationClient::Mock(b) => b.try_load().await,
            GenerationClient::Disabled(b) => b.try_load().await,
        }
    }

    async fn generate(&self, prompt: &str, max_length: u32, temperature: f32) -> Result<String> {
        match self {
            GenerationClient::Ollama(b) => b.generate(prompt, max_length, temperature).await,
            GenerationClient::Mock(b) => b.generate(prompt, max_length, temperature).await,
            GenerationClient::Disabled(b) => b.generate(prompt, max_length, temperature).await,
        }
    }

    fn name(&self) -> &str {
        match self {
            GenerationClient::Ollama(b) => b.name(),
            GenerationClient::Mock(b) => b.name(),
            GenerationClient::Disabled(b) => b.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_selects_backend() {
        let mut config = GenerationConfig::default();
        assert!(GenerationClient::from_config(&config).is_disabled());

        config.backend = BackendKind::Mock;
        assert_eq!(GenerationClient::from_config(&config).name(), "mock");

        config.backend = BackendKind::Ollama;
        assert!(GenerationClient::from_config(&config).is_disabled());

        config.host = Some("http://localhost:11434/".to_string());
        let client = GenerationClient::from_config(&config);
        assert_eq!(client.name(), "ollama");
    }

    #[tokio::test]
    async fn test_disabled_never_loads() {
        let client = GenerationClient::disabled();
        assert!(!client.try_load().await);
        assert!(client.generate("hi", 10, 0.5).await.is_err());
    }
}
