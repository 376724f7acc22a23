//! Mock backend for testing
//!
//! Scripted generation output, failures and delays. Useful for unit tests
//! and development without a running LLM server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::TextGenerator;

/// What `generate` does when called
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text
    Text(String),
    /// Fail with this message
    Fail(String),
    /// Sleep, then return the text
    Delayed(Duration, String),
}

/// Mock generation backend
///
/// Clones share call counters and the prompt log so a test can keep a
/// handle after passing the backend into an engine.
#[derive(Clone)]
pub struct MockBackend {
    /// Whether try_load should return true
    pub healthy: bool,
    reply: MockReply,
    load_calls: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a healthy mock backend with a canned recommendation
    pub fn new() -> Self {
        Self::replying(MockReply::Text(
            "Set aside a fixed amount on payday and review your top category weekly.".to_string(),
        ))
    }

    pub fn replying(reply: MockReply) -> Self {
        Self {
            healthy: true,
            reply,
            load_calls: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a backend that never loads
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            ..Self::new()
        }
    }

    /// Number of try_load calls so far
    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    /// Prompts received by generate, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for MockBackend {
    async fn try_load(&self) -> bool {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        self.healthy
    }

    async fn generate(&self, prompt: &str, _max_length: u32, _temperature: f32) -> Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Fail(message) => Err(Error::Generation(message.clone())),
            MockReply::Delayed(delay, text) => {
                tokio::time::sleep(*delay).await;
                Ok(text.clone())
            }
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
