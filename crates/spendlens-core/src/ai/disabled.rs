//! Null backend used when no generation capability is configured

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::TextGenerator;

/// Backend that is never available
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledBackend;

#[async_trait]
impl TextGenerator for DisabledBackend {
    async fn try_load(&self) -> bool {
        false
    }

    async fn generate(&self, _prompt: &str, _max_length: u32, _temperature: f32) -> Result<String> {
        Err(Error::Generation("text generation is disabled".into()))
    }

    fn name(&self) -> &str {
        "disabled"
    }
}
