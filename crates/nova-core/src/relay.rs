//! The relay pipeline: prompt, one completion call, sanitize.

use std::time::Instant;

use nova_types::llm::LlmError;

use crate::llm::provider::LlmProvider;
use crate::prompt::{build_completion_request, GenerationSettings};
use crate::sanitize::sanitize_reply;

/// Errors from a relay attempt.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("message is empty")]
    EmptyMessage,

    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Forwards user messages to an LLM provider and cleans the replies.
///
/// Stateless apart from its configuration; one provider call per message,
/// no retries.
pub struct RelayService<P: LlmProvider> {
    provider: P,
    settings: GenerationSettings,
}

impl<P: LlmProvider> RelayService<P> {
    pub fn new(provider: P, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    /// Relay one user message and return the sanitized reply.
    pub async fn relay(&self, message: &str) -> Result<String, RelayError> {
        if message.trim().is_empty() {
            return Err(RelayError::EmptyMessage);
        }

        let request = build_completion_request(&self.settings, message);
        let started = Instant::now();

        let response = self.provider.complete(&request).await.map_err(|e| {
            tracing::warn!(
                provider = self.provider.name(),
                model = %request.model,
                error = %e,
                "completion failed"
            );
            e
        })?;

        tracing::info!(
            provider = self.provider.name(),
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "completion received"
        );

        Ok(sanitize_reply(&response.content))
    }
}
