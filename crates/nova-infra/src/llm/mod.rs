//! LLM provider implementations.
//!
//! Contains the concrete [`LlmProvider`](nova_core::llm::provider::LlmProvider)
//! used by the relay, and a factory that builds it from [`LlmConfig`].

pub mod openai_compat;

use secrecy::SecretString;

use nova_core::llm::box_provider::BoxLlmProvider;
use nova_types::config::LlmConfig;
use nova_types::llm::LlmError;

use self::openai_compat::config::OpenAiCompatConfig;
use self::openai_compat::OpenAiCompatibleProvider;

/// Create a [`BoxLlmProvider`] from configuration and a resolved API key.
///
/// # Errors
///
/// Returns [`LlmError::AuthenticationFailed`] when no API key is available;
/// the server refuses to start rather than failing every request.
pub fn create_provider(
    config: &LlmConfig,
    api_key: Option<SecretString>,
) -> Result<BoxLlmProvider, LlmError> {
    let api_key = api_key.ok_or(LlmError::AuthenticationFailed)?;
    let provider = OpenAiCompatibleProvider::new(OpenAiCompatConfig {
        provider_name: config.provider_name.clone(),
        base_url: config.base_url.clone(),
        api_key,
        model: config.model.clone(),
    });
    Ok(BoxLlmProvider::new(provider))
}
