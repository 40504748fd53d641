//! System prompt and request assembly.
//!
//! The relay is stateless: every request carries the system prompt and the
//! single user message, nothing else.

use nova_types::config::LlmConfig;
use nova_types::llm::{CompletionRequest, Message, MessageRole};

/// The built-in system prompt attached to every request.
pub const SYSTEM_PROMPT: &str = "\
You are a professional technical writer.
Explain concepts clearly, concisely, and in a readable style.
Avoid Markdown syntax like ##, **, --- or tables.
Use paragraphs, bullet points (•), numbered lists (1., 2., 3.), and code blocks only when necessary.
Keep it professional and easy to read for developers.";

/// Generation parameters taken from [`LlmConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub system_prompt: String,
}

impl From<&LlmConfig> for GenerationSettings {
    fn from(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_completion_tokens,
            top_p: config.top_p,
            system_prompt: config
                .system_prompt
                .clone()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| SYSTEM_PROMPT.to_string()),
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::from(&LlmConfig::default())
    }
}

/// Build the completion request for one user message.
pub fn build_completion_request(
    settings: &GenerationSettings,
    user_message: &str,
) -> CompletionRequest {
    CompletionRequest {
        model: settings.model.clone(),
        messages: vec![Message {
            role: MessageRole::User,
            content: user_message.to_string(),
        }],
        system: Some(settings.system_prompt.clone()),
        max_tokens: settings.max_tokens,
        temperature: Some(settings.temperature),
        top_p: Some(settings.top_p),
    }
}
