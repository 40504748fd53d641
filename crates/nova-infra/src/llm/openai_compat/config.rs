//! Configuration and per-provider defaults for OpenAI-compatible providers.

use secrecy::SecretString;

/// Configuration for an OpenAI-compatible chat completions endpoint.
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "groq", "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.groq.com/openai/v1").
    pub base_url: String,
    pub api_key: SecretString,
    /// Default model when a request leaves it empty.
    pub model: String,
}
