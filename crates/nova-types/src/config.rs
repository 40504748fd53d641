//! Configuration types for Nova.
//!
//! `NovaConfig` is the top-level `nova.toml`. Every field has a default, so an
//! empty file (or no file at all) yields a server that relays to Groq on
//! port 5000 without authentication.

use serde::{Deserialize, Serialize};

use crate::auth::AuthMode;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NovaConfig {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub llm: LlmConfig,
    pub auth: AuthConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins. Empty, or containing `*`, allows any origin.
    pub allowed_origins: Vec<String>,
    /// Send `Access-Control-Allow-Credentials`. Ignored when any origin is allowed.
    pub allow_credentials: bool,
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Name reported in logs.
    pub provider_name: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_completion_tokens: u32,
    pub top_p: f64,
    /// Replaces the built-in system prompt when set.
    pub system_prompt: Option<String>,
    /// Environment variable holding the provider API key.
    pub api_key_env: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider_name: "groq".to_string(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.6,
            max_completion_tokens: 1024,
            top_p: 1.0,
            system_prompt: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub mode: AuthMode,
    /// Environment variable holding the HS256 secret (shared-secret mode).
    pub jwt_secret_env: String,
    /// Identity provider tenant domain, e.g. `example.auth0.com` (JWKS mode).
    pub domain: Option<String>,
    /// Explicit key set URL. Defaults to `https://{domain}/.well-known/jwks.json`.
    pub jwks_url: Option<String>,
    pub audience: String,
    /// Maximum age of the cached key set before it is refetched.
    pub jwks_refresh_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: AuthMode::None,
            jwt_secret_env: "JWT_SECRET".to_string(),
            domain: None,
            jwks_url: None,
            audience: "https://nova-backend".to_string(),
            jwks_refresh_secs: 600,
        }
    }
}

impl AuthConfig {
    /// Expected `iss` claim for JWKS mode.
    pub fn issuer(&self) -> Option<String> {
        self.domain
            .as_ref()
            .map(|d| format!("https://{}/", d.trim_end_matches('/')))
    }

    /// Key set location for JWKS mode.
    pub fn resolved_jwks_url(&self) -> Option<String> {
        self.jwks_url.clone().or_else(|| {
            self.domain.as_ref().map(|d| {
                format!("https://{}/.well-known/jwks.json", d.trim_end_matches('/'))
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub enabled: bool,
    pub cookie_name: String,
    /// Idle lifetime of a session.
    pub ttl_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cookie_name: "nova.sid".to_string(),
            ttl_secs: 86_400,
        }
    }
}
