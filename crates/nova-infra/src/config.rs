//! Configuration loader for Nova.
//!
//! Resolution order, later wins:
//! 1. Built-in defaults ([`NovaConfig::default()`])
//! 2. `nova.toml` (or the path given on the command line)
//! 3. `NOVA_*` environment variables, including ones loaded from `.env`
//!
//! A missing or malformed file falls back to defaults with a warning so a
//! bare `nova serve` always starts.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use nova_types::auth::AuthMode;
use nova_types::config::NovaConfig;

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "nova.toml";

/// Outcome of loading `.env`, reported once logging is up.
#[derive(Debug)]
pub enum DotenvStatus {
    Loaded(PathBuf),
    Missing,
    Invalid(String),
}

impl DotenvStatus {
    pub fn log(&self) {
        match self {
            DotenvStatus::Loaded(path) => {
                tracing::info!(path = %path.display(), "loaded environment file")
            }
            DotenvStatus::Missing => {
                tracing::debug!("no .env file found, using process environment only")
            }
            DotenvStatus::Invalid(err) => {
                tracing::warn!(error = %err, "failed to parse .env file, ignoring it")
            }
        }
    }
}

/// Load `.env` into the process environment. A missing file is not an error.
pub fn load_dotenv() -> DotenvStatus {
    dotenv_status(dotenvy::dotenv())
}

fn dotenv_status(result: Result<PathBuf, dotenvy::Error>) -> DotenvStatus {
    match result {
        Ok(path) => DotenvStatus::Loaded(path),
        Err(dotenvy::Error::Io(_)) => DotenvStatus::Missing,
        Err(err) => DotenvStatus::Invalid(err.to_string()),
    }
}

/// Load configuration from `path` (or [`DEFAULT_CONFIG_FILE`]) plus environment overrides.
pub async fn load_config(path: Option<&Path>) -> NovaConfig {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    let mut config = load_config_file(path).await;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config
}

async fn load_config_file(path: &Path) -> NovaConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return NovaConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return NovaConfig::default();
        }
    };

    match toml::from_str::<NovaConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            NovaConfig::default()
        }
    }
}

/// Apply `NOVA_*` overrides using `lookup` to read variables.
///
/// Unparsable values are logged and skipped.
pub fn apply_env_overrides(config: &mut NovaConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(host) = get("NOVA_HOST") {
        config.server.host = host;
    }
    if let Some(port) = get("NOVA_PORT") {
        match port.trim().parse::<u16>() {
            Ok(port) => config.server.port = port,
            Err(err) => tracing::warn!(value = %port, error = %err, "ignoring invalid NOVA_PORT"),
        }
    }
    if let Some(origins) = get("NOVA_CORS_ORIGINS") {
        config.cors.allowed_origins = origins
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
    }
    if let Some(mode) = get("NOVA_AUTH_MODE") {
        match mode.parse::<AuthMode>() {
            Ok(mode) => config.auth.mode = mode,
            Err(err) => tracing::warn!(error = %err, "ignoring invalid NOVA_AUTH_MODE"),
        }
    }
    if let Some(domain) = get("NOVA_AUTH_DOMAIN") {
        config.auth.domain = Some(domain);
    }
    if let Some(audience) = get("NOVA_AUTH_AUDIENCE") {
        config.auth.audience = audience;
    }
    if let Some(model) = get("NOVA_LLM_MODEL") {
        config.llm.model = model;
    }
    if let Some(base_url) = get("NOVA_LLM_BASE_URL") {
        config.llm.base_url = base_url;
    }
}

/// Read a secret from the environment variable `env_name`.
///
/// Empty values count as unset.
pub fn resolve_secret(env_name: &str) -> Option<SecretString> {
    match std::env::var(env_name) {
        Ok(value) if !value.trim().is_empty() => Some(SecretString::from(value)),
        _ => None,
    }
}
