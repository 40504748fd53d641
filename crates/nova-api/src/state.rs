//! Application state wiring the relay, verifier and session store together.

use std::sync::Arc;

use anyhow::Context;

use nova_core::auth::verifier::BoxTokenVerifier;
use nova_core::llm::box_provider::BoxLlmProvider;
use nova_core::prompt::GenerationSettings;
use nova_core::relay::RelayService;
use nova_infra::auth::jwks::JwksVerifier;
use nova_infra::auth::shared_secret::SharedSecretVerifier;
use nova_infra::config::resolve_secret;
use nova_infra::llm::create_provider;
use nova_infra::session::memory::MemorySessionStore;
use nova_types::auth::AuthMode;
use nova_types::config::{AuthConfig, NovaConfig};

/// Relay pinned to the boxed provider chosen at startup.
pub type ConcreteRelay = RelayService<BoxLlmProvider>;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ConcreteRelay>,
    /// `None` when auth mode is `none`.
    pub verifier: Option<Arc<BoxTokenVerifier>>,
    pub sessions: Arc<MemorySessionStore>,
    pub config: Arc<NovaConfig>,
}

impl AppState {
    /// Build state from configuration: resolve secrets, create the provider
    /// and verifier.
    ///
    /// Fails when the LLM API key or the JWT secret required by the auth mode
    /// is missing.
    pub fn init(config: NovaConfig) -> anyhow::Result<Self> {
        let api_key = resolve_secret(&config.llm.api_key_env);
        let provider = create_provider(&config.llm, api_key).with_context(|| {
            format!(
                "no API key for provider '{}' (set {})",
                config.llm.provider_name, config.llm.api_key_env
            )
        })?;
        let verifier = build_verifier(&config.auth)?;

        tracing::info!(
            provider = provider.name(),
            model = %config.llm.model,
            auth_mode = %config.auth.mode,
            sessions = config.session.enabled,
            "application state initialized"
        );

        Ok(Self::from_parts(config, provider, verifier))
    }

    /// Assemble state from already-built parts.
    pub fn from_parts(
        config: NovaConfig,
        provider: BoxLlmProvider,
        verifier: Option<BoxTokenVerifier>,
    ) -> Self {
        let settings = GenerationSettings::from(&config.llm);
        Self {
            relay: Arc::new(RelayService::new(provider, settings)),
            verifier: verifier.map(Arc::new),
            sessions: Arc::new(MemorySessionStore::new()),
            config: Arc::new(config),
        }
    }

    /// Idle lifetime of a session.
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::try_from(self.config.session.ttl_secs).unwrap_or(i64::MAX))
    }
}

/// Create the token verifier for the configured auth mode.
pub fn build_verifier(config: &AuthConfig) -> anyhow::Result<Option<BoxTokenVerifier>> {
    match config.mode {
        AuthMode::None => Ok(None),
        AuthMode::SharedSecret => {
            let secret = resolve_secret(&config.jwt_secret_env).with_context(|| {
                format!(
                    "auth mode shared_secret needs a signing secret in {}",
                    config.jwt_secret_env
                )
            })?;
            Ok(Some(BoxTokenVerifier::new(SharedSecretVerifier::new(&secret))))
        }
        AuthMode::Jwks => {
            let verifier = JwksVerifier::from_config(config)
                .context("auth mode jwks needs auth.domain or auth.jwks_url")?;
            tracing::info!(jwks_url = verifier.jwks_url(), "JWKS verification enabled");
            Ok(Some(BoxTokenVerifier::new(verifier)))
        }
    }
}
