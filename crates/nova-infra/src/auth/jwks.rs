//! RS256 verification against a hosted JSON Web Key Set.
//!
//! The key set is fetched lazily and cached. It is refetched when the cache
//! is older than the refresh interval, or when a token names a `kid` the
//! cache does not know (identity providers rotate keys without notice).
//! Unknown-kid refetches are rate limited so arbitrary `kid` values cannot
//! force a fetch per request.

use std::time::{Duration, Instant};

use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use tokio::sync::RwLock;

use nova_core::auth::verifier::TokenVerifier;
use nova_types::auth::Claims;
use nova_types::config::AuthConfig;
use nova_types::error::AuthError;

use super::map_jwt_error;

/// Minimum time between refetches triggered by an unknown `kid`.
const DEFAULT_MIN_REFETCH_INTERVAL: Duration = Duration::from_secs(10);

struct CachedKeys {
    keys: JwkSet,
    fetched_at: Instant,
}

/// Verifies RS256 tokens issued by a hosted identity provider.
pub struct JwksVerifier {
    client: reqwest::Client,
    jwks_url: String,
    audience: String,
    issuer: String,
    refresh_after: Duration,
    min_refetch_interval: Duration,
    cache: RwLock<Option<CachedKeys>>,
}

impl JwksVerifier {
    pub fn new(
        jwks_url: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        refresh_after: Duration,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            jwks_url: jwks_url.into(),
            audience: audience.into(),
            issuer: issuer.into(),
            refresh_after,
            min_refetch_interval: DEFAULT_MIN_REFETCH_INTERVAL,
            cache: RwLock::new(None),
        }
    }

    /// Build a verifier from the `[auth]` section.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::KeySetUnavailable`] when neither `domain` nor
    /// `jwks_url` is configured, or when `domain` is missing (the issuer is
    /// derived from it).
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let jwks_url = config.resolved_jwks_url().ok_or_else(|| {
            AuthError::KeySetUnavailable("auth.domain or auth.jwks_url must be set".to_string())
        })?;
        let issuer = config.issuer().ok_or_else(|| {
            AuthError::KeySetUnavailable("auth.domain must be set".to_string())
        })?;

        Ok(Self::new(
            jwks_url,
            issuer,
            config.audience.clone(),
            Duration::from_secs(config.jwks_refresh_secs),
        ))
    }

    pub fn with_min_refetch_interval(mut self, interval: Duration) -> Self {
        self.min_refetch_interval = interval;
        self
    }

    pub fn jwks_url(&self) -> &str {
        &self.jwks_url
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.audience]);
        validation.set_issuer(&[&self.issuer]);
        validation
    }

    async fn fetch_keys(&self) -> Result<JwkSet, AuthError> {
        tracing::debug!(url = %self.jwks_url, "fetching key set");

        let response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AuthError::KeySetUnavailable(e.to_string()))?;

        let keys = response
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::KeySetUnavailable(format!("invalid key set: {e}")))?;

        tracing::info!(url = %self.jwks_url, keys = keys.keys.len(), "key set refreshed");
        Ok(keys)
    }

    /// Replace the cached key set and return the key for `kid`, if present.
    async fn refresh_and_find(&self, kid: &str) -> Result<Option<DecodingKey>, AuthError> {
        let keys = self.fetch_keys().await?;
        let key = find_decoding_key(&keys, kid)?;
        *self.cache.write().await = Some(CachedKeys {
            keys,
            fetched_at: Instant::now(),
        });
        Ok(key)
    }

    /// Resolve the decoding key for `kid`, fetching at most once.
    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        let cached_age = {
            let cache = self.cache.read().await;
            match cache.as_ref() {
                Some(cached) if cached.fetched_at.elapsed() < self.refresh_after => {
                    if let Some(key) = find_decoding_key(&cached.keys, kid)? {
                        return Ok(key);
                    }
                    Some(cached.fetched_at.elapsed())
                }
                _ => None,
            }
        };

        // Fresh cache that lacks the kid: only refetch if the last fetch is
        // old enough. A stale or empty cache is always refetched.
        if let Some(age) = cached_age {
            if age < self.min_refetch_interval {
                return Err(AuthError::UnknownKey(kid.to_string()));
            }
        }

        self.refresh_and_find(kid)
            .await?
            .ok_or_else(|| AuthError::UnknownKey(kid.to_string()))
    }
}

fn find_decoding_key(keys: &JwkSet, kid: &str) -> Result<Option<DecodingKey>, AuthError> {
    keys.find(kid)
        .map(|jwk| {
            DecodingKey::from_jwk(jwk)
                .map_err(|e| AuthError::InvalidToken(format!("unusable signing key: {e}")))
        })
        .transpose()
}

impl TokenVerifier for JwksVerifier {
    fn scheme(&self) -> &str {
        "jwks"
    }

    async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(map_jwt_error)?;

        if header.alg != Algorithm::RS256 {
            return Err(AuthError::InvalidToken(format!(
                "unsupported algorithm {:?}",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidToken("token header has no kid".to_string()))?;

        let key = self.decoding_key(&kid).await?;
        let data = decode::<Claims>(token, &key, &self.validation()).map_err(map_jwt_error)?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use nova_types::auth::Audience;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PRIVATE_KEY_PEM: &str = include_str!("../../testdata/rsa_private.pem");
    const MODULUS: &str = include_str!("../../testdata/rsa_modulus.txt");
    const ISSUER: &str = "https://nova-test.auth0.com/";
    const AUDIENCE: &str = "https://nova-backend";

    fn jwks_body(kid: &str) -> serde_json::Value {
        serde_json::json!({
            "keys": [{
                "kty": "RSA",
                "use": "sig",
                "alg": "RS256",
                "kid": kid,
                "n": MODULUS.trim(),
                "e": "AQAB"
            }]
        })
    }

    fn claims() -> Claims {
        let now = chrono::Utc::now().timestamp();
        Claims {
            sub: "auth0|abc123".to_string(),
            iss: Some(ISSUER.to_string()),
            aud: Some(Audience::Many(vec![
                AUDIENCE.to_string(),
                "https://nova-test.auth0.com/userinfo".to_string(),
            ])),
            exp: now + 3600,
            iat: Some(now),
            email: None,
            name: Some("Test User".to_string()),
        }
    }

    fn sign(claims: &Claims, kid: &str) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(kid.to_string());
        let key = EncodingKey::from_rsa_pem(PRIVATE_KEY_PEM.as_bytes()).unwrap();
        encode(&header, claims, &key).unwrap()
    }

    async fn serve_keys(kid: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/jwks.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(jwks_body(kid)))
            .mount(&server)
            .await;
        server
    }

    fn verifier_for(server: &MockServer) -> JwksVerifier {
        JwksVerifier::new(
            format!("{}/.well-known/jwks.json", server.uri()),
            ISSUER,
            AUDIENCE,
            Duration::from_secs(600),
        )
    }

    #[tokio::test]
    async fn accepts_token_signed_by_published_key() {
        let server = serve_keys("test-key").await;
        let verifier = verifier_for(&server);

        let verified = verifier.verify(&sign(&claims(), "test-key")).await.unwrap();
        assert_eq!(verified.sub, "auth0|abc123");
        assert_eq!(verified.name.as_deref(), Some("Test User"));
    }

    #[tokio::test]
    async fn caches_key_set_between_verifications() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/jwks.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(jwks_body("test-key")))
            .expect(1)
            .mount(&server)
            .await;

        let verifier = verifier_for(&server);
        let token = sign(&claims(), "test-key");
        for _ in 0..3 {
            verifier.verify(&token).await.unwrap();
        }
    }

    #[tokio::test]
    async fn rejects_wrong_audience() {
        let server = serve_keys("test-key").await;
        let verifier = verifier_for(&server);

        let mut claims = claims();
        claims.aud = Some(Audience::One("https://someone-else".to_string()));
        assert!(matches!(
            verifier.verify(&sign(&claims, "test-key")).await,
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[tokio::test]
    async fn rejects_wrong_issuer() {
        let server = serve_keys("test-key").await;
        let verifier = verifier_for(&server);

        let mut claims = claims();
        claims.iss = Some("https://evil.example.com/".to_string());
        assert!(matches!(
            verifier.verify(&sign(&claims, "test-key")).await,
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[tokio::test]
    async fn rejects_expired_token() {
        let server = serve_keys("test-key").await;
        let verifier = verifier_for(&server);

        let mut claims = claims();
        claims.exp = chrono::Utc::now().timestamp() - 3600;
        assert_eq!(
            verifier.verify(&sign(&claims, "test-key")).await,
            Err(AuthError::Expired)
        );
    }

    #[tokio::test]
    async fn unknown_kid_is_rejected_without_hammering_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/jwks.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(jwks_body("test-key")))
            .expect(1)
            .mount(&server)
            .await;

        let verifier = verifier_for(&server);
        verifier.verify(&sign(&claims(), "test-key")).await.unwrap();

        for _ in 0..3 {
            assert_eq!(
                verifier.verify(&sign(&claims(), "rotated-key")).await,
                Err(AuthError::UnknownKey("rotated-key".to_string()))
            );
        }
    }

    #[tokio::test]
    async fn unknown_kid_triggers_refetch_for_rotation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/jwks.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(jwks_body("old-key")))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/.well-known/jwks.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(jwks_body("new-key")))
            .mount(&server)
            .await;

        let verifier = verifier_for(&server).with_min_refetch_interval(Duration::ZERO);
        verifier.verify(&sign(&claims(), "old-key")).await.unwrap();
        verifier.verify(&sign(&claims(), "new-key")).await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_key_set_is_not_a_client_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/jwks.json"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let verifier = verifier_for(&server);
        let err = verifier.verify(&sign(&claims(), "test-key")).await.unwrap_err();
        assert!(matches!(err, AuthError::KeySetUnavailable(_)));
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn rejects_hs256_token() {
        let server = serve_keys("test-key").await;
        let verifier = verifier_for(&server);

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims(),
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        assert!(matches!(
            verifier.verify(&token).await,
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn from_config_requires_domain() {
        let config = AuthConfig::default();
        assert!(matches!(
            JwksVerifier::from_config(&config),
            Err(AuthError::KeySetUnavailable(_))
        ));

        let config = AuthConfig {
            domain: Some("nova-test.auth0.com".to_string()),
            ..Default::default()
        };
        let verifier = JwksVerifier::from_config(&config).unwrap();
        assert_eq!(
            verifier.jwks_url(),
            "https://nova-test.auth0.com/.well-known/jwks.json"
        );
    }
}
