//! Axum router configuration with middleware.
//!
//! Middleware: CORS (origins from config) and request tracing.

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use nova_types::config::CorsConfig;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    Router::new()
        .route("/bot", post(handlers::bot::send_message))
        .route("/logout", post(handlers::session::logout))
        .route("/health", get(handlers::health::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    // Credentials cannot be combined with a wildcard origin.
    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer
        .allow_origin(origins)
        .allow_credentials(config.allow_credentials)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::header::{COOKIE, ORIGIN, SET_COOKIE};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use tower::ServiceExt;

    use nova_core::auth::verifier::{BoxTokenVerifier, TokenVerifier};
    use nova_core::llm::box_provider::BoxLlmProvider;
    use nova_core::llm::provider::LlmProvider;
    use nova_core::session::SessionStore;
    use nova_types::auth::Claims;
    use nova_types::config::NovaConfig;
    use nova_types::error::AuthError;
    use nova_types::llm::{CompletionRequest, CompletionResponse, LlmError, Usage};

    use super::*;
    use crate::http::error::{EMPTY_MESSAGE_REPLY, FAILURE_REPLY};

    struct StubProvider {
        reply: Option<&'static str>,
        calls: Arc<AtomicUsize>,
    }

    impl LlmProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Some(content) => Ok(CompletionResponse {
                    id: "cmpl-1".into(),
                    content: content.into(),
                    model: request.model.clone(),
                    usage: Usage::default(),
                }),
                None => Err(LlmError::Provider {
                    message: "upstream down".into(),
                }),
            }
        }
    }

    /// Accepts exactly one token.
    struct StubVerifier;

    impl TokenVerifier for StubVerifier {
        fn scheme(&self) -> &str {
            "stub"
        }

        async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
            if token != "good-token" {
                return Err(AuthError::InvalidToken("bad signature".into()));
            }
            Ok(Claims {
                sub: "auth0|alice".into(),
                iss: None,
                aud: None,
                exp: i64::MAX,
                iat: None,
                email: None,
                name: Some("Alice".into()),
            })
        }
    }

    struct Harness {
        router: Router,
        state: AppState,
        calls: Arc<AtomicUsize>,
    }

    fn harness(reply: Option<&'static str>, with_auth: bool, config: NovaConfig) -> Harness {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = BoxLlmProvider::new(StubProvider {
            reply,
            calls: calls.clone(),
        });
        let verifier = with_auth.then(|| BoxTokenVerifier::new(StubVerifier));
        let state = AppState::from_parts(config, provider, verifier);
        Harness {
            router: build_router(state.clone()),
            state,
            calls,
        }
    }

    fn bot_request(body: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/bot")
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn replies_with_sanitized_text() {
        let h = harness(Some("## **Hi** there"), false, NovaConfig::default());
        let response = h
            .router
            .oneshot(bot_request(r#"{"message":"hello"}"#, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["reply"], " Hi there");
        assert_eq!(h.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn token_ignored_when_auth_disabled() {
        let h = harness(Some("ok"), false, NovaConfig::default());
        let response = h
            .router
            .oneshot(bot_request(r#"{"message":"hello"}"#, Some("anything")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_token_is_401() {
        let h = harness(Some("ok"), true, NovaConfig::default());
        let response = h
            .router
            .oneshot(bot_request(r#"{"message":"hello"}"#, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "missing bearer token");
        assert_eq!(h.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_token_is_401() {
        let h = harness(Some("ok"), true, NovaConfig::default());
        let response = h
            .router
            .oneshot(bot_request(r#"{"message":"hello"}"#, Some("forged")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("bad signature"));
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_401() {
        let h = harness(Some("ok"), true, NovaConfig::default());
        let request = Request::builder()
            .method("POST")
            .uri("/bot")
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(Body::from(r#"{"message":"hello"}"#))
            .unwrap();
        let response = h.router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_token_is_accepted_and_binds_session() {
        let h = harness(Some("ok"), true, NovaConfig::default());
        let response = h
            .router
            .oneshot(bot_request(r#"{"message":"hello"}"#, Some("good-token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        let id = cookie
            .strip_prefix("nova.sid=")
            .and_then(|rest| rest.split(';').next())
            .unwrap();
        let id = uuid::Uuid::parse_str(id).unwrap();
        let session = h
            .state
            .sessions
            .touch(&id, h.state.session_ttl())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.subject.as_deref(), Some("auth0|alice"));
    }

    #[tokio::test]
    async fn llm_failure_is_500_with_static_reply() {
        let h = harness(None, false, NovaConfig::default());
        let response = h
            .router
            .oneshot(bot_request(r#"{"message":"hello"}"#, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["reply"], FAILURE_REPLY);
    }

    #[tokio::test]
    async fn empty_message_is_400_without_llm_call() {
        let h = harness(Some("ok"), false, NovaConfig::default());
        let response = h
            .router
            .oneshot(bot_request(r#"{"message":"   "}"#, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["reply"], EMPTY_MESSAGE_REPLY);
        assert_eq!(h.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_body_is_400() {
        let h = harness(Some("ok"), false, NovaConfig::default());
        let response = h
            .router
            .oneshot(bot_request("not json", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["reply"], EMPTY_MESSAGE_REPLY);
    }

    #[tokio::test]
    async fn first_request_sets_session_cookie() {
        let h = harness(Some("ok"), false, NovaConfig::default());
        let response = h
            .router
            .oneshot(bot_request(r#"{"message":"hello"}"#, None))
            .await
            .unwrap();

        let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("nova.sid="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert_eq!(h.state.sessions.len(), 1);
    }

    #[tokio::test]
    async fn live_session_is_reused() {
        let h = harness(Some("ok"), false, NovaConfig::default());
        let session = h.state.sessions.create(None).await.unwrap();

        let mut request = bot_request(r#"{"message":"hello"}"#, None);
        request.headers_mut().insert(
            COOKIE,
            HeaderValue::from_str(&format!("nova.sid={}", session.id)).unwrap(),
        );
        let response = h.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(SET_COOKIE).is_none());
        assert_eq!(h.state.sessions.len(), 1);
    }

    #[tokio::test]
    async fn failed_requests_open_no_session() {
        let h = harness(None, false, NovaConfig::default());

        let failed = h
            .router
            .clone()
            .oneshot(bot_request(r#"{"message":"hello"}"#, None))
            .await
            .unwrap();
        assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(failed.headers().get(SET_COOKIE).is_none());

        let empty = h
            .router
            .oneshot(bot_request(r#"{"message":"   "}"#, None))
            .await
            .unwrap();
        assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
        assert!(empty.headers().get(SET_COOKIE).is_none());

        assert!(h.state.sessions.is_empty());
    }

    #[tokio::test]
    async fn sessions_can_be_disabled() {
        let mut config = NovaConfig::default();
        config.session.enabled = false;
        let h = harness(Some("ok"), false, config);
        let response = h
            .router
            .oneshot(bot_request(r#"{"message":"hello"}"#, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(SET_COOKIE).is_none());
        assert!(h.state.sessions.is_empty());
    }

    #[tokio::test]
    async fn logout_destroys_session() {
        let h = harness(Some("ok"), false, NovaConfig::default());
        let session = h.state.sessions.create(None).await.unwrap();

        let request = Request::builder()
            .method("POST")
            .uri("/logout")
            .header(COOKIE, format!("nova.sid={}", session.id))
            .body(Body::empty())
            .unwrap();
        let response = h.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.contains("Max-Age=0"));
        assert_eq!(body_json(response).await, serde_json::json!({ "success": true }));

        let touched = h
            .state
            .sessions
            .touch(&session.id, h.state.session_ttl())
            .await
            .unwrap();
        assert!(touched.is_none());
    }

    #[tokio::test]
    async fn logout_without_session_succeeds() {
        let h = harness(Some("ok"), true, NovaConfig::default());
        let request = Request::builder()
            .method("POST")
            .uri("/logout")
            .body(Body::empty())
            .unwrap();
        let response = h.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["success"], true);
    }

    #[tokio::test]
    async fn health_reports_version() {
        let h = harness(Some("ok"), false, NovaConfig::default());
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = h.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn cors_allows_configured_origin() {
        let mut config = NovaConfig::default();
        config.cors.allowed_origins = vec!["http://localhost:3000".into()];
        config.cors.allow_credentials = true;
        let h = harness(Some("ok"), false, config);

        let request = Request::builder()
            .method("OPTIONS")
            .uri("/bot")
            .header(ORIGIN, "http://localhost:3000")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();
        let response = h.router.oneshot(request).await.unwrap();

        let headers = response.headers();
        assert_eq!(
            headers.get("access-control-allow-origin").unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(headers.get("access-control-allow-credentials").unwrap(), "true");
    }
}
