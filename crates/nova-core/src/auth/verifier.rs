//! TokenVerifier trait and its object-safe wrapper.
//!
//! Same blanket-impl pattern as [`crate::llm::box_provider`]: the RPITIT
//! trait is what implementations write, `BoxTokenVerifier` is what the HTTP
//! layer stores once the auth mode is known at startup.

use std::future::Future;
use std::pin::Pin;

use nova_types::auth::Claims;
use nova_types::error::AuthError;

/// Verifies a raw bearer token and returns its claims.
pub trait TokenVerifier: Send + Sync {
    /// Short scheme name for logs (e.g., "shared_secret", "jwks").
    fn scheme(&self) -> &str;

    fn verify(&self, token: &str) -> impl Future<Output = Result<Claims, AuthError>> + Send;
}

pub trait TokenVerifierDyn: Send + Sync {
    fn scheme(&self) -> &str;

    fn verify_boxed<'a>(
        &'a self,
        token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Claims, AuthError>> + Send + 'a>>;
}

impl<T: TokenVerifier> TokenVerifierDyn for T {
    fn scheme(&self) -> &str {
        TokenVerifier::scheme(self)
    }

    fn verify_boxed<'a>(
        &'a self,
        token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Claims, AuthError>> + Send + 'a>> {
        Box::pin(self.verify(token))
    }
}

/// Type-erased token verifier.
pub struct BoxTokenVerifier {
    inner: Box<dyn TokenVerifierDyn + Send + Sync>,
}

impl BoxTokenVerifier {
    pub fn new<T: TokenVerifier + 'static>(verifier: T) -> Self {
        Self {
            inner: Box::new(verifier),
        }
    }

    pub fn scheme(&self) -> &str {
        self.inner.scheme()
    }

    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.inner.verify_boxed(token).await
    }
}
