//! HS256 verification with a shared secret.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};

use nova_core::auth::verifier::TokenVerifier;
use nova_types::auth::Claims;
use nova_types::error::AuthError;

use super::map_jwt_error;

/// Verifies self-issued HS256 tokens.
///
/// Only the signature and `exp` are checked; any other algorithm, including
/// `none`, is rejected.
pub struct SharedSecretVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl SharedSecretVerifier {
    pub fn new(secret: &SecretString) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;

        Self {
            key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }
}

impl TokenVerifier for SharedSecretVerifier {
    fn scheme(&self) -> &str {
        "shared_secret"
    }

    async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(map_jwt_error)?;
        Ok(data.claims)
    }
}
