use std::fmt;

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::SessionClaims;
use crate::{AuthError, SigningKey};

/// Signs and verifies session tokens.
///
/// `verify` must reject tokens whose `exp` has passed with
/// [`AuthError::TokenExpired`], and every other defect with
/// [`AuthError::TokenInvalid`].
#[async_trait]
pub trait TokenCodec: Send + Sync {
    async fn sign(&self, claims: &SessionClaims) -> Result<String, AuthError>;

    async fn verify(&self, token: &str) -> Result<SessionClaims, AuthError>;
}

/// HS256 codec backed by `jsonwebtoken`.
#[derive(Clone)]
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtCodec {
    pub fn new(key: &SigningKey) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(key.expose_secret()),
            decoding_key: DecodingKey::from_secret(key.expose_secret()),
            validation,
        }
    }
}

impl fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtCodec")
            .field("algorithm", &Algorithm::HS256)
            .field("keys", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl TokenCodec for JwtCodec {
    async fn sign(&self, claims: &SessionClaims) -> Result<String, AuthError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    async fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let token_data =
            jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
                .map_err(|e| match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::TokenInvalid,
                })?;

        Ok(token_data.claims)
    }
}
