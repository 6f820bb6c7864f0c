//! The process-wide signing key.
//!
//! The key is read once at startup and never mutated afterwards. Its
//! `Debug` and `Display` output is redacted so it cannot leak into logs.

use std::fmt;

/// Environment variable holding the signing secret.
pub const SECRET_ENV_VAR: &str = "JWT_SECRET";

/// Fixed, non-secret key used when [`SECRET_ENV_VAR`] is unset.
///
/// Only meant for local development. Tokens signed with it can be forged by
/// anyone who has read this source.
pub const DEVELOPMENT_SECRET: &str = "development-secret-key";

/// HMAC secret used to sign and verify session tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey {
    secret: String,
    fallback: bool,
}

impl SigningKey {
    /// Creates a key from a configured secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            fallback: false,
        }
    }

    /// Returns the development fallback key.
    #[must_use]
    pub fn development() -> Self {
        Self {
            secret: DEVELOPMENT_SECRET.to_owned(),
            fallback: true,
        }
    }

    /// Uses `secret` when it is present and non-empty, otherwise the
    /// development fallback.
    #[must_use]
    pub fn from_optional(secret: Option<String>) -> Self {
        match secret {
            Some(secret) if !secret.is_empty() => Self::new(secret),
            _ => Self::development(),
        }
    }

    /// Exposes the raw secret bytes for the signing primitive.
    #[must_use]
    pub fn expose_secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    /// True when this key is the built-in development value.
    #[must_use]
    pub fn is_development_fallback(&self) -> bool {
        self.fallback
    }

    /// Length of the secret in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.secret.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }
}

impl Default for SigningKey {
    fn default() -> Self {
        Self::development()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("secret", &"[REDACTED]")
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl fmt::Display for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}
