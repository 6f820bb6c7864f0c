//! Signed session tokens carried in an HTTP cookie.
//!
//! A [`SessionManager`](session::SessionManager) issues a JWT holding the
//! principal's `userId`, `email` and `expiresAt`, stores it in the
//! `auth-token` cookie, and reads it back either from an injected
//! [`CookieStore`](session::CookieStore) or from an inbound request.
//!
//! ```ignore
//! use cookie_session_auth::session::{InMemoryCookieStore, SessionManager};
//! use cookie_session_auth::SessionConfig;
//!
//! let manager = SessionManager::new(SessionConfig::from_env());
//! let jar = InMemoryCookieStore::new();
//!
//! manager.create(&jar, "user-123", "user@example.com").await?;
//! let session = manager.read_ambient(&jar).await;
//! ```

pub mod config;
pub mod jwt;
pub mod secret;
pub mod session;

#[cfg(feature = "axum_support")]
pub mod api;

pub use config::Environment;
pub use secret::SigningKey;
pub use session::{Session, SessionConfig, SessionManager};

/// Errors produced by the session layer.
///
/// Only [`AuthError::Signing`] and [`AuthError::CookieWrite`] ever escape
/// [`SessionManager::create`]. Read operations swallow every variant and
/// report "no session" instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("failed to sign session token: {0}")]
    Signing(String),
    #[error("failed to write session cookie: {0}")]
    CookieWrite(String),
    #[error("invalid token")]
    TokenInvalid,
    #[error("token has expired")]
    TokenExpired,
    #[error("not authenticated")]
    Unauthenticated,
    #[error("configuration error: {0}")]
    Configuration(String),
}
