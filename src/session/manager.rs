//! Issue, read and delete the session cookie.

use chrono::Utc;

use super::store::{CookieSource, CookieStore};
use super::{Session, SessionConfig, SessionCookie};
use crate::AuthError;
use crate::jwt::{JwtCodec, SessionClaims, TokenCodec};

/// Issues, reads, verifies and deletes the signed session cookie.
///
/// Issuance errors propagate to the caller. Read paths never fail: a
/// missing, empty, malformed, forged or expired token all read as `None`.
#[derive(Debug, Clone)]
pub struct SessionManager<C = JwtCodec> {
    codec: C,
    config: SessionConfig,
}

impl SessionManager<JwtCodec> {
    /// Creates a manager signing HS256 tokens with the configured key.
    pub fn new(config: SessionConfig) -> Self {
        let codec = JwtCodec::new(&config.signing_key);
        Self { codec, config }
    }
}

impl<C: TokenCodec> SessionManager<C> {
    /// Creates a manager around a custom token codec.
    pub fn with_codec(config: SessionConfig, codec: C) -> Self {
        Self { codec, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Issues a session for `user_id` and stores it in `store`.
    ///
    /// # Returns
    ///
    /// - `Ok(session)` - cookie written, session valid for the configured lifetime
    /// - `Err(AuthError::Signing)` - token could not be signed, no cookie written
    /// - `Err(AuthError::CookieWrite)` - the store rejected the cookie
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "create_session", skip_all, err)
    )]
    pub async fn create<S>(&self, store: &S, user_id: &str, email: &str) -> Result<Session, AuthError>
    where
        S: CookieStore + ?Sized,
    {
        let now = Utc::now();
        let expires_at = now + self.config.session_lifetime;
        let session = Session::new(user_id, email, expires_at);
        let claims = SessionClaims::issue(session.clone(), now, self.config.session_lifetime);

        let token = self.codec.sign(&claims).await.map_err(|e| {
            log::error!(
                target: "cookie_session_auth::session",
                "msg=\"session signing failed\" error=\"{e}\""
            );
            e
        })?;

        store
            .set(SessionCookie::new(&self.config, token, expires_at))
            .await?;

        log::info!(
            target: "cookie_session_auth::session",
            "msg=\"session created\" expires_at=\"{}\"",
            expires_at.to_rfc3339()
        );

        Ok(session)
    }

    /// Reads and verifies the session cookie from the ambient jar.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "read_session", skip_all)
    )]
    pub async fn read_ambient<S>(&self, store: &S) -> Option<Session>
    where
        S: CookieStore + ?Sized,
    {
        let token = store.get(&self.config.cookie_name).await;
        self.verify(token.as_deref()).await
    }

    /// Reads and verifies the session cookie sent with `request`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "verify_request_session", skip_all)
    )]
    pub async fn read_from_request<R>(&self, request: &R) -> Option<Session>
    where
        R: CookieSource + ?Sized,
    {
        let token = request.cookie(&self.config.cookie_name);
        self.verify(token.as_deref()).await
    }

    /// Removes the session cookie from the ambient jar.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "destroy_session", skip_all)
    )]
    pub async fn destroy<S>(&self, store: &S)
    where
        S: CookieStore + ?Sized,
    {
        store
            .delete(&self.config.cookie_name, &self.config.cookie_path)
            .await;

        log::info!(
            target: "cookie_session_auth::session",
            "msg=\"session destroyed\""
        );
    }

    async fn verify(&self, token: Option<&str>) -> Option<Session> {
        let token = token.filter(|t| !t.is_empty())?;

        match self.codec.verify(token).await {
            Ok(claims) => Some(claims.into_session()),
            Err(e) => {
                log::debug!(
                    target: "cookie_session_auth::session",
                    "msg=\"session token rejected\" reason=\"{e}\" token_prefix=\"{}...\"",
                    token.chars().take(8).collect::<String>()
                );
                None
            }
        }
    }
}
