//! The session cookie and its attributes.

use chrono::{DateTime, Utc};
use cookie::Cookie;
use time::OffsetDateTime;

use super::{SameSite, SessionConfig};
use crate::AuthError;

/// Attributes written alongside the session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
    pub expires: DateTime<Utc>,
    pub path: String,
}

/// A cookie the session manager asks a [`CookieStore`](super::CookieStore)
/// to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub options: CookieOptions,
}

impl SessionCookie {
    /// Builds the session cookie for `token`, expiring at `expires`.
    pub fn new(config: &SessionConfig, token: String, expires: DateTime<Utc>) -> Self {
        Self {
            name: config.cookie_name.clone(),
            value: token,
            options: CookieOptions {
                http_only: config.cookie_http_only,
                secure: config.cookie_secure,
                same_site: config.cookie_same_site,
                expires,
                path: config.cookie_path.clone(),
            },
        }
    }

    /// Renders this cookie for a `Set-Cookie` header.
    ///
    /// `Expires` is truncated to whole seconds.
    pub fn to_cookie(&self) -> Result<Cookie<'static>, AuthError> {
        let expires = OffsetDateTime::from_unix_timestamp(self.options.expires.timestamp())
            .map_err(|e| AuthError::CookieWrite(format!("invalid cookie expiry: {e}")))?;

        Ok(Cookie::build((self.name.clone(), self.value.clone()))
            .path(self.options.path.clone())
            .secure(self.options.secure)
            .http_only(self.options.http_only)
            .same_site(self.options.same_site.into())
            .expires(expires)
            .build())
    }
}
