use chrono::Duration;

use crate::config::{ENVIRONMENT_VAR, Environment};
use crate::secret::SECRET_ENV_VAR;
use crate::{AuthError, SigningKey};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "auth-token";

/// How long an issued session stays valid.
pub const SESSION_LIFETIME_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    None,
    #[default]
    Lax,
    Strict,
}

impl From<SameSite> for cookie::SameSite {
    fn from(value: SameSite) -> Self {
        match value {
            SameSite::None => cookie::SameSite::None,
            SameSite::Lax => cookie::SameSite::Lax,
            SameSite::Strict => cookie::SameSite::Strict,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub cookie_path: String,
    pub cookie_secure: bool,
    pub cookie_http_only: bool,
    pub cookie_same_site: SameSite,
    pub session_lifetime: Duration,
    pub signing_key: SigningKey,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: SESSION_COOKIE_NAME.to_owned(),
            cookie_path: "/".to_owned(),
            cookie_secure: false,
            cookie_http_only: true,
            cookie_same_site: SameSite::Lax,
            session_lifetime: Duration::days(SESSION_LIFETIME_DAYS),
            signing_key: SigningKey::development(),
        }
    }
}

impl SessionConfig {
    /// Default settings for `environment`, signing with `signing_key`.
    ///
    /// Cookies are marked `Secure` only in production.
    pub fn for_environment(environment: Environment, signing_key: SigningKey) -> Self {
        Self {
            cookie_secure: environment.is_production(),
            signing_key,
            ..Default::default()
        }
    }

    /// Loads `JWT_SECRET` and `APP_ENV` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// A missing secret selects the development key, even in production.
    /// That case is logged as a warning; use [`SessionConfig::validate`] to
    /// refuse it instead.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_value(lookup(ENVIRONMENT_VAR).as_deref());
        let signing_key = SigningKey::from_optional(lookup(SECRET_ENV_VAR));

        if signing_key.is_development_fallback() {
            if environment.is_production() {
                log::warn!(
                    target: "cookie_session_auth::config",
                    "msg=\"{SECRET_ENV_VAR} not set, signing sessions with the development key in production\""
                );
            } else {
                log::debug!(
                    target: "cookie_session_auth::config",
                    "msg=\"{SECRET_ENV_VAR} not set, using development key\""
                );
            }
        }

        Self::for_environment(environment, signing_key)
    }

    #[must_use]
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    /// Path the session cookie is scoped to, for issuance and removal.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.cookie_path = path.into();
        self
    }

    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    #[must_use]
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.session_lifetime = lifetime;
        self
    }

    #[must_use]
    pub fn with_signing_key(mut self, key: SigningKey) -> Self {
        self.signing_key = key;
        self
    }

    /// Strict check for deployments that must not run on the fallback key.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.cookie_name.is_empty() {
            return Err(AuthError::Configuration(
                "cookie_name must not be empty".to_owned(),
            ));
        }
        if self.session_lifetime <= Duration::zero() {
            return Err(AuthError::Configuration(
                "session_lifetime must be positive".to_owned(),
            ));
        }
        if self.cookie_secure && self.signing_key.is_development_fallback() {
            return Err(AuthError::Configuration(format!(
                "{SECRET_ENV_VAR} must be set in production"
            )));
        }
        Ok(())
    }
}
