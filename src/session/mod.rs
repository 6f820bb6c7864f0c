mod config;
mod cookie;
mod jar;
mod manager;
mod memory_store;
mod store;

use chrono::{DateTime, Utc};
pub use config::{SESSION_COOKIE_NAME, SESSION_LIFETIME_DAYS, SameSite, SessionConfig};
pub use cookie::{CookieOptions, SessionCookie};
pub use jar::HeaderCookieJar;
pub use manager::SessionManager;
pub use memory_store::InMemoryCookieStore;
use serde::{Deserialize, Serialize};
pub use store::{CookieSource, CookieStore};

/// The authenticated principal carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            expires_at,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}
