use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Session;

/// Claims embedded in a session token.
///
/// Serializes as `{ "userId", "email", "expiresAt", "iat", "exp" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(flatten)]
    pub session: Session,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

impl SessionClaims {
    /// Wraps `session` in an envelope issued at `issued_at` and expiring
    /// `lifetime` later.
    pub fn issue(session: Session, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        Self {
            session,
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
        }
    }

    pub fn into_session(self) -> Session {
        self.session
    }
}
