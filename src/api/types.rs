use serde::{Deserialize, Serialize};

use crate::AuthError;

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        let code = match &err {
            AuthError::Signing(_) => "SIGNING_FAILED",
            AuthError::CookieWrite(_) => "COOKIE_WRITE_FAILED",
            AuthError::TokenInvalid => "TOKEN_INVALID",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::Unauthenticated => "UNAUTHENTICATED",
            AuthError::Configuration(_) => "CONFIGURATION_ERROR",
        };

        // internal details stay in the logs
        let error = match &err {
            AuthError::Signing(_) | AuthError::CookieWrite(_) | AuthError::Configuration(_) => {
                "Internal server error".to_owned()
            }
            _ => err.to_string(),
        };

        ErrorResponse {
            error,
            code: code.to_owned(),
        }
    }
}
