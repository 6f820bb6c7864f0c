use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;

use super::error::AppError;
use super::routes::SessionState;
use crate::{AuthError, Session};

/// validates the session cookie and yields its claims, rejecting with 401
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl CurrentSession {
    pub fn into_inner(self) -> Session {
        self.0
    }

    pub fn user_id(&self) -> &str {
        &self.0.user_id
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl<S> FromRequestParts<S> for CurrentSession
where
    SessionState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = SessionState::from_ref(state);

        state
            .manager
            .read_from_request(&*parts)
            .await
            .map(CurrentSession)
            .ok_or(AppError(AuthError::Unauthenticated))
    }
}

/// like [`CurrentSession`] but never rejects
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<Session>);

impl<S> FromRequestParts<S> for MaybeSession
where
    SessionState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = SessionState::from_ref(state);
        Ok(MaybeSession(state.manager.read_from_request(&*parts).await))
    }
}
