use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use super::handlers;
use crate::SessionManager;

#[derive(Clone)]
pub struct SessionState {
    pub manager: Arc<SessionManager>,
}

impl SessionState {
    pub fn new(manager: SessionManager) -> Self {
        Self {
            manager: Arc::new(manager),
        }
    }
}

/// `GET /session` returns the current session, `DELETE /session` logs out
pub fn session_routes<S>() -> Router<S>
where
    SessionState: axum::extract::FromRef<S>,
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        "/session",
        get(handlers::current_session).delete(handlers::delete_session),
    )
}
