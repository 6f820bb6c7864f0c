//! HTTP handlers for Axum session endpoints.

use axum::Json;
use axum::extract::State;

use super::error::AppError;
use super::middleware::CurrentSession;
use super::routes::SessionState;
use crate::Session;
use crate::api::MessageResponse;
use crate::session::HeaderCookieJar;

/// Return the session carried by the request cookie.
///
/// GET /session
pub async fn current_session(CurrentSession(session): CurrentSession) -> Json<Session> {
    Json(session)
}

/// Remove the session cookie. Succeeds whether or not a session existed.
///
/// DELETE /session
pub async fn delete_session(
    State(state): State<SessionState>,
    jar: HeaderCookieJar,
) -> (HeaderCookieJar, Json<MessageResponse>) {
    state.manager.destroy(&jar).await;

    (
        jar,
        Json(MessageResponse {
            message: "Successfully logged out".to_owned(),
        }),
    )
}

/// Issue a session for an already authenticated principal.
///
/// For use inside an application's own login handler, after credentials
/// have been checked. Returns the jar to attach to the response.
pub async fn start_session(
    state: &SessionState,
    jar: HeaderCookieJar,
    user_id: &str,
    email: &str,
) -> Result<(HeaderCookieJar, Json<Session>), AppError> {
    let session = state.manager.create(&jar, user_id, email).await?;
    Ok((jar, Json(session)))
}
