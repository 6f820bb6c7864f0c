#![allow(
    clippy::print_stdout,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items
)]

//! Axum Cookie Session Server Example
//!
//! Issues a signed `auth-token` cookie on login and reads it back on every
//! request. Reads `JWT_SECRET` and `APP_ENV` from the environment (or a
//! `.env` file); without `JWT_SECRET` the development key is used.
//!
//! Run with: `cargo run --example axum_session_server --features axum_support`
//!
//! Test endpoints:
//!   curl -i -c jar.txt -X POST http://localhost:8080/login \
//!     -H "Content-Type: application/json" \
//!     -d '{"userId": "user-123", "email": "user@example.com"}'
//!
//!   curl -b jar.txt http://localhost:8080/session
//!
//!   curl -i -b jar.txt -X DELETE http://localhost:8080/session

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use cookie_session_auth::api::axum::{AppError, SessionState, session_routes, start_session};
use cookie_session_auth::session::HeaderCookieJar;
use cookie_session_auth::{Session, SessionConfig, SessionManager};
use serde::Deserialize;
use tokio::net::TcpListener;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest {
    user_id: String,
    email: String,
}

// A real application verifies credentials before issuing the session.
async fn login(
    State(state): State<SessionState>,
    jar: HeaderCookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(HeaderCookieJar, Json<Session>), AppError> {
    start_session(&state, jar, &body.user_id, &body.email).await
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = SessionConfig::from_env();
    if let Err(e) = config.validate() {
        println!("warning: {e}");
    }

    let state = SessionState::new(SessionManager::new(config));

    let app = Router::new()
        .route("/login", post(login))
        .merge(session_routes::<SessionState>())
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:8080").await.unwrap();
    println!("Listening on http://127.0.0.1:8080");
    axum::serve(listener, app).await.unwrap();
}
