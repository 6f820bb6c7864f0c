mod error;
mod handlers;
mod middleware;
mod routes;

pub use error::AppError;
pub use handlers::start_session;
pub use middleware::{CurrentSession, MaybeSession};
pub use routes::{SessionState, session_routes};
