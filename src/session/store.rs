//! Cookie access seams.
//!
//! [`CookieStore`] is the ambient, request-scoped jar the manager reads and
//! writes. [`CookieSource`] is the read-only cookie view of an inbound
//! request.

use std::collections::HashMap;

use async_trait::async_trait;
use cookie::Cookie;
use http::HeaderMap;
use http::header::COOKIE;

use super::SessionCookie;
use crate::AuthError;

/// Per-request cookie jar supplied by the hosting framework.
///
/// Implementations:
/// - [`InMemoryCookieStore`](super::InMemoryCookieStore): in-memory jar for tests
/// - [`HeaderCookieJar`](super::HeaderCookieJar): jar over request/response headers
#[async_trait]
pub trait CookieStore: Send + Sync {
    /// Returns the value of cookie `name`, if present.
    async fn get(&self, name: &str) -> Option<String>;

    /// Writes `cookie`, replacing any cookie with the same name.
    async fn set(&self, cookie: SessionCookie) -> Result<(), AuthError>;

    /// Removes cookie `name` scoped to `path`. Removing a missing cookie is
    /// not an error.
    async fn delete(&self, name: &str, path: &str);
}

/// Read-only access to the cookies of an inbound request.
pub trait CookieSource {
    fn cookie(&self, name: &str) -> Option<String>;
}

impl CookieSource for HeaderMap {
    fn cookie(&self, name: &str) -> Option<String> {
        self.get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(Cookie::split_parse)
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == name)
            .map(|cookie| cookie.value().to_owned())
    }
}

impl<B> CookieSource for http::Request<B> {
    fn cookie(&self, name: &str) -> Option<String> {
        self.headers().cookie(name)
    }
}

impl CookieSource for http::request::Parts {
    fn cookie(&self, name: &str) -> Option<String> {
        self.headers.cookie(name)
    }
}

impl CookieSource for HashMap<String, String> {
    fn cookie(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<T: CookieSource + ?Sized> CookieSource for &T {
    fn cookie(&self, name: &str) -> Option<String> {
        (**self).cookie(name)
    }
}
