//! Request-scoped cookie jar over HTTP headers.

use std::sync::Mutex;

use async_trait::async_trait;
use cookie::{Cookie, CookieJar};
use http::header::{COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderValue};

use super::SessionCookie;
use super::store::{CookieSource, CookieStore};
use crate::AuthError;

/// Cookie jar seeded from a request's `Cookie` header.
///
/// Writes and deletions are tracked as a delta and rendered as
/// `Set-Cookie` values for the response. Reads see the request cookies with
/// the delta applied.
#[derive(Debug, Default)]
pub struct HeaderCookieJar {
    jar: Mutex<CookieJar>,
}

impl HeaderCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the jar with the cookies in the `Cookie` headers of `headers`.
    ///
    /// When a name repeats, the first occurrence wins, matching
    /// [`CookieSource`] on a [`HeaderMap`].
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut jar = CookieJar::new();
        for value in headers.get_all(COOKIE).iter().filter_map(|v| v.to_str().ok()) {
            for cookie in Cookie::split_parse(value).filter_map(Result::ok) {
                if jar.get(cookie.name()).is_none() {
                    jar.add_original(cookie.into_owned());
                }
            }
        }

        Self {
            jar: Mutex::new(jar),
        }
    }

    /// `Set-Cookie` header values for every cookie added or removed.
    pub fn set_cookie_values(&self) -> Vec<HeaderValue> {
        let Ok(jar) = self.jar.lock() else {
            return Vec::new();
        };

        jar.delta()
            .filter_map(|cookie| match HeaderValue::from_str(&cookie.to_string()) {
                Ok(value) => Some(value),
                Err(_) => {
                    log::warn!(
                        target: "cookie_session_auth::session",
                        "msg=\"dropping unrepresentable set-cookie header\" cookie=\"{}\"",
                        cookie.name()
                    );
                    None
                }
            })
            .collect()
    }

    /// Appends the pending `Set-Cookie` headers to `headers`.
    pub fn write_to(&self, headers: &mut HeaderMap) {
        for value in self.set_cookie_values() {
            headers.append(SET_COOKIE, value);
        }
    }
}

#[async_trait]
impl CookieStore for HeaderCookieJar {
    async fn get(&self, name: &str) -> Option<String> {
        self.cookie(name)
    }

    async fn set(&self, cookie: SessionCookie) -> Result<(), AuthError> {
        let cookie = cookie.to_cookie()?;
        self.jar
            .lock()
            .map_err(|_| AuthError::CookieWrite("Lock poisoned".to_owned()))?
            .add(cookie);

        Ok(())
    }

    async fn delete(&self, name: &str, path: &str) {
        if let Ok(mut jar) = self.jar.lock() {
            jar.remove(Cookie::build((name.to_owned(), "")).path(path.to_owned()));
        }
    }
}

impl CookieSource for HeaderCookieJar {
    fn cookie(&self, name: &str) -> Option<String> {
        self.jar
            .lock()
            .ok()?
            .get(name)
            .map(|cookie| cookie.value().to_owned())
    }
}

#[cfg(feature = "axum_support")]
mod axum_support {
    use std::convert::Infallible;

    use axum::extract::FromRequestParts;
    use axum::http::request::Parts;
    use axum::response::{IntoResponseParts, ResponseParts};

    use super::HeaderCookieJar;

    impl<S> FromRequestParts<S> for HeaderCookieJar
    where
        S: Send + Sync,
    {
        type Rejection = Infallible;

        async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
            Ok(Self::from_headers(&parts.headers))
        }
    }

    impl IntoResponseParts for HeaderCookieJar {
        type Error = Infallible;

        fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
            self.write_to(res.headers_mut());
            Ok(res)
        }
    }
}
