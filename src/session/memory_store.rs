//! In-memory cookie jar.
//!
//! Stands in for the framework's request-scoped jar in tests and scripts.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::store::{CookieSource, CookieStore};
use super::{CookieOptions, SameSite, SessionCookie};
use crate::AuthError;

/// In-memory cookie jar.
///
/// Cookies are keyed by name. Clones share the same underlying map, so a
/// test can hand one clone to the manager and inspect another.
#[derive(Clone, Default)]
pub struct InMemoryCookieStore {
    cookies: Arc<RwLock<HashMap<String, SessionCookie>>>,
}

impl InMemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the jar with a raw cookie value, as if sent by the browser.
    pub fn insert_raw(&self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let cookie = SessionCookie {
            name: name.clone(),
            value: value.into(),
            options: CookieOptions {
                http_only: false,
                secure: false,
                same_site: SameSite::default(),
                expires: DateTime::<Utc>::MAX_UTC,
                path: "/".to_owned(),
            },
        };
        if let Ok(mut cookies) = self.cookies.write() {
            cookies.insert(name, cookie);
        }
    }

    /// Returns the full cookie stored under `name`, attributes included.
    pub fn cookie_named(&self, name: &str) -> Option<SessionCookie> {
        self.cookies.read().ok()?.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.cookies.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CookieStore for InMemoryCookieStore {
    async fn get(&self, name: &str) -> Option<String> {
        self.cookie_named(name).map(|cookie| cookie.value)
    }

    async fn set(&self, cookie: SessionCookie) -> Result<(), AuthError> {
        self.cookies
            .write()
            .map_err(|_| AuthError::CookieWrite("Lock poisoned".to_owned()))?
            .insert(cookie.name.clone(), cookie);

        Ok(())
    }

    async fn delete(&self, name: &str, path: &str) {
        if let Ok(mut cookies) = self.cookies.write() {
            // a browser only drops the cookie when the paths match
            if cookies.get(name).is_some_and(|cookie| cookie.options.path == path) {
                cookies.remove(name);
            }
        }
    }
}

impl CookieSource for InMemoryCookieStore {
    fn cookie(&self, name: &str) -> Option<String> {
        self.cookie_named(name).map(|cookie| cookie.value)
    }
}
