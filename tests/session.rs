//! Session manager behaviour against an in-memory cookie jar.
//!
//! Run with: `cargo test --test session`

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use cookie_session_auth::jwt::{JwtCodec, SessionClaims, TokenCodec};
use cookie_session_auth::session::{
    CookieStore, HeaderCookieJar, InMemoryCookieStore, SameSite, SessionCookie,
};
use cookie_session_auth::{AuthError, Environment, SessionConfig, SessionManager, SigningKey};

fn config() -> SessionConfig {
    SessionConfig::for_environment(
        Environment::Development,
        SigningKey::new("integration-test-secret"),
    )
}

fn manager() -> SessionManager {
    SessionManager::new(config())
}

/// Signs with the real codec but counts verification attempts.
#[derive(Clone)]
struct CountingCodec {
    inner: JwtCodec,
    verifications: Arc<AtomicUsize>,
}

impl CountingCodec {
    fn new() -> Self {
        Self {
            inner: JwtCodec::new(&config().signing_key),
            verifications: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn verifications(&self) -> usize {
        self.verifications.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenCodec for CountingCodec {
    async fn sign(&self, claims: &SessionClaims) -> Result<String, AuthError> {
        self.inner.sign(claims).await
    }

    async fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        self.verifications.fetch_add(1, Ordering::SeqCst);
        self.inner.verify(token).await
    }
}

struct FailingSigner;

#[async_trait]
impl TokenCodec for FailingSigner {
    async fn sign(&self, _claims: &SessionClaims) -> Result<String, AuthError> {
        Err(AuthError::Signing("JWT signing failed".to_owned()))
    }

    async fn verify(&self, _token: &str) -> Result<SessionClaims, AuthError> {
        Err(AuthError::TokenInvalid)
    }
}

struct FailingCookieStore;

#[async_trait]
impl CookieStore for FailingCookieStore {
    async fn get(&self, _name: &str) -> Option<String> {
        None
    }

    async fn set(&self, _cookie: SessionCookie) -> Result<(), AuthError> {
        Err(AuthError::CookieWrite("Cookie setting failed".to_owned()))
    }

    async fn delete(&self, _name: &str, _path: &str) {}
}

#[tokio::test]
async fn test_create_then_read_ambient() {
    let manager = manager();
    let store = InMemoryCookieStore::new();
    let before = Utc::now();

    manager.create(&store, "user-123", "user@example.com").await.unwrap();
    let after = Utc::now();

    let session = manager.read_ambient(&store).await.unwrap();
    assert_eq!(session.user_id, "user-123");
    assert_eq!(session.email, "user@example.com");
    assert!(session.expires_at >= before + Duration::days(7));
    assert!(session.expires_at <= after + Duration::days(7));
}

#[tokio::test]
async fn test_create_sets_cookie_attributes() {
    let manager = manager();
    let store = InMemoryCookieStore::new();

    let session = manager.create(&store, "user-123", "user@example.com").await.unwrap();

    let cookie = store.cookie_named("auth-token").unwrap();
    assert!(cookie.options.http_only);
    assert!(!cookie.options.secure);
    assert_eq!(cookie.options.same_site, SameSite::Lax);
    assert_eq!(cookie.options.path, "/");
    assert_eq!(cookie.options.expires, session.expires_at);
}

#[tokio::test]
async fn test_cookie_value_is_signed_token() {
    let manager = manager();
    let store = InMemoryCookieStore::new();

    manager.create(&store, "user-123", "user@example.com").await.unwrap();

    let value = store.get("auth-token").await.unwrap();
    assert_eq!(value.split('.').count(), 3);
    assert!(!value.contains("user@example.com"));

    let claims = JwtCodec::new(&config().signing_key).verify(&value).await.unwrap();
    assert_eq!(claims.exp - claims.iat, Duration::days(7).num_seconds());
    assert_eq!(claims.session.expires_at.timestamp(), claims.exp);
}

#[tokio::test]
async fn test_secure_flag_follows_environment() {
    let key = SigningKey::new("integration-test-secret");
    let production = SessionManager::new(SessionConfig::for_environment(
        Environment::Production,
        key.clone(),
    ));
    let development =
        SessionManager::new(SessionConfig::for_environment(Environment::Development, key));

    let prod_store = InMemoryCookieStore::new();
    let dev_store = InMemoryCookieStore::new();
    production.create(&prod_store, "user-123", "user@example.com").await.unwrap();
    development.create(&dev_store, "user-123", "user@example.com").await.unwrap();

    let prod_cookie = prod_store.cookie_named("auth-token").unwrap();
    let dev_cookie = dev_store.cookie_named("auth-token").unwrap();
    assert!(prod_cookie.options.secure);
    assert!(!dev_cookie.options.secure);
    assert_eq!(prod_cookie.options.http_only, dev_cookie.options.http_only);
    assert_eq!(prod_cookie.options.same_site, dev_cookie.options.same_site);
    assert_eq!(prod_cookie.options.path, dev_cookie.options.path);
}

#[tokio::test]
async fn test_read_ambient_without_cookie() {
    let codec = CountingCodec::new();
    let manager = SessionManager::with_codec(config(), codec.clone());

    assert!(manager.read_ambient(&InMemoryCookieStore::new()).await.is_none());
    assert_eq!(codec.verifications(), 0);
}

#[tokio::test]
async fn test_read_ambient_with_empty_cookie() {
    let codec = CountingCodec::new();
    let manager = SessionManager::with_codec(config(), codec.clone());
    let store = InMemoryCookieStore::new();
    store.insert_raw("auth-token", "");

    assert!(manager.read_ambient(&store).await.is_none());
    assert_eq!(codec.verifications(), 0);
}

#[tokio::test]
async fn test_read_ambient_with_invalid_token() {
    let codec = CountingCodec::new();
    let manager = SessionManager::with_codec(config(), codec.clone());
    let store = InMemoryCookieStore::new();
    store.insert_raw("auth-token", "invalid-jwt-token");

    assert!(manager.read_ambient(&store).await.is_none());
    assert_eq!(codec.verifications(), 1);
}

#[tokio::test]
async fn test_read_ambient_with_foreign_signature() {
    let forger = SessionManager::new(config().with_signing_key(SigningKey::new("other-key")));
    let store = InMemoryCookieStore::new();
    forger.create(&store, "admin", "admin@example.com").await.unwrap();

    assert!(manager().read_ambient(&store).await.is_none());
}

#[tokio::test]
async fn test_read_ambient_with_expired_token() {
    let manager = manager();
    let issued_at = Utc::now() - Duration::days(8);
    let claims = SessionClaims::issue(
        cookie_session_auth::Session::new("user-123", "user@example.com", issued_at + Duration::days(7)),
        issued_at,
        Duration::days(7),
    );
    let token = JwtCodec::new(&config().signing_key).sign(&claims).await.unwrap();

    let store = InMemoryCookieStore::new();
    store.insert_raw("auth-token", token);

    assert!(manager.read_ambient(&store).await.is_none());
}

#[tokio::test]
async fn test_destroy_removes_session() {
    let manager = manager();
    let store = InMemoryCookieStore::new();

    manager.create(&store, "user-123", "user@example.com").await.unwrap();
    assert!(manager.read_ambient(&store).await.is_some());

    manager.destroy(&store).await;
    assert!(store.get("auth-token").await.is_none());
    assert!(manager.read_ambient(&store).await.is_none());
}

#[tokio::test]
async fn test_destroy_without_session() {
    let manager = manager();
    let store = InMemoryCookieStore::new();

    manager.destroy(&store).await;
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_signing_failure_propagates_and_sets_no_cookie() {
    let manager = SessionManager::with_codec(config(), FailingSigner);
    let store = InMemoryCookieStore::new();

    let err = manager.create(&store, "user-123", "user@example.com").await.unwrap_err();

    assert_eq!(err, AuthError::Signing("JWT signing failed".to_owned()));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_cookie_write_failure_propagates() {
    let err = manager()
        .create(&FailingCookieStore, "user-123", "user@example.com")
        .await
        .unwrap_err();

    assert_eq!(err, AuthError::CookieWrite("Cookie setting failed".to_owned()));
}

#[tokio::test]
async fn test_read_from_request_round_trip() {
    let manager = manager();
    let store = InMemoryCookieStore::new();

    let issued = manager.create(&store, "u1", "a@b.com").await.unwrap();
    let value = store.get("auth-token").await.unwrap();

    let mut request_cookies = HashMap::new();
    request_cookies.insert("auth-token".to_owned(), value);

    let session = manager.read_from_request(&request_cookies).await.unwrap();
    assert_eq!(session, issued);
    assert_eq!(session.user_id, "u1");
    assert_eq!(session.email, "a@b.com");
}

#[tokio::test]
async fn test_read_from_request_headers() {
    let manager = manager();
    let store = InMemoryCookieStore::new();
    manager.create(&store, "u1", "a@b.com").await.unwrap();
    let value = store.get("auth-token").await.unwrap();

    let request = http::Request::builder()
        .header(http::header::COOKIE, format!("theme=dark; auth-token={value}"))
        .body(())
        .unwrap();

    let session = manager.read_from_request(&request).await.unwrap();
    assert_eq!(session.user_id, "u1");
}

#[tokio::test]
async fn test_read_from_request_without_or_empty_cookie() {
    let codec = CountingCodec::new();
    let manager = SessionManager::with_codec(config(), codec.clone());

    let mut cookies = HashMap::new();
    assert!(manager.read_from_request(&cookies).await.is_none());

    cookies.insert("auth-token".to_owned(), String::new());
    assert!(manager.read_from_request(&cookies).await.is_none());
    assert_eq!(codec.verifications(), 0);

    cookies.insert("auth-token".to_owned(), "garbage".to_owned());
    assert!(manager.read_from_request(&cookies).await.is_none());
    assert_eq!(codec.verifications(), 1);
}

#[tokio::test]
async fn test_special_characters_and_long_ids() {
    let manager = manager();
    let store = InMemoryCookieStore::new();
    let long_id = "a".repeat(100);

    manager.create(&store, &long_id, "test+tag@example.co.uk").await.unwrap();

    let session = manager.read_ambient(&store).await.unwrap();
    assert_eq!(session.user_id, long_id);
    assert_eq!(session.email, "test+tag@example.co.uk");
}

#[tokio::test]
async fn test_header_jar_round_trip() {
    let manager = manager();

    let login_jar = HeaderCookieJar::new();
    manager.create(&login_jar, "u1", "a@b.com").await.unwrap();
    let mut response_headers = http::HeaderMap::new();
    login_jar.write_to(&mut response_headers);

    // the browser echoes name=value back on the next request
    let set_cookie = response_headers
        .get(http::header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    let pair = set_cookie.split(';').next().unwrap();
    let mut request_headers = http::HeaderMap::new();
    request_headers.insert(http::header::COOKIE, pair.parse().unwrap());

    let next_jar = HeaderCookieJar::from_headers(&request_headers);
    let session = manager.read_ambient(&next_jar).await.unwrap();
    assert_eq!(session.user_id, "u1");

    manager.destroy(&next_jar).await;
    assert!(manager.read_ambient(&next_jar).await.is_none());
    assert_eq!(next_jar.set_cookie_values().len(), 1);
}

#[tokio::test]
async fn test_destroy_uses_configured_path() {
    let manager = SessionManager::new(config().with_path("/app"));

    let login_jar = HeaderCookieJar::new();
    manager.create(&login_jar, "u1", "a@b.com").await.unwrap();
    let issued = login_jar.set_cookie_values();
    assert!(issued[0].to_str().unwrap().contains("Path=/app"));

    let pair = issued[0].to_str().unwrap().split(';').next().unwrap().to_owned();
    let mut request_headers = http::HeaderMap::new();
    request_headers.insert(http::header::COOKIE, pair.parse().unwrap());
    let logout_jar = HeaderCookieJar::from_headers(&request_headers);

    manager.destroy(&logout_jar).await;

    let removals = logout_jar.set_cookie_values();
    assert_eq!(removals.len(), 1);
    let removal = removals[0].to_str().unwrap();
    assert!(removal.starts_with("auth-token=;"));
    assert!(removal.contains("Path=/app"));
    assert!(removal.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_destroy_in_memory_with_custom_path() {
    let manager = SessionManager::new(config().with_path("/app"));
    let store = InMemoryCookieStore::new();

    manager.create(&store, "u1", "a@b.com").await.unwrap();
    manager.destroy(&store).await;

    assert!(store.is_empty());
}

#[tokio::test]
async fn test_duplicate_cookie_reads_agree() {
    let manager = manager();
    let store = InMemoryCookieStore::new();
    let issued = manager.create(&store, "u1", "a@b.com").await.unwrap();
    let value = store.get("auth-token").await.unwrap();

    let mut headers = http::HeaderMap::new();
    headers.insert(
        http::header::COOKIE,
        format!("auth-token={value}; auth-token=stale").parse().unwrap(),
    );

    let from_request = manager.read_from_request(&headers).await;
    let ambient = manager
        .read_ambient(&HeaderCookieJar::from_headers(&headers))
        .await;

    assert_eq!(from_request, Some(issued));
    assert_eq!(ambient, from_request);
}
