//! ChatVerse HTTP client: the request pipeline
//!
//! Each dispatch runs an ordered pipeline with early returns:
//! rate limit, auth header, cache read (GET only), transport, status
//! classification, envelope normalization, cache write (GET only), cache
//! invalidation (mutating verbs only). Exactly one of normalized data,
//! cached data, or a classified error comes out of every call. No retries
//! happen at this layer.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::SessionStore;
use crate::cache::{CacheConfig, CachedPayload, RequestCache, cache_key};
use crate::client::envelope::{self, ApiResponse};
use crate::error::{ApiError, Result};

/// ChatVerse API base URL
const API_BASE_URL: &str = "https://api.chatverse.io/api/v1";

/// Fixed overall request timeout; requests that exceed it fail outright.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client-side rate limit: 8 requests per second
const RATE_LIMIT_PER_SECOND: u32 = 8;

/// Client identifier the backend expects after the bearer token
const BEARER_CLIENT_SUFFIX: &str = "cv-web-2024";

/// Endpoints whose 401s pass through so callers can show inline errors.
/// A 401 anywhere else force-clears the session.
const AUTH_PASSTHROUGH_PATHS: &[&str] = &["/users/login", "/users/register"];

fn is_auth_path(path: &str) -> bool {
    AUTH_PASSTHROUGH_PATHS.contains(&path)
}

fn is_mutating(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// ChatVerse API client
pub struct ChatVerseClient {
    http: HttpClient,
    base_url: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    session: Arc<SessionStore>,
    /// Present only when the caching runtime mode is enabled.
    cache: Option<RequestCache>,
    /// Forced sign-outs performed by this client (401 outside auth endpoints).
    forced_signouts: AtomicUsize,
}

impl ChatVerseClient {
    /// Create a client against the production API.
    pub fn new(session: Arc<SessionStore>, cache: CacheConfig) -> Result<Self> {
        Self::with_base_url(session, None, cache)
    }

    /// Create a client with an optional base URL override.
    pub fn with_base_url(
        session: Arc<SessionStore>,
        base_url: Option<String>,
        cache: CacheConfig,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(
            std::num::NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap_or(std::num::NonZeroU32::MIN),
        );

        Ok(Self {
            http,
            base_url: base_url.unwrap_or_else(|| API_BASE_URL.to_string()),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
            session,
            cache: cache.enabled.then(|| RequestCache::new(cache.ttl)),
            forced_signouts: AtomicUsize::new(0),
        })
    }

    /// The session store this client reads tokens from.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Number of forced sign-outs this client has performed.
    #[cfg(test)]
    pub fn forced_signouts(&self) -> usize {
        self.forced_signouts.load(Ordering::SeqCst)
    }

    /// Run one request through the pipeline.
    pub(crate) async fn dispatch(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        body: Option<&Value>,
    ) -> std::result::Result<ApiResponse<Value>, ApiError> {
        self.rate_limiter.until_ready().await;

        // Cache probe (GET only, caching mode only)
        let key = self
            .cache
            .as_ref()
            .map(|_| cache_key(method.as_str(), path, params, body));
        if method == Method::GET
            && let (Some(cache), Some(key)) = (&self.cache, &key)
            && let Some(hit) = cache.get(key)
        {
            log::debug!("Cache hit: GET {}", path);
            return Ok(ApiResponse {
                data: hit.data,
                message: hit.message,
                meta: hit.meta,
                success: true,
            });
        }

        // Build and send the real request
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);
        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(token) = self.session.token() {
            request = request.header(
                "Authorization",
                format!("Bearer {} {}", token, BEARER_CLIENT_SUFFIX),
            );
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();

        // Auth failure anywhere outside login/registration clears local
        // session state; the caller only ever sees SessionExpired.
        if status == StatusCode::UNAUTHORIZED && !is_auth_path(path) {
            if let Err(e) = self.session.clear() {
                log::warn!("Failed to clear session state: {}", e);
            }
            self.forced_signouts.fetch_add(1, Ordering::SeqCst);
            return Err(ApiError::SessionExpired);
        }

        if status.is_server_error() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| format!("HTTP {}", status));
            return Err(ApiError::Server(message));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        let value: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(e) if status.is_success() => {
                    return Err(ApiError::InvalidResponse(format!(
                        "Failed to parse response: {}",
                        e
                    )));
                }
                Err(_) if status == StatusCode::UNAUTHORIZED => {
                    return Err(ApiError::Unauthorized);
                }
                Err(_) => {
                    return Err(ApiError::Http {
                        status: status.as_u16(),
                        message: text,
                    });
                }
            }
        };

        // Non-envelope error statuses pass through unmodified
        if !status.is_success() && !envelope::is_envelope(&value) {
            if status == StatusCode::UNAUTHORIZED {
                return Err(ApiError::Unauthorized);
            }
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: text,
            });
        }

        let resp = envelope::normalize(status.as_u16(), value)?;

        // Cache write and invalidation only run for successful responses
        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            if method == Method::GET {
                cache.put(
                    key,
                    path,
                    CachedPayload {
                        data: resp.data.clone(),
                        message: resp.message.clone(),
                        meta: resp.meta.clone(),
                    },
                );
            } else if is_mutating(&method) {
                cache.invalidate_path(path);
            }
        }

        Ok(resp)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<ApiResponse<T>> {
        let resp = self.dispatch(Method::GET, path, params, None).await?;
        Ok(envelope::decode(resp)?)
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse<T>> {
        let resp = self.dispatch(Method::POST, path, &[], body).await?;
        Ok(envelope::decode(resp)?)
    }

    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<ApiResponse<T>> {
        let resp = self.dispatch(Method::PUT, path, &[], Some(body)).await?;
        Ok(envelope::decode(resp)?)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.dispatch(Method::DELETE, path, &[], None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;
    use tempfile::TempDir;

    fn session_with_token(token: Option<&str>) -> (Arc<SessionStore>, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open_at(&dir.path().join("session.yaml")).unwrap();
        if let Some(token) = token {
            store.set_token(token).unwrap();
        }
        (Arc::new(store), dir)
    }

    fn client_for(
        server: &mockito::ServerGuard,
        token: Option<&str>,
        cache: CacheConfig,
    ) -> (ChatVerseClient, TempDir) {
        let (session, dir) = session_with_token(token);
        let client = ChatVerseClient::with_base_url(session, Some(server.url()), cache).unwrap();
        (client, dir)
    }

    fn agents_body() -> String {
        json!({
            "success": true,
            "data": [{"agentId": "a-1", "name": "Support Bot"}],
            "message": "ok"
        })
        .to_string()
    }

    // Repeated GET within the TTL is served from cache: one upstream call,
    // identical payload, original message preserved.
    #[tokio::test]
    async fn test_get_cached_within_ttl() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/agents?page=1")
            .with_status(200)
            .with_body(agents_body())
            .expect(1)
            .create_async()
            .await;

        let (client, _dir) = client_for(&server, Some("tok"), CacheConfig::default());
        let params = [("page", "1".to_string())];

        let first = client
            .dispatch(Method::GET, "/agents", &params, None)
            .await
            .unwrap();
        assert!(first.success);
        assert_eq!(first.message.as_deref(), Some("ok"));
        assert_eq!(first.data, json!([{"agentId": "a-1", "name": "Support Bot"}]));

        let second = client
            .dispatch(Method::GET, "/agents", &params, None)
            .await
            .unwrap();
        assert_eq!(second.data, first.data);
        assert_eq!(second.message, first.message);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_ttl_elapsed_refetches() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/agents")
            .with_status(200)
            .with_body(agents_body())
            .expect(2)
            .create_async()
            .await;

        let cache = CacheConfig {
            enabled: true,
            ttl: Duration::from_millis(50),
        };
        let (client, _dir) = client_for(&server, Some("tok"), cache);

        client
            .dispatch(Method::GET, "/agents", &[], None)
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;
        client
            .dispatch(Method::GET, "/agents", &[], None)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_caching_mode_disabled_always_fetches() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/agents")
            .with_status(200)
            .with_body(agents_body())
            .expect(2)
            .create_async()
            .await;

        let cache = CacheConfig {
            enabled: false,
            ttl: Duration::from_secs(60),
        };
        let (client, _dir) = client_for(&server, Some("tok"), cache);

        client
            .dispatch(Method::GET, "/agents", &[], None)
            .await
            .unwrap();
        client
            .dispatch(Method::GET, "/agents", &[], None)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    // A successful mutation removes every cached entry whose path contains
    // the mutated path, including nested reads.
    #[tokio::test]
    async fn test_mutation_invalidates_matching_entries() {
        let mut server = mockito::Server::new_async().await;
        let list_mock = server
            .mock("GET", "/agents")
            .with_status(200)
            .with_body(agents_body())
            .expect(2)
            .create_async()
            .await;
        let sources_mock = server
            .mock("GET", "/agents/a-1/sources")
            .with_status(200)
            .with_body(json!({"success": true, "data": []}).to_string())
            .expect(2)
            .create_async()
            .await;
        let create_mock = server
            .mock("POST", "/agents")
            .with_status(200)
            .with_body(
                json!({"success": true, "data": {"agentId": "a-2", "name": "New"}}).to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let (client, _dir) = client_for(&server, Some("tok"), CacheConfig::default());

        // Prime both GET entries
        client
            .dispatch(Method::GET, "/agents", &[], None)
            .await
            .unwrap();
        client
            .dispatch(Method::GET, "/agents/a-1/sources", &[], None)
            .await
            .unwrap();

        // Mutation to /agents invalidates both (substring match)
        client
            .dispatch(Method::POST, "/agents", &[], Some(&json!({"name": "New"})))
            .await
            .unwrap();

        // Both reads hit the network again
        client
            .dispatch(Method::GET, "/agents", &[], None)
            .await
            .unwrap();
        client
            .dispatch(Method::GET, "/agents/a-1/sources", &[], None)
            .await
            .unwrap();

        list_mock.assert_async().await;
        sources_mock.assert_async().await;
        create_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_failure_envelope_rejects_with_original_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/agents")
            .with_status(200)
            .with_body(json!({"success": false, "message": "X"}).to_string())
            .create_async()
            .await;

        let (client, _dir) = client_for(&server, Some("tok"), CacheConfig::default());

        let err = client
            .dispatch(Method::POST, "/agents", &[], Some(&json!({})))
            .await
            .unwrap_err();
        match err {
            ApiError::Api { message, status } => {
                assert_eq!(message, "X");
                assert_eq!(status, 200);
            }
            other => panic!("expected ApiError::Api, got {:?}", other),
        }
    }

    // 401 from the login endpoint passes through untouched: no forced
    // sign-out, the stored token survives.
    #[tokio::test]
    async fn test_login_401_passes_through() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/users/login")
            .with_status(401)
            .with_body(json!({"success": false, "message": "Invalid credentials"}).to_string())
            .create_async()
            .await;

        let (client, _dir) = client_for(&server, Some("old-token"), CacheConfig::default());

        let err = client
            .dispatch(
                Method::POST,
                "/users/login",
                &[],
                Some(&json!({"email": "a@b.c", "password": "nope"})),
            )
            .await
            .unwrap_err();

        match err {
            ApiError::Api { message, status } => {
                assert_eq!(message, "Invalid credentials");
                assert_eq!(status, 401);
            }
            other => panic!("expected ApiError::Api, got {:?}", other),
        }
        assert_eq!(client.session().token().as_deref(), Some("old-token"));
        assert_eq!(client.forced_signouts(), 0);
    }

    // 401 anywhere else clears the session exactly once.
    #[tokio::test]
    async fn test_401_elsewhere_forces_signout_once() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/agents")
            .with_status(401)
            .with_body(json!({"success": false, "message": "expired"}).to_string())
            .create_async()
            .await;

        let (client, _dir) = client_for(&server, Some("stale-token"), CacheConfig::default());

        let err = client
            .dispatch(Method::GET, "/agents", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::SessionExpired));
        assert!(client.session().token().is_none());
        assert!(client.session().user().is_none());
        assert_eq!(client.forced_signouts(), 1);
    }

    #[tokio::test]
    async fn test_bearer_suffix_header_attached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/me")
            .match_header("authorization", "Bearer tok-123 cv-web-2024")
            .with_status(200)
            .with_body(
                json!({"success": true, "data": {"id": "u1", "email": "a@b.c"}}).to_string(),
            )
            .create_async()
            .await;

        let (client, _dir) = client_for(&server, Some("tok-123"), CacheConfig::default());
        client
            .dispatch(Method::GET, "/users/me", &[], None)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_no_token_sends_no_auth_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/agents")
            .match_header("authorization", mockito::Matcher::Missing)
            .with_status(200)
            .with_body(agents_body())
            .create_async()
            .await;

        let (client, _dir) = client_for(&server, None, CacheConfig::default());
        client
            .dispatch(Method::GET, "/agents", &[], None)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_legacy_body_passes_through() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/agents")
            .with_status(200)
            .with_body(json!([{"agentId": "a-1", "name": "Raw"}]).to_string())
            .create_async()
            .await;

        let (client, _dir) = client_for(&server, Some("tok"), CacheConfig::default());
        let resp = client
            .dispatch(Method::GET, "/agents", &[], None)
            .await
            .unwrap();

        assert!(resp.success);
        assert!(resp.message.is_none());
        assert_eq!(resp.data, json!([{"agentId": "a-1", "name": "Raw"}]));
    }

    #[tokio::test]
    async fn test_server_error_classified() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/agents")
            .with_status(503)
            .with_body("upstream down")
            .create_async()
            .await;

        let (client, _dir) = client_for(&server, Some("tok"), CacheConfig::default());
        let err = client
            .dispatch(Method::GET, "/agents", &[], None)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Server(_)));
    }

    #[tokio::test]
    async fn test_other_4xx_passes_through() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/agents/missing")
            .with_status(404)
            .with_body("no such agent")
            .create_async()
            .await;

        let (client, _dir) = client_for(&server, Some("tok"), CacheConfig::default());
        let err = client
            .dispatch(Method::GET, "/agents/missing", &[], None)
            .await
            .unwrap_err();

        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "no such agent");
            }
            other => panic!("expected ApiError::Http, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        let (session, _dir) = session_with_token(Some("tok"));
        // Nothing listens here
        let client = ChatVerseClient::with_base_url(
            session,
            Some("http://127.0.0.1:59999".to_string()),
            CacheConfig::default(),
        )
        .unwrap();

        let err = client
            .dispatch(Method::GET, "/agents", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_typed_get_decodes_data() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/agents")
            .with_status(200)
            .with_body(agents_body())
            .create_async()
            .await;

        let (client, _dir) = client_for(&server, Some("tok"), CacheConfig::default());
        let resp: ApiResponse<Vec<crate::client::models::Agent>> =
            client.get("/agents", &[]).await.unwrap();

        assert_eq!(resp.data.len(), 1);
        assert_eq!(resp.data[0].id, "a-1");
        assert_eq!(resp.data[0].name, "Support Bot");
    }

    #[tokio::test]
    async fn test_typed_get_error_converts_to_crate_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/agents")
            .with_status(200)
            .with_body(json!({"success": false, "message": "nope"}).to_string())
            .create_async()
            .await;

        let (client, _dir) = client_for(&server, Some("tok"), CacheConfig::default());
        let err = client
            .get::<Vec<crate::client::models::Agent>>("/agents", &[])
            .await
            .unwrap_err();

        match err {
            Error::Api(ApiError::Api { message, .. }) => assert_eq!(message, "nope"),
            other => panic!("expected Error::Api, got {:?}", other),
        }
    }
}
