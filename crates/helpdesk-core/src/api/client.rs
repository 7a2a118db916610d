//! API client for communicating with the helpdesk REST backend.
//!
//! This module provides the `ApiClient` struct. It owns the outbound stage
//! (bearer header from the session store) and the inbound stage (401 tears
//! the session down) and offers JSON helpers the services build on.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client, Method, Request, RequestBuilder, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::session::{SessionEvents, SessionExpired, SessionState, SessionStore};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the helpdesk backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling,
/// and the session store and event bus are shared.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    events: SessionEvents,
}

impl ApiClient {
    /// Create a client bound to `base_url` that reads its credential from `store`
    pub fn new(base_url: &str, store: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        Self::with_timeout(
            base_url,
            store,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn with_timeout(
        base_url: &str,
        store: Arc<dyn SessionStore>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
            events: SessionEvents::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    /// Register a callback run after a 401 has cleared the session
    pub fn on_session_expired<F>(&self, listener: F)
    where
        F: Fn(&SessionExpired) + Send + Sync + 'static,
    {
        self.events.subscribe(listener);
    }

    pub fn session_state(&self) -> SessionState {
        SessionState::of(self.store.as_ref())
    }

    /// Absolute URL for an API path such as `/tickets/4`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request against an API path.
    ///
    /// The returned [`ApiRequest`] can only be sent through
    /// [`ApiClient::execute`], so both stages always run.
    pub fn request(&self, method: Method, path: &str) -> ApiRequest {
        ApiRequest {
            builder: self.client.request(method, self.url(path)),
        }
    }

    // ===== Pipeline =====

    /// Run a request through the outbound stage, send it, and run the
    /// response through the inbound stage.
    pub async fn execute(&self, request: ApiRequest) -> Result<Response, ApiError> {
        let mut request = request
            .build()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.authorize(&mut request);

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "Sending request");

        let result = self.client.execute(request).await;
        self.inspect(&method, &url, result).await
    }

    /// Outbound stage: attach `Authorization: Bearer <token>`.
    ///
    /// A missing token still produces the header, with an empty credential.
    /// So does a stored token that cannot be a header value. Either way the
    /// request is sent, the backend rejects it and the inbound stage handles
    /// the 401.
    pub fn authorize(&self, request: &mut Request) {
        let token = self.store.token().unwrap_or_default();
        let mut value = match header::HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(value) => value,
            Err(_) => {
                warn!("Stored token is not a valid header value, sending an empty credential");
                header::HeaderValue::from_static("Bearer ")
            }
        };
        value.set_sensitive(true);
        request.headers_mut().insert(header::AUTHORIZATION, value);
    }

    /// Inbound stage: pass successes through, turn failures into `ApiError`.
    ///
    /// A 401 first clears the session store and emits `SessionExpired`.
    /// The error is returned to the caller in every case.
    async fn inspect(
        &self,
        method: &Method,
        url: &Url,
        result: reqwest::Result<Response>,
    ) -> Result<Response, ApiError> {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                debug!(%method, %url, error = %e, "Request failed without a response");
                return Err(ApiError::NetworkError(e));
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.expire_session(method, url);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(%method, %url, %status, "Request rejected");
        Err(ApiError::from_status(status, &body))
    }

    fn expire_session(&self, method: &Method, url: &Url) {
        warn!(%method, %url, "Session rejected by server, clearing local session");
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear session store, the stored session may survive a restart");
        }
        let notified = self
            .events
            .emit(&SessionExpired::new(method.as_str(), url.as_str()));
        debug!(listeners = notified, "Session expired event emitted");
    }

    // ===== JSON helpers =====

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let url = response.url().clone();
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", url, e))
        })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(self.request(Method::GET, path)).await?;
        Self::decode(response).await
    }

    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self
            .execute(self.request(Method::GET, path).query(query))
            .await?;
        Self::decode(response).await
    }

    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .execute(self.request(Method::POST, path).json(body))
            .await?;
        Self::decode(response).await
    }

    /// POST whose response body is ignored
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.execute(self.request(Method::POST, path).json(body))
            .await?;
        Ok(())
    }

    pub async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .execute(self.request(Method::PUT, path).json(body))
            .await?;
        Self::decode(response).await
    }

    pub async fn patch_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .execute(self.request(Method::PATCH, path).json(body))
            .await?;
        Self::decode(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}

/// A request bound to an [`ApiClient`], not yet sent.
///
/// Wraps a `reqwest::RequestBuilder` without exposing it: the only way to
/// send one is [`ApiClient::execute`].
#[must_use = "requests do nothing until passed to ApiClient::execute"]
#[derive(Debug)]
pub struct ApiRequest {
    builder: RequestBuilder,
}

impl ApiRequest {
    pub fn query<Q: Serialize + ?Sized>(self, query: &Q) -> Self {
        Self {
            builder: self.builder.query(query),
        }
    }

    pub fn json<B: Serialize + ?Sized>(self, body: &B) -> Self {
        Self {
            builder: self.builder.json(body),
        }
    }

    pub fn header(self, name: header::HeaderName, value: header::HeaderValue) -> Self {
        Self {
            builder: self.builder.header(name, value),
        }
    }

    pub(crate) fn build(self) -> reqwest::Result<Request> {
        self.builder.build()
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("state", &self.session_state())
            .finish_non_exhaustive()
    }
}
