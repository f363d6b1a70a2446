//! The authenticated request pipeline.
//!
//! # Responsibilities
//! - Resolve the bearer token (explicit override, else session)
//! - Merge headers and dispatch against the normalized base endpoint
//! - Include cookies alongside the bearer header
//! - Intercept 401 responses and tear the session down
//! - Wrap transport failures as `NetworkError`
//!
//! # Design Decisions
//! - Every domain call goes through `Gateway::dispatch`
//! - Only 401 is interpreted here; other statuses are returned as-is so that
//!   call-sites can decode JSON, text or binary payloads themselves
//! - No retries, no caching; in-flight siblings of a 401 are not cancelled

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::multipart::Form;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use url::Url;
use uuid::Uuid;

use crate::config::GatewayConfig;
use crate::failure::{FailureKind, GatewayResult, NormalizedFailure};
use crate::http::request::{build_headers, OutboundRequest, RequestBody};
use crate::http::unauthorized::UnauthorizedHandler;
use crate::observability::metrics;
use crate::session::SessionStore;

/// Errors raised while constructing a gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

struct GatewayInner {
    client: Client,
    base_url: String,
    session: SessionStore,
    unauthorized: UnauthorizedHandler,
}

/// Shared handle to the request pipeline.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<GatewayInner>,
}

impl Gateway {
    /// Build the transport from configuration and wire it to `session`.
    pub fn new(config: &GatewayConfig, session: SessionStore) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(config.api.user_agent.clone())
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .build()?;

        Self::with_client(client, &config.api.base_url, &config.api.cookie_base_url, session)
    }

    /// Wire an existing transport client to `session`.
    pub fn with_client(
        client: Client,
        base_url: &str,
        cookie_base_url: &str,
        session: SessionStore,
    ) -> Result<Self, GatewayError> {
        let base_url = normalize_base_url(base_url)?;
        let cookie_base_url = normalize_base_url(cookie_base_url)?;
        let unauthorized = UnauthorizedHandler::new(client.clone(), &cookie_base_url, session.clone());

        tracing::debug!(base_url = %base_url, cookie_url = %unauthorized.cookie_url(), "Gateway initialized");

        Ok(Self {
            inner: Arc::new(GatewayInner {
                client,
                base_url,
                session,
                unauthorized,
            }),
        })
    }

    /// The session this gateway reads tokens from and logs out on 401.
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Absolute URL for a request path.
    pub fn endpoint(&self, path: &str) -> String {
        join_url(&self.inner.base_url, path)
    }

    /// Dispatch a request.
    pub async fn dispatch(&self, request: OutboundRequest) -> GatewayResult<Response> {
        self.dispatch_with_cancel(request, &CancellationToken::new()).await
    }

    /// Dispatch a request that can be abandoned through `cancel`.
    ///
    /// Cancellation yields a `NetworkError` and leaves the session untouched.
    pub async fn dispatch_with_cancel(
        &self,
        request: OutboundRequest,
        cancel: &CancellationToken,
    ) -> GatewayResult<Response> {
        let started = Instant::now();
        let request_id = request
            .request_id()
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let OutboundRequest {
            path,
            method,
            headers,
            body,
            explicit_token,
        } = request;

        let token = explicit_token.or_else(|| self.inner.session.token());
        let url = self.endpoint(&path);

        tracing::debug!(
            request_id = %request_id,
            method = method.as_str(),
            path = %path,
            has_token = token.is_some(),
            "Making request"
        );
        if token.is_none() {
            tracing::warn!(request_id = %request_id, path = %path, "No token found to attach to request");
        }

        let headers = build_headers(&headers, token.as_deref(), &request_id, &body)?;
        let builder = self.inner.client.request(method.into(), &url).headers(headers);
        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(bytes) => builder.body(bytes),
            RequestBody::Text(text) => builder.body(text),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(request_id = %request_id, path = %path, "Request cancelled");
                metrics::record_transport_error(method.as_str());
                return Err(NormalizedFailure::cancelled());
            }
            result = builder.send() => result,
        };

        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(request_id = %request_id, path = %path, error = %e, "API request failed");
                metrics::record_transport_error(method.as_str());
                return Err(NormalizedFailure::network(&e));
            }
        };

        let status = response.status();
        metrics::record_request(method.as_str(), status.as_u16(), started);
        tracing::info!(
            request_id = %request_id,
            path = %path,
            status = status.as_u16(),
            elapsed_ms = elapsed_millis(started),
            "Received response"
        );

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(request_id = %request_id, path = %path, "Received 401 Unauthorized, logging out user");
            // Detached; the cookie task outlives this call.
            let _ = self.inner.unauthorized.handle(&request_id);
            return Err(NormalizedFailure::unauthorized());
        }

        Ok(response)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> GatewayResult<Response> {
        self.dispatch(OutboundRequest::get(path).with_token(token)).await
    }

    /// POST `body` as JSON.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> GatewayResult<Response> {
        let request = OutboundRequest::post(path)
            .json(body)
            .map_err(encode_failure)?
            .with_token(token);
        self.dispatch(request).await
    }

    /// PUT `body` as JSON.
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> GatewayResult<Response> {
        let request = OutboundRequest::put(path)
            .json(body)
            .map_err(encode_failure)?
            .with_token(token);
        self.dispatch(request).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> GatewayResult<Response> {
        self.dispatch(OutboundRequest::delete(path).with_token(token)).await
    }

    /// POST a multipart form; the transport picks the boundary.
    pub async fn post_multipart(
        &self,
        path: &str,
        form: Form,
        token: Option<&str>,
    ) -> GatewayResult<Response> {
        self.dispatch(OutboundRequest::post(path).multipart(form).with_token(token))
            .await
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.inner.base_url)
            .field("session", &self.inner.session)
            .finish()
    }
}

fn encode_failure(error: serde_json::Error) -> NormalizedFailure {
    NormalizedFailure::new(
        0,
        format!("Failed to encode request body: {error}"),
        FailureKind::MalformedResponse,
    )
}

/// Milliseconds since `started`, saturating at `u64::MAX`.
fn elapsed_millis(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Validate an http(s) base URL and strip trailing slashes.
fn normalize_base_url(raw: &str) -> Result<String, GatewayError> {
    let invalid = |reason: String| GatewayError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let parsed = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

/// Join a normalized base URL and a request path with exactly one slash.
fn join_url(base: &str, path: &str) -> String {
    if path.is_empty() {
        base.to_string()
    } else if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://h/api", "/resources"), "http://h/api/resources");
        assert_eq!(join_url("http://h/api", "resources"), "http://h/api/resources");
        assert_eq!(join_url("http://h/api", ""), "http://h/api");
        assert_eq!(
            join_url("http://h/api", "/invoices?month=2025-01"),
            "http://h/api/invoices?month=2025-01"
        );
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("http://h/api/").unwrap(), "http://h/api");
        assert_eq!(normalize_base_url("https://h").unwrap(), "https://h");
        assert!(matches!(
            normalize_base_url("ftp://h"),
            Err(GatewayError::InvalidBaseUrl { .. })
        ));
        assert!(normalize_base_url("/relative").is_err());
    }

    #[test]
    fn test_elapsed_millis_measures_wall_time() {
        let started = Instant::now() - Duration::from_millis(1500);
        let elapsed = elapsed_millis(started);
        assert!((1500..60_000).contains(&elapsed));
    }

    #[test]
    fn test_gateway_from_default_config() {
        let gateway = Gateway::new(&GatewayConfig::default(), SessionStore::new()).unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:8080/api");
        assert_eq!(gateway.endpoint("/resources"), "http://localhost:8080/api/resources");
    }

    #[test]
    fn test_gateway_shares_session() {
        let session = SessionStore::new();
        let gateway = Gateway::new(&GatewayConfig::default(), session.clone()).unwrap();
        session.login(crate::session::Identity::new("u1", "a"), "T1");
        assert_eq!(gateway.session().token().as_deref(), Some("T1"));
    }
}
