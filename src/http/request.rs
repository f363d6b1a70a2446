//! Outbound request model and header assembly.
//!
//! # Responsibilities
//! - Describe one call (path, method, headers, body, optional explicit token)
//! - Merge caller headers with pipeline headers (request ID, content-type,
//!   authorization)
//!
//! # Design Decisions
//! - Authorization is written last and replaces any caller-supplied value
//! - JSON bodies get `application/json` unless the caller chose a content-type
//! - Multipart bodies leave content-type to the transport (boundary)

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use serde::Serialize;

use crate::failure::{FailureKind, NormalizedFailure};

/// Header carrying the per-dispatch correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// HTTP methods the backend exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Request payload.
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Serialized JSON document.
    Json(Vec<u8>),
    Text(String),
    /// File-carrying form; the transport sets the boundary.
    Multipart(Form),
}

/// One call to the backend, before authorization is attached.
#[derive(Debug)]
pub struct OutboundRequest {
    pub path: String,
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    /// Bypasses the session lookup when set.
    pub explicit_token: Option<String>,
}

impl OutboundRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            headers: Vec::new(),
            body: RequestBody::Empty,
            explicit_token: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Add a caller header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Serialize `body` as the JSON payload.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, serde_json::Error> {
        self.body = RequestBody::Json(serde_json::to_vec(body)?);
        Ok(self)
    }

    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = RequestBody::Text(body.into());
        self
    }

    pub fn multipart(mut self, form: Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// Use `token` instead of the session's token, when present.
    pub fn with_token(mut self, token: Option<&str>) -> Self {
        self.explicit_token = token.map(str::to_string);
        self
    }

    /// Correlation ID supplied by the caller, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(X_REQUEST_ID))
            .map(|(_, value)| value.as_str())
    }
}

fn invalid_header(name: &str, detail: impl std::fmt::Display) -> NormalizedFailure {
    NormalizedFailure::new(
        0,
        format!("Invalid request header '{name}': {detail}"),
        FailureKind::NetworkError,
    )
}

/// Assemble the final header set for a dispatch.
pub fn build_headers(
    caller: &[(String, String)],
    token: Option<&str>,
    request_id: &str,
    body: &RequestBody,
) -> Result<HeaderMap, NormalizedFailure> {
    let mut headers = HeaderMap::new();

    for (name, value) in caller {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid_header(name, e))?;
        let header_value = HeaderValue::from_str(value).map_err(|e| invalid_header(name, e))?;
        headers.insert(header_name, header_value);
    }

    if !headers.contains_key(X_REQUEST_ID) {
        let value = HeaderValue::from_str(request_id).map_err(|e| invalid_header(X_REQUEST_ID, e))?;
        headers.insert(X_REQUEST_ID, value);
    }

    if matches!(body, RequestBody::Json(_)) && !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| invalid_header("authorization", e))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_bearer_attached_when_token_present() {
        let headers = build_headers(&[], Some("T1"), "req-1", &RequestBody::Empty).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer T1");
        assert_eq!(headers.get(X_REQUEST_ID).unwrap(), "req-1");
    }

    #[test]
    fn test_no_authorization_without_token() {
        let headers = build_headers(&[], None, "req-1", &RequestBody::Empty).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_pipeline_authorization_wins_over_caller() {
        let headers = build_headers(
            &caller(&[("Authorization", "Bearer caller"), ("X-Trace", "abc")]),
            Some("session"),
            "req-1",
            &RequestBody::Empty,
        )
        .unwrap();
        let values: Vec<_> = headers.get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values, vec!["Bearer session"]);
        assert_eq!(headers.get("x-trace").unwrap(), "abc");
    }

    #[test]
    fn test_caller_authorization_kept_without_token() {
        let headers = build_headers(
            &caller(&[("Authorization", "Bearer caller")]),
            None,
            "req-1",
            &RequestBody::Empty,
        )
        .unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer caller");
    }

    #[test]
    fn test_json_content_type_defaulted() {
        let headers = build_headers(&[], None, "req-1", &RequestBody::Json(b"{}".to_vec())).unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");

        let headers = build_headers(
            &caller(&[("Content-Type", "application/merge-patch+json")]),
            None,
            "req-1",
            &RequestBody::Json(b"{}".to_vec()),
        )
        .unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/merge-patch+json");
    }

    #[test]
    fn test_text_body_has_no_default_content_type() {
        let headers = build_headers(&[], None, "req-1", &RequestBody::Text("hi".into())).unwrap();
        assert!(headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_caller_request_id_preserved() {
        let request = OutboundRequest::get("/resources").header("X-Request-ID", "mine");
        assert_eq!(request.request_id(), Some("mine"));
        let headers = build_headers(&request.headers, None, "generated", &request.body).unwrap();
        assert_eq!(headers.get(X_REQUEST_ID).unwrap(), "mine");
    }

    #[test]
    fn test_invalid_header_rejected() {
        let err = build_headers(&caller(&[("bad header", "x")]), None, "req-1", &RequestBody::Empty)
            .unwrap_err();
        assert_eq!(err.kind, FailureKind::NetworkError);
        assert!(err.message.starts_with("Invalid request header 'bad header'"));
    }

    #[test]
    fn test_json_builder_and_explicit_token() {
        let request = OutboundRequest::post("/budgets")
            .json(&serde_json::json!({ "month": "2025-01" }))
            .unwrap()
            .with_token(Some("T2"));
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.explicit_token.as_deref(), Some("T2"));
        match request.body {
            RequestBody::Json(bytes) => assert_eq!(bytes, br#"{"month":"2025-01"}"#.to_vec()),
            other => panic!("unexpected body {other:?}"),
        }
    }
}
