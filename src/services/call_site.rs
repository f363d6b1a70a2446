//! Shared plumbing for typed call-sites.

use reqwest::multipart::Form;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::failure::{self, GatewayResult};
use crate::http::{Gateway, OutboundRequest};

/// A gateway handle plus the token override every call from a service uses.
#[derive(Debug, Clone)]
pub struct CallSite {
    gateway: Gateway,
    token: Option<String>,
}

impl CallSite {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            token: None,
        }
    }

    /// Send `token` instead of the session's token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        let response = self.gateway.get(path, self.token()).await?;
        failure::read_json(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> GatewayResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.gateway.post(path, body, self.token()).await?;
        failure::read_json(response).await
    }

    /// POST that the backend may answer with 204.
    pub async fn post_optional_json<B, T>(&self, path: &str, body: &B) -> GatewayResult<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.gateway.post(path, body, self.token()).await?;
        failure::read_optional_json(response).await
    }

    /// PUT that the backend may answer with 204.
    pub async fn put_optional_json<B, T>(&self, path: &str, body: &B) -> GatewayResult<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.gateway.put(path, body, self.token()).await?;
        failure::read_optional_json(response).await
    }

    /// POST without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        let request = OutboundRequest::post(path).with_token(self.token());
        let response = self.gateway.dispatch(request).await?;
        failure::read_json(response).await
    }

    /// POST whose response body is ignored.
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> GatewayResult<()> {
        let response = self.gateway.post(path, body, self.token()).await?;
        failure::expect_success(response).await
    }

    /// PUT whose response body is ignored.
    pub async fn put_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> GatewayResult<()> {
        let response = self.gateway.put(path, body, self.token()).await?;
        failure::expect_success(response).await
    }

    pub async fn delete(&self, path: &str) -> GatewayResult<()> {
        let response = self.gateway.delete(path, self.token()).await?;
        failure::expect_success(response).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> GatewayResult<T> {
        let response = self.gateway.post_multipart(path, form, self.token()).await?;
        failure::read_json(response).await
    }
}

/// Percent-encode one path segment.
pub fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// `?month=<month>` with the month percent-encoded.
pub fn month_query(month: &str) -> String {
    format!("?month={}", urlencoding::encode(month))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_escapes_reserved_characters() {
        assert_eq!(segment("abc-123"), "abc-123");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
        assert_eq!(segment("2025-01"), "2025-01");
    }

    #[test]
    fn test_month_query() {
        assert_eq!(month_query("2025-01"), "?month=2025-01");
        assert_eq!(month_query("2025 01"), "?month=2025%2001");
    }
}
