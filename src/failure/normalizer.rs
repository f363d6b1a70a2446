//! Response normalization.
//!
//! # Responsibilities
//! - Turn a non-success response into exactly one `NormalizedFailure`
//! - Decode successful bodies into typed values
//!
//! # Design Decisions
//! - Content-type decides whether JSON parsing is attempted at all
//! - Normalization never fails: unreadable bodies fall back to the status text
//! - 204 and empty bodies decode to `None`, never to a parse error

use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::failure::types::{GatewayResult, NormalizedFailure};

/// Message for a 401 that arrived as a non-JSON page.
pub const REAUTHENTICATE_MESSAGE: &str = "Not authenticated. Please log in again.";

const BODY_SNIPPET_CHARS: usize = 200;

/// Returns true if the content type denotes a JSON payload.
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| {
            let essence = ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
            essence == "application/json" || essence.ends_with("+json")
        })
        .unwrap_or(false)
}

/// Human-readable text for a status code.
pub fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| generic_message(status))
}

fn generic_message(status: StatusCode) -> String {
    format!("Request failed with status {}", status.as_u16())
}

/// Classify a non-success response from its parts.
pub fn classify(status: StatusCode, content_type: Option<&str>, body: &[u8]) -> NormalizedFailure {
    if is_json_content_type(content_type) {
        let message = match serde_json::from_slice::<Value>(body) {
            Ok(value) => extract_message(&value).unwrap_or_else(|| status_text(status)),
            Err(e) => {
                tracing::debug!(status = status.as_u16(), error = %e, "Error body claimed JSON but failed to parse");
                status_text(status)
            }
        };
        return NormalizedFailure::from_status(status, message);
    }

    tracing::debug!(
        status = status.as_u16(),
        content_type = content_type.unwrap_or("none"),
        body = %snippet(body),
        "Non-JSON error response"
    );

    let message = if status == StatusCode::UNAUTHORIZED {
        REAUTHENTICATE_MESSAGE.to_string()
    } else {
        generic_message(status)
    };
    NormalizedFailure::from_status(status, message)
}

fn extract_message(value: &Value) -> Option<String> {
    ["error", "message"].iter().find_map(|field| {
        value
            .get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

fn snippet(body: &[u8]) -> String {
    String::from_utf8_lossy(body).chars().take(BODY_SNIPPET_CHARS).collect()
}

/// Decode a successful response body from its parts.
///
/// Returns `Ok(None)` for 204 and for empty bodies.
pub fn decode<T: DeserializeOwned>(
    status: StatusCode,
    content_type: Option<&str>,
    body: &[u8],
) -> GatewayResult<Option<T>> {
    if status == StatusCode::NO_CONTENT || body.is_empty() {
        return Ok(None);
    }

    if let Some(ct) = content_type {
        if !is_json_content_type(Some(ct)) {
            return Err(NormalizedFailure::malformed(
                status,
                format!("Expected JSON response but got: {ct}"),
            ));
        }
    }

    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| NormalizedFailure::malformed(status, format!("Invalid JSON response: {e}")))
}

fn content_type(response: &Response) -> Option<String> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Convert a non-success response into a failure. Never fails.
pub async fn normalize(response: Response) -> NormalizedFailure {
    let status = response.status();
    let content_type = content_type(&response);
    let body = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(status = status.as_u16(), error = %e, "Failed to read error body");
            Default::default()
        }
    };
    classify(status, content_type.as_deref(), &body)
}

async fn success_body(response: Response) -> GatewayResult<(StatusCode, Option<String>, Vec<u8>)> {
    let status = response.status();
    if !status.is_success() {
        return Err(normalize(response).await);
    }
    let content_type = content_type(&response);
    let body = response
        .bytes()
        .await
        .map_err(|e| NormalizedFailure::network(&e))?;
    Ok((status, content_type, body.to_vec()))
}

/// Decode a JSON body, treating 204/empty as an explicit absent value.
pub async fn read_optional_json<T: DeserializeOwned>(response: Response) -> GatewayResult<Option<T>> {
    let (status, content_type, body) = success_body(response).await?;
    decode(status, content_type.as_deref(), &body)
}

/// Decode a JSON body that must be present.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
    let status = response.status();
    read_optional_json(response).await?.ok_or_else(|| {
        NormalizedFailure::malformed(status, "Expected a JSON body but the response was empty")
    })
}

/// Check for success and discard the body.
pub async fn expect_success(response: Response) -> GatewayResult<()> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(normalize(response).await)
    }
}

/// Return the raw body text of a successful response.
pub async fn read_text(response: Response) -> GatewayResult<String> {
    let (_, _, body) = success_body(response).await?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}
