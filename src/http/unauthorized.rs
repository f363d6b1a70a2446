//! Session teardown after a 401.
//!
//! # Sequence
//! ```text
//! 401 observed by the pipeline
//!     → spawn cookie clear (POST /api/set-auth-cookie {"token": null})
//!     → SessionStore::logout()
//!         → SignInRedirect observer navigates (if registered)
//!     → pipeline returns Unauthorized to the caller
//! ```
//!
//! # Design Decisions
//! - The cookie clear is a detached task: never awaited, failures only logged
//! - No deduplication: concurrent 401s each run the sequence, and every step
//!   tolerates repetition

use reqwest::Client;
use serde_json::json;
use tokio::task::JoinHandle;

use crate::http::request::X_REQUEST_ID;
use crate::observability::metrics;
use crate::session::SessionStore;

/// Path of the side channel that clears the server-issued auth cookie.
pub const SET_AUTH_COOKIE_PATH: &str = "/api/set-auth-cookie";

/// Runs the logout sequence for a rejected request.
#[derive(Clone)]
pub struct UnauthorizedHandler {
    client: Client,
    cookie_url: String,
    session: SessionStore,
}

impl UnauthorizedHandler {
    pub fn new(client: Client, cookie_base_url: &str, session: SessionStore) -> Self {
        Self {
            client,
            cookie_url: format!("{}{}", cookie_base_url.trim_end_matches('/'), SET_AUTH_COOKIE_PATH),
            session,
        }
    }

    /// URL the cookie clear is sent to.
    pub fn cookie_url(&self) -> &str {
        &self.cookie_url
    }

    /// Clear the cookie in the background and log the session out.
    ///
    /// Returns the handle of the detached cookie task; dropping it does not
    /// cancel the task.
    pub fn handle(&self, request_id: &str) -> JoinHandle<()> {
        tracing::info!(request_id = %request_id, "Handling unauthorized access - logging out user");
        metrics::record_unauthorized();

        let clear = self.clear_auth_cookie(request_id);
        self.session.logout();
        clear
    }

    /// Fire-and-forget request asking the server to drop its auth cookie.
    pub fn clear_auth_cookie(&self, request_id: &str) -> JoinHandle<()> {
        let client = self.client.clone();
        let url = self.cookie_url.clone();
        let request_id = request_id.to_string();

        tokio::spawn(async move {
            let result = client
                .post(&url)
                .header(X_REQUEST_ID, request_id.as_str())
                .json(&json!({ "token": null }))
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!(request_id = %request_id, "Auth cookie cleared");
                }
                Ok(response) => {
                    tracing::warn!(
                        request_id = %request_id,
                        status = response.status().as_u16(),
                        "Auth cookie endpoint returned non-success status"
                    );
                }
                Err(e) => {
                    tracing::error!(request_id = %request_id, error = %e, "Failed to clear auth cookie");
                }
            }
        })
    }
}

impl std::fmt::Debug for UnauthorizedHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnauthorizedHandler")
            .field("cookie_url", &self.cookie_url)
            .finish()
    }
}
