//! HTTP request pipeline subsystem.
//!
//! # Data Flow
//! ```text
//! call-site
//!     → request.rs (OutboundRequest: path, method, headers, body, explicit token)
//!     → pipeline.rs (resolve token, merge headers, dispatch via reqwest)
//!         → 401: unauthorized.rs (cookie clear, session logout) → Unauthorized
//!         → transport error: NetworkError
//!         → anything else: reqwest::Response returned unchanged
//!     → call-site decodes with failure::normalizer
//! ```

pub mod pipeline;
pub mod request;
pub mod unauthorized;

pub use pipeline::{Gateway, GatewayError};
pub use request::{Method, OutboundRequest, RequestBody, X_REQUEST_ID};
pub use unauthorized::{UnauthorizedHandler, SET_AUTH_COOKIE_PATH};
