//! Failure normalization subsystem.
//!
//! # Data Flow
//! ```text
//! reqwest::Response (non-2xx) or transport error
//!     → normalizer.rs (inspect content-type, status, body)
//!     → NormalizedFailure { status_code, message, kind }
//!     → returned to the call-site's caller
//! ```
//!
//! # Design Decisions
//! - Only 401 is handled centrally (by the pipeline); every other kind is
//!   classified at the call-site with the helpers here
//! - One failure per response; the normalizer itself never errors

pub mod normalizer;
pub mod types;

pub use normalizer::{
    classify, expect_success, normalize, read_json, read_optional_json, read_text,
    REAUTHENTICATE_MESSAGE,
};
pub use types::{FailureKind, GatewayResult, NormalizedFailure};
