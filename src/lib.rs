//! Client-side gateway for the resource-management backend.
//!
//! Every domain call flows through one authenticated pipeline that attaches
//! the session's bearer token, tears the session down on 401 and normalizes
//! failures into a single typed shape.

pub mod config;
pub mod failure;
pub mod http;
pub mod models;
pub mod observability;
pub mod services;
pub mod session;

pub use config::GatewayConfig;
pub use failure::{FailureKind, GatewayResult, NormalizedFailure};
pub use http::{Gateway, OutboundRequest};
pub use session::{Identity, Session, SessionStore};
