//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): completed dispatches by method, status
//! - `gateway_request_duration_seconds` (histogram): round-trip latency
//! - `gateway_transport_errors_total` (counter): dispatches that never got a response
//! - `gateway_unauthorized_total` (counter): 401 responses that tore down the session
//! - `gateway_session_transitions_total` (counter): session store transitions

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a dispatch that received a response.
pub fn record_request(method: &'static str, status: u16, started: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "method" => method,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("gateway_request_duration_seconds", "method" => method)
        .record(started.elapsed().as_secs_f64());
}

/// Record a dispatch that failed before a response arrived.
pub fn record_transport_error(method: &'static str) {
    metrics::counter!("gateway_transport_errors_total", "method" => method).increment(1);
}

/// Record a 401 that triggered session teardown.
pub fn record_unauthorized() {
    metrics::counter!("gateway_unauthorized_total").increment(1);
}

/// Record a session store transition (init, login, logout, loading).
pub fn record_session_transition(transition: &'static str) {
    metrics::counter!("gateway_session_transitions_total", "transition" => transition).increment(1);
}
