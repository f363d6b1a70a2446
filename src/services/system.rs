//! Host information call-sites.

use crate::failure::GatewayResult;
use crate::http::Gateway;
use crate::models::{SystemInfo, SystemMetrics, SystemMetricsEnvelope};
use crate::services::call_site::CallSite;

#[derive(Debug, Clone)]
pub struct SystemService {
    call: CallSite,
}

impl SystemService {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            call: CallSite::new(gateway),
        }
    }

    pub fn with_token(self, token: impl Into<String>) -> Self {
        Self {
            call: self.call.with_token(token),
        }
    }

    pub async fn info(&self) -> GatewayResult<SystemInfo> {
        self.call.get_json("/system/info").await
    }

    pub async fn metrics(&self) -> GatewayResult<SystemMetrics> {
        let envelope: SystemMetricsEnvelope = self.call.get_json("/system/metrics").await?;
        Ok(envelope.metrics)
    }
}
