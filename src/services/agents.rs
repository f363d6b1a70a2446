//! Host agent call-sites.

use crate::failure::GatewayResult;
use crate::http::Gateway;
use crate::models::{Agent, AgentMetrics};
use crate::services::call_site::{segment, CallSite};

/// Samples returned when the caller does not pick a limit.
pub const DEFAULT_METRICS_LIMIT: u32 = 100;

#[derive(Debug, Clone)]
pub struct AgentService {
    call: CallSite,
}

impl AgentService {
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

    pub async fn list(&self) -> GatewayResult<Vec<Agent>> {
        self.call.get_json("/agents").await
    }

    pub async fn get(&self, agent_id: &str) -> GatewayResult<Agent> {
        self.call
            .get_json(&format!("/agents/{}", segment(agent_id)))
            .await
    }

    /// Most recent samples for an agent, at most `limit` of them
    /// (`DEFAULT_METRICS_LIMIT` when unset).
    pub async fn metrics(
        &self,
        agent_id: &str,
        limit: Option<u32>,
    ) -> GatewayResult<Vec<AgentMetrics>> {
        let limit = limit.unwrap_or(DEFAULT_METRICS_LIMIT);
        self.call
            .get_json(&format!("/agents/{}/metrics?limit={limit}", segment(agent_id)))
            .await
    }
}
