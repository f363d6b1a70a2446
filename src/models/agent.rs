//! Host agent DTOs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Online,
    Offline,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub hostname: String,
    pub agent_version: String,
    pub os_type: String,
    pub os_version: String,
    pub status: AgentStatus,
    pub last_heartbeat: String,
    #[serde(default)]
    pub tags: Option<HashMap<String, String>>,
    #[serde(default)]
    pub capabilities: Option<Vec<String>>,
    #[serde(default)]
    pub organization_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// One metrics sample reported by an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMetrics {
    pub id: String,
    pub agent_id: String,
    pub timestamp: String,
    pub cpu_usage_percent: f64,
    pub memory_usage_percent: f64,
    pub memory_total_bytes: u64,
    pub memory_used_bytes: u64,
    pub disk_usage_percent: f64,
    pub disk_total_bytes: u64,
    pub disk_used_bytes: u64,
    #[serde(default)]
    pub network_rx_bytes: Option<u64>,
    #[serde(default)]
    pub network_tx_bytes: Option<u64>,
    #[serde(default)]
    pub custom_metrics: Option<HashMap<String, Value>>,
}
