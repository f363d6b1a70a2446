//! Marketplace template DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceTemplate {
    pub id: String,
    pub template_id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub category: String,
    pub resource_type: String,
    #[serde(default)]
    pub configuration: Value,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub install_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallTemplateRequest {
    pub template_id: String,
    pub name: String,
    pub resource_group_id: String,
}
