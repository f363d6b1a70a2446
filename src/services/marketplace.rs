//! Marketplace call-sites.

use serde_json::{json, Value};

use crate::failure::GatewayResult;
use crate::http::Gateway;
use crate::models::{InstallTemplateRequest, MarketplaceTemplate};
use crate::services::call_site::{segment, CallSite};

#[derive(Debug, Clone)]
pub struct MarketplaceService {
    call: CallSite,
}

impl MarketplaceService {
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

    pub async fn list(&self) -> GatewayResult<Vec<MarketplaceTemplate>> {
        self.call.get_json("/marketplace/templates").await
    }

    pub async fn popular(&self) -> GatewayResult<Vec<MarketplaceTemplate>> {
        self.call.get_json("/marketplace/templates/popular").await
    }

    pub async fn get(&self, template_id: &str) -> GatewayResult<MarketplaceTemplate> {
        self.call
            .get_json(&format!("/marketplace/templates/{}", segment(template_id)))
            .await
    }

    /// Create a resource from a template. The result shape depends on the
    /// template, so it is returned untyped.
    pub async fn install(&self, request: &InstallTemplateRequest) -> GatewayResult<Option<Value>> {
        self.call.post_optional_json("/marketplace/install", request).await
    }

    /// Load the built-in template catalogue.
    pub async fn seed(&self) -> GatewayResult<Option<Value>> {
        self.call.post_optional_json("/marketplace/seed", &json!({})).await
    }
}
