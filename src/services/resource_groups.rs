//! Resource group call-sites.

use crate::failure::GatewayResult;
use crate::http::Gateway;
use crate::models::{CreateResourceGroupRequest, ResourceGroup, UpdateResourceGroupRequest};
use crate::services::call_site::{segment, CallSite};

#[derive(Debug, Clone)]
pub struct ResourceGroupService {
    call: CallSite,
}

impl ResourceGroupService {
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

    pub async fn list(&self) -> GatewayResult<Vec<ResourceGroup>> {
        self.call.get_json("/resource-groups").await
    }

    pub async fn get(&self, id: &str) -> GatewayResult<ResourceGroup> {
        self.call
            .get_json(&format!("/resource-groups/{}", segment(id)))
            .await
    }

    pub async fn create(&self, request: &CreateResourceGroupRequest) -> GatewayResult<ResourceGroup> {
        self.call.post_json("/resource-groups", request).await
    }

    pub async fn update(
        &self,
        id: &str,
        request: &UpdateResourceGroupRequest,
    ) -> GatewayResult<Option<ResourceGroup>> {
        self.call
            .put_optional_json(&format!("/resource-groups/{}", segment(id)), request)
            .await
    }

    pub async fn delete(&self, id: &str) -> GatewayResult<()> {
        self.call
            .delete(&format!("/resource-groups/{}", segment(id)))
            .await
    }
}
