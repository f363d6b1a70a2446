//! Resource call-sites.

use crate::failure::GatewayResult;
use crate::http::Gateway;
use crate::models::{
    CreateResourceRequest, DeployContainerRequest, ExecCommandRequest, ExecCommandResponse,
    Resource, ResourceAction, ResourceActionRequest, ResourceLogs, UpdateResourceRequest,
};
use crate::services::call_site::{segment, CallSite};

#[derive(Debug, Clone)]
pub struct ResourceService {
    call: CallSite,
}

impl ResourceService {
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

    pub async fn list(&self) -> GatewayResult<Vec<Resource>> {
        self.call.get_json("/resources").await
    }

    pub async fn list_by_group(&self, group_id: &str) -> GatewayResult<Vec<Resource>> {
        self.call
            .get_json(&format!("/resource-groups/{}/resources", segment(group_id)))
            .await
    }

    pub async fn get(&self, id: &str) -> GatewayResult<Resource> {
        self.call.get_json(&format!("/resources/{}", segment(id))).await
    }

    pub async fn create(&self, request: &CreateResourceRequest) -> GatewayResult<Resource> {
        self.call.post_json("/resources", request).await
    }

    /// `None` when the backend answers 204.
    pub async fn update(
        &self,
        id: &str,
        request: &UpdateResourceRequest,
    ) -> GatewayResult<Option<Resource>> {
        self.call
            .put_optional_json(&format!("/resources/{}", segment(id)), request)
            .await
    }

    pub async fn delete(&self, id: &str) -> GatewayResult<()> {
        self.call.delete(&format!("/resources/{}", segment(id))).await
    }

    /// Start, stop or restart a resource; returns its updated state unless
    /// the backend answers 204.
    pub async fn perform_action(
        &self,
        id: &str,
        action: ResourceAction,
    ) -> GatewayResult<Option<Resource>> {
        self.call
            .post_optional_json(
                &format!("/resources/{}/action", segment(id)),
                &ResourceActionRequest { action },
            )
            .await
    }

    pub async fn deploy_container(&self, request: &DeployContainerRequest) -> GatewayResult<Resource> {
        self.call.post_json("/resources/deploy", request).await
    }

    pub async fn logs(&self, id: &str) -> GatewayResult<ResourceLogs> {
        self.call
            .get_json(&format!("/resources/{}/logs", segment(id)))
            .await
    }

    /// Run a command inside the resource's container.
    pub async fn exec(&self, id: &str, command: impl Into<String>) -> GatewayResult<ExecCommandResponse> {
        let body = ExecCommandRequest {
            command: command.into(),
        };
        self.call
            .post_json(&format!("/resources/{}/exec", segment(id)), &body)
            .await
    }
}
