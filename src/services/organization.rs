//! Organization and member call-sites.

use crate::failure::GatewayResult;
use crate::http::Gateway;
use crate::models::{
    CreateMemberRequest, Member, Organization, Role, UpdateMemberRequest, UpdateMemberRoleRequest,
    UpdateOrganizationRequest,
};
use crate::services::call_site::{segment, CallSite};

#[derive(Debug, Clone)]
pub struct OrganizationService {
    call: CallSite,
}

impl OrganizationService {
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

    pub async fn get(&self) -> GatewayResult<Organization> {
        self.call.get_json("/organization").await
    }

    pub async fn update(
        &self,
        request: &UpdateOrganizationRequest,
    ) -> GatewayResult<Option<Organization>> {
        self.call.put_optional_json("/organization", request).await
    }

    pub async fn roles(&self) -> GatewayResult<Vec<Role>> {
        self.call.get_json("/organization/roles").await
    }

    pub async fn list_users(&self) -> GatewayResult<Vec<Member>> {
        self.call.get_json("/organization/users").await
    }

    pub async fn get_user(&self, user_id: &str) -> GatewayResult<Member> {
        self.call
            .get_json(&format!("/organization/users/{}", segment(user_id)))
            .await
    }

    pub async fn create_user(&self, request: &CreateMemberRequest) -> GatewayResult<Member> {
        self.call.post_json("/organization/users", request).await
    }

    pub async fn update_user(
        &self,
        user_id: &str,
        request: &UpdateMemberRequest,
    ) -> GatewayResult<Option<Member>> {
        self.call
            .put_optional_json(&format!("/organization/users/{}", segment(user_id)), request)
            .await
    }

    pub async fn delete_user(&self, user_id: &str) -> GatewayResult<()> {
        self.call
            .delete(&format!("/organization/users/{}", segment(user_id)))
            .await
    }

    /// The backend answers with no useful body; only success matters.
    pub async fn update_user_role(
        &self,
        user_id: &str,
        request: &UpdateMemberRoleRequest,
    ) -> GatewayResult<()> {
        self.call
            .put_unit(&format!("/organization/users/{}/role", segment(user_id)), request)
            .await
    }
}
