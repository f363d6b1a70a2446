//! Organization, role and member DTOs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrganizationRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_system_role: bool,
}

/// A user belonging to the organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub role_id: String,
    pub role_name: String,
    #[serde(default)]
    pub force_password_change: bool,
    #[serde(default)]
    pub two_factor_enabled: bool,
    pub joined_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMemberRequest {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
    pub role_id: String,
    pub force_password_change: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMemberRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_password_change: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMemberRoleRequest {
    pub role_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_member_keeps_null_email() {
        let request = CreateMemberRequest {
            username: "ops".to_string(),
            email: None,
            password: "pw".to_string(),
            role_id: "viewer".to_string(),
            force_password_change: true,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json["email"].is_null());
        assert_eq!(json["force_password_change"], true);
    }
}
