//! Account settings call-sites for the signed-in user.

use crate::failure::GatewayResult;
use crate::http::Gateway;
use crate::models::{
    ChangeEmailRequest, ChangePasswordRequest, Profile, TwoFactorCode, TwoFactorSetup,
};
use crate::services::call_site::CallSite;

#[derive(Debug, Clone)]
pub struct SettingsService {
    call: CallSite,
}

impl SettingsService {
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

    pub async fn profile(&self) -> GatewayResult<Profile> {
        self.call.get_json("/profile").await
    }

    /// Start two-factor enrollment. Nothing is enabled until `enable_two_factor`.
    pub async fn setup_two_factor(&self) -> GatewayResult<TwoFactorSetup> {
        tracing::info!("Setting up 2FA");
        self.call.post_empty("/2fa/setup").await
    }

    pub async fn enable_two_factor(&self, code: impl Into<String>) -> GatewayResult<()> {
        tracing::info!("Enabling 2FA");
        let body = TwoFactorCode { code: code.into() };
        self.call.post_unit("/2fa/enable", &body).await
    }

    pub async fn disable_two_factor(&self, code: impl Into<String>) -> GatewayResult<()> {
        tracing::info!("Disabling 2FA");
        let body = TwoFactorCode { code: code.into() };
        self.call.post_unit("/2fa/disable", &body).await
    }

    pub async fn change_password(
        &self,
        old_password: impl Into<String>,
        new_password: impl Into<String>,
    ) -> GatewayResult<()> {
        let body = ChangePasswordRequest {
            old_password: old_password.into(),
            new_password: new_password.into(),
        };
        self.call.post_unit("/change-password", &body).await
    }

    pub async fn change_email(&self, new_email: impl Into<String>) -> GatewayResult<()> {
        let body = ChangeEmailRequest {
            new_email: new_email.into(),
        };
        self.call.post_unit("/change-email", &body).await
    }
}
