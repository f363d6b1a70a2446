//! Subscription call-sites.

use crate::failure::GatewayResult;
use crate::http::Gateway;
use crate::models::{CreateSubscriptionRequest, Subscription, UpdateSubscriptionRequest};
use crate::services::call_site::{segment, CallSite};

#[derive(Debug, Clone)]
pub struct SubscriptionService {
    call: CallSite,
}

impl SubscriptionService {
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

    pub async fn list(&self) -> GatewayResult<Vec<Subscription>> {
        self.call.get_json("/subscriptions").await
    }

    pub async fn get(&self, id: &str) -> GatewayResult<Subscription> {
        self.call
            .get_json(&format!("/subscriptions/{}", segment(id)))
            .await
    }

    pub async fn create(&self, request: &CreateSubscriptionRequest) -> GatewayResult<Subscription> {
        self.call.post_json("/subscriptions", request).await
    }

    pub async fn update(
        &self,
        id: &str,
        request: &UpdateSubscriptionRequest,
    ) -> GatewayResult<Option<Subscription>> {
        self.call
            .put_optional_json(&format!("/subscriptions/{}", segment(id)), request)
            .await
    }

    pub async fn delete(&self, id: &str) -> GatewayResult<()> {
        self.call
            .delete(&format!("/subscriptions/{}", segment(id)))
            .await
    }
}
