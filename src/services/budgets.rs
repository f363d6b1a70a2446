//! Budget call-sites. Budgets are addressed by month (`YYYY-MM`).

use crate::failure::GatewayResult;
use crate::http::Gateway;
use crate::models::{Budget, BudgetOverview, CreateBudgetRequest, UpdateBudgetRequest};
use crate::services::call_site::{segment, CallSite};

#[derive(Debug, Clone)]
pub struct BudgetService {
    call: CallSite,
}

impl BudgetService {
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

    pub async fn list(&self) -> GatewayResult<Vec<Budget>> {
        self.call.get_json("/budgets").await
    }

    /// A month without a budget surfaces as a `NotFound` failure.
    pub async fn get_by_month(&self, month: &str) -> GatewayResult<Budget> {
        self.call.get_json(&format!("/budgets/{}", segment(month))).await
    }

    pub async fn overview(&self, month: &str) -> GatewayResult<BudgetOverview> {
        self.call
            .get_json(&format!("/budgets/{}/overview", segment(month)))
            .await
    }

    pub async fn create(&self, request: &CreateBudgetRequest) -> GatewayResult<Budget> {
        self.call.post_json("/budgets", request).await
    }

    pub async fn update(
        &self,
        month: &str,
        request: &UpdateBudgetRequest,
    ) -> GatewayResult<Option<Budget>> {
        self.call
            .put_optional_json(&format!("/budgets/{}", segment(month)), request)
            .await
    }

    pub async fn delete(&self, month: &str) -> GatewayResult<()> {
        self.call.delete(&format!("/budgets/{}", segment(month))).await
    }
}
