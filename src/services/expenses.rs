//! Expense call-sites.

use crate::failure::GatewayResult;
use crate::http::Gateway;
use crate::models::{CreateExpenseRequest, Expense, UpdateExpenseRequest};
use crate::services::call_site::{segment, CallSite};

#[derive(Debug, Clone)]
pub struct ExpenseService {
    call: CallSite,
}

impl ExpenseService {
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

    pub async fn list(&self) -> GatewayResult<Vec<Expense>> {
        self.call.get_json("/expenses").await
    }

    pub async fn get(&self, id: &str) -> GatewayResult<Expense> {
        self.call.get_json(&format!("/expenses/{}", segment(id))).await
    }

    pub async fn create(&self, request: &CreateExpenseRequest) -> GatewayResult<Expense> {
        self.call.post_json("/expenses", request).await
    }

    pub async fn update(
        &self,
        id: &str,
        request: &UpdateExpenseRequest,
    ) -> GatewayResult<Option<Expense>> {
        self.call
            .put_optional_json(&format!("/expenses/{}", segment(id)), request)
            .await
    }

    pub async fn delete(&self, id: &str) -> GatewayResult<()> {
        self.call.delete(&format!("/expenses/{}", segment(id))).await
    }
}
