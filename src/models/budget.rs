//! Budget DTOs. Months are `YYYY-MM` strings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub category: String,
    pub allocated_amount: f64,
    #[serde(default)]
    pub spent_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub month: String,
    pub total_budget: f64,
    #[serde(default)]
    pub categories: Vec<BudgetCategory>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAllocation {
    pub category: String,
    pub allocated_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBudgetRequest {
    pub month: String,
    pub total_budget: f64,
    pub categories: Vec<CategoryAllocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBudgetRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategoryAllocation>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryOverview {
    pub category: String,
    pub allocated: f64,
    pub spent: f64,
    pub remaining: f64,
    pub percentage_used: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetOverview {
    pub budget: Budget,
    pub total_spent: f64,
    pub remaining: f64,
    pub percentage_used: f64,
    #[serde(default)]
    pub categories: Vec<CategoryOverview>,
}
