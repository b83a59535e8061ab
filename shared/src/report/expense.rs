//! Expense report shapes

use serde::{Deserialize, Serialize};

/// Projection of a daily figure over longer periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffCostProjection {
    pub daily: f64,
    pub monthly: f64,
    pub yearly: f64,
}

/// GET /reports/expense-overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseOverview {
    pub total_expenses: f64,
    pub count: u64,
    pub days_in_range: i64,
    pub daily_average: f64,
    pub weekly_average: f64,
    pub monthly_average: f64,
    pub staff_costs: StaffCostProjection,
}

/// One row of GET /reports/expenses-by-category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: u64,
}

/// One bucket of GET /reports/expenses-over-time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePoint {
    pub period: String,
    pub total: f64,
    pub count: u64,
}

/// One row of GET /reports/top-expense-categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSubcategoryTotal {
    pub category: String,
    pub subcategory: String,
    pub total_amount: f64,
    pub count: u64,
}
