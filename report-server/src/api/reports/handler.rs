//! Report API Handlers

use axum::{
    Json,
    extract::{FromRequestParts, Query, State},
    http::request::Parts,
};
use serde::Deserialize;
use shared::report::{
    CategorySales, ExpenseCategoryTotal, ExpenseOverview, ExpensePoint, ExpenseSubcategoryTotal,
    FinancialSummary, HourlySales, PaymentMethodSales, ProductSales, RevenuePoint, SalesOverview,
    WeekdaySales,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::reports::RangeQuery;
use crate::reports::params::{
    self, DEFAULT_TOP_EXPENSE_CATEGORIES, DEFAULT_TOP_PRODUCTS, EXPENSE_BUCKETS, REVENUE_BUCKETS,
};
use crate::utils::{ApiResponse, AppError, AppResult, ok};

type ReportResponse<T> = AppResult<Json<ApiResponse<T>>>;

/// Raw query string for every report route
///
/// Values stay strings here so that validation errors come back in the
/// report envelope instead of axum's plain-text rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub group_by: Option<String>,
    pub limit: Option<String>,
}

impl ReportQuery {
    fn range(&self) -> RangeQuery {
        RangeQuery::new(self.start_date.as_deref(), self.end_date.as_deref())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ReportQuery {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<ReportQuery>::from_request_parts(parts, state)
            .await
            .map(|Query(q)| q)
            .map_err(|e| AppError::validation(format!("Invalid query string: {}", e.body_text())))
    }
}

fn log_request(user: &CurrentUser, report: &'static str, query: &ReportQuery) {
    tracing::debug!(
        report,
        user = %user.username,
        role = %user.role,
        start_date = ?query.start_date,
        end_date = ?query.end_date,
        "report requested"
    );
}

/// GET /reports/overview
pub async fn overview(
    State(state): State<ServerState>,
    user: CurrentUser,
    query: ReportQuery,
) -> ReportResponse<SalesOverview> {
    log_request(&user, "overview", &query);
    Ok(ok(state.engine().overview(&query.range()).await?))
}

/// GET /reports/revenue-over-time?groupBy=hour|day|week|month
pub async fn revenue_over_time(
    State(state): State<ServerState>,
    user: CurrentUser,
    query: ReportQuery,
) -> ReportResponse<Vec<RevenuePoint>> {
    log_request(&user, "revenue-over-time", &query);
    let bucket = params::parse_bucket(query.group_by.as_deref(), REVENUE_BUCKETS)?;
    Ok(ok(state
        .engine()
        .revenue_over_time(&query.range(), bucket)
        .await?))
}

/// GET /reports/sales-by-category
pub async fn sales_by_category(
    State(state): State<ServerState>,
    user: CurrentUser,
    query: ReportQuery,
) -> ReportResponse<Vec<CategorySales>> {
    log_request(&user, "sales-by-category", &query);
    Ok(ok(state.engine().sales_by_category(&query.range()).await?))
}

/// GET /reports/top-products?limit=N
pub async fn top_products(
    State(state): State<ServerState>,
    user: CurrentUser,
    query: ReportQuery,
) -> ReportResponse<Vec<ProductSales>> {
    log_request(&user, "top-products", &query);
    let limit = params::parse_limit(query.limit.as_deref(), DEFAULT_TOP_PRODUCTS)?;
    Ok(ok(state.engine().top_products(&query.range(), limit).await?))
}

/// GET /reports/payment-methods
pub async fn payment_methods(
    State(state): State<ServerState>,
    user: CurrentUser,
    query: ReportQuery,
) -> ReportResponse<Vec<PaymentMethodSales>> {
    log_request(&user, "payment-methods", &query);
    Ok(ok(state.engine().payment_methods(&query.range()).await?))
}

/// GET /reports/sales-by-hour
pub async fn sales_by_hour(
    State(state): State<ServerState>,
    user: CurrentUser,
    query: ReportQuery,
) -> ReportResponse<Vec<HourlySales>> {
    log_request(&user, "sales-by-hour", &query);
    Ok(ok(state.engine().sales_by_hour(&query.range()).await?))
}

/// GET /reports/sales-by-day
pub async fn sales_by_day(
    State(state): State<ServerState>,
    user: CurrentUser,
    query: ReportQuery,
) -> ReportResponse<Vec<WeekdaySales>> {
    log_request(&user, "sales-by-day", &query);
    Ok(ok(state.engine().sales_by_day(&query.range()).await?))
}

/// GET /reports/expense-overview
pub async fn expense_overview(
    State(state): State<ServerState>,
    user: CurrentUser,
    query: ReportQuery,
) -> ReportResponse<ExpenseOverview> {
    log_request(&user, "expense-overview", &query);
    Ok(ok(state.engine().expense_overview(&query.range()).await?))
}

/// GET /reports/expenses-by-category
pub async fn expenses_by_category(
    State(state): State<ServerState>,
    user: CurrentUser,
    query: ReportQuery,
) -> ReportResponse<Vec<ExpenseCategoryTotal>> {
    log_request(&user, "expenses-by-category", &query);
    Ok(ok(state
        .engine()
        .expenses_by_category(&query.range())
        .await?))
}

/// GET /reports/expenses-over-time?groupBy=day|week|month
pub async fn expenses_over_time(
    State(state): State<ServerState>,
    user: CurrentUser,
    query: ReportQuery,
) -> ReportResponse<Vec<ExpensePoint>> {
    log_request(&user, "expenses-over-time", &query);
    let bucket = params::parse_bucket(query.group_by.as_deref(), EXPENSE_BUCKETS)?;
    Ok(ok(state
        .engine()
        .expenses_over_time(&query.range(), bucket)
        .await?))
}

/// GET /reports/top-expense-categories?limit=N
pub async fn top_expense_categories(
    State(state): State<ServerState>,
    user: CurrentUser,
    query: ReportQuery,
) -> ReportResponse<Vec<ExpenseSubcategoryTotal>> {
    log_request(&user, "top-expense-categories", &query);
    let limit = params::parse_limit(query.limit.as_deref(), DEFAULT_TOP_EXPENSE_CATEGORIES)?;
    Ok(ok(state
        .engine()
        .top_expense_categories(&query.range(), limit)
        .await?))
}

/// GET /reports/financial-summary
pub async fn financial_summary(
    State(state): State<ServerState>,
    user: CurrentUser,
    query: ReportQuery,
) -> ReportResponse<FinancialSummary> {
    log_request(&user, "financial-summary", &query);
    Ok(ok(state.engine().financial_summary(&query.range()).await?))
}
