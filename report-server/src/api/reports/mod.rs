//! Report API
//!
//! All routes are GET, require a bearer token and one of the report roles.
//! Query parameters: `startDate`, `endDate`, and per route `groupBy` / `limit`.

mod handler;

pub use handler::ReportQuery;

use axum::{Router, middleware, routing::get};

use crate::auth::{require_auth, require_report_access};
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/reports", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .route("/overview", get(handler::overview))
        .route("/revenue-over-time", get(handler::revenue_over_time))
        .route("/sales-by-category", get(handler::sales_by_category))
        .route("/top-products", get(handler::top_products))
        .route("/payment-methods", get(handler::payment_methods))
        .route("/sales-by-hour", get(handler::sales_by_hour))
        .route("/sales-by-day", get(handler::sales_by_day))
        .route("/expense-overview", get(handler::expense_overview))
        .route("/expenses-by-category", get(handler::expenses_by_category))
        .route("/expenses-over-time", get(handler::expenses_over_time))
        .route("/top-expense-categories", get(handler::top_expense_categories))
        .route("/financial-summary", get(handler::financial_summary))
        // layers run bottom-up: auth first, then the role check
        .route_layer(middleware::from_fn(require_report_access))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}
