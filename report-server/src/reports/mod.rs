//! Report assemblers
//!
//! [`ReportEngine`] owns the store handles, the business calendar and the
//! clock. Each report method fixes a range policy, a predicate, a grouping
//! key, its extractors and a sort, then shapes the rows for the wire.
//!
//! | Report | Range default | Group by | Sort |
//! |--------|---------------|----------|------|
//! | overview | today | - | - |
//! | revenue_over_time | trailing | hour/day/week/month | key asc |
//! | sales_by_category | trailing | line-item subcategory | revenue desc |
//! | top_products | trailing | product id | quantity desc, limit |
//! | payment_methods | trailing | payment method | first seen |
//! | sales_by_hour | trailing | hour of day | hour asc |
//! | sales_by_day | trailing | day of week | day asc |
//! | expense_overview | today | - | - |
//! | expenses_by_category | today | category | total desc |
//! | expenses_over_time | trailing | day/week/month | key asc |
//! | top_expense_categories | trailing | (category, subcategory) | total desc, limit |
//! | financial_summary | today | - | - |

mod expense;
mod financial;
pub mod params;
mod sales;

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::error::AppError;
use shared::models::{Expense, Transaction};
use thiserror::Error;

use crate::analytics::{Calendar, InvalidRangeError, RangePolicy, TimeRange, range};
use crate::store::{ExpenseFilter, StoreError, Stores, TransactionFilter, with_timeout};
use crate::utils::clock::Clock;

#[derive(Debug, Clone, Error)]
pub enum ReportError {
    #[error(transparent)]
    InvalidRange(#[from] InvalidRangeError),

    #[error("{message}")]
    InvalidParameter { name: &'static str, message: String },

    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidRange(e) => AppError::invalid_range(e.to_string()),
            ReportError::InvalidParameter { name, message } => {
                AppError::invalid_parameter(name, message)
            }
            ReportError::StoreUnavailable(e) => AppError::store_unavailable(e.to_string()),
        }
    }
}

/// Raw `startDate` / `endDate` query values
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl RangeQuery {
    pub fn new(start_date: Option<&str>, end_date: Option<&str>) -> Self {
        Self {
            start_date: start_date.map(str::to_string),
            end_date: end_date.map(str::to_string),
        }
    }
}

/// Engine tuning taken from [`crate::core::Config`]
#[derive(Debug, Clone, Copy)]
pub struct EngineSettings {
    pub calendar: Calendar,
    pub store_timeout: Duration,
    pub trailing_days: i64,
}

pub struct ReportEngine {
    stores: Stores,
    settings: EngineSettings,
    clock: Arc<dyn Clock>,
}

impl ReportEngine {
    pub fn new(stores: Stores, settings: EngineSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            stores,
            settings,
            clock,
        }
    }

    fn calendar(&self) -> Calendar {
        self.settings.calendar
    }

    fn trailing(&self) -> RangePolicy {
        RangePolicy::TrailingDays(self.settings.trailing_days)
    }

    fn resolve(&self, query: &RangeQuery, policy: RangePolicy) -> Result<TimeRange, ReportError> {
        Ok(range::resolve(
            query.start_date.as_deref(),
            query.end_date.as_deref(),
            policy,
            self.clock.now(),
            self.settings.calendar.tz,
        )?)
    }

    async fn completed_transactions(
        &self,
        range: TimeRange,
    ) -> Result<Vec<Transaction>, ReportError> {
        let filter = TransactionFilter::completed(range);
        with_timeout(
            "transactions",
            self.settings.store_timeout,
            self.stores.transactions.query_transactions(&filter),
        )
        .await
        .map_err(log_store_error)
    }

    async fn active_expenses(&self, range: TimeRange) -> Result<Vec<Expense>, ReportError> {
        let filter = ExpenseFilter::active(range);
        with_timeout(
            "expenses",
            self.settings.store_timeout,
            self.stores.expenses.query_expenses(&filter),
        )
        .await
        .map_err(log_store_error)
    }

    async fn staff_daily_cost(&self) -> Result<Decimal, ReportError> {
        with_timeout(
            "staffing",
            self.settings.store_timeout,
            self.stores.staffing.active_staff_daily_cost(),
        )
        .await
        .map_err(log_store_error)
    }
}

fn log_store_error(err: StoreError) -> ReportError {
    tracing::warn!(error = %err, "Store query failed");
    ReportError::StoreUnavailable(err)
}
