//! Record stores
//!
//! The engine never owns records: it asks these collaborators for snapshots
//! filtered by time range and status. Every call goes through
//! [`with_timeout`] so a stalled backend surfaces as
//! [`StoreError::Timeout`] instead of hanging the request.

mod memory;

pub use memory::{MemoryStore, Snapshot, SnapshotError};

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::models::{CatalogProduct, Expense, RecordStatus, Transaction, TransactionStatus};
use thiserror::Error;

use crate::analytics::TimeRange;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("{store} store unavailable: {reason}")]
    Unavailable { store: &'static str, reason: String },

    #[error("{store} store timed out after {}ms", .elapsed.as_millis())]
    Timeout {
        store: &'static str,
        elapsed: Duration,
    },
}

impl StoreError {
    pub fn unavailable(store: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            store,
            reason: reason.into(),
        }
    }
}

/// Transactions whose `created_at` falls in `range`
#[derive(Debug, Clone, Copy)]
pub struct TransactionFilter {
    pub range: TimeRange,
    /// `None` = any status
    pub status: Option<TransactionStatus>,
}

impl TransactionFilter {
    pub fn completed(range: TimeRange) -> Self {
        Self {
            range,
            status: Some(TransactionStatus::Completed),
        }
    }

    pub fn matches(&self, t: &Transaction) -> bool {
        self.range.contains(t.created_at) && self.status.is_none_or(|s| t.status == s)
    }
}

/// Expenses whose business `date` falls on a day of `range`
#[derive(Debug, Clone, Copy)]
pub struct ExpenseFilter {
    pub range: TimeRange,
    pub status: Option<RecordStatus>,
}

impl ExpenseFilter {
    pub fn active(range: TimeRange) -> Self {
        Self {
            range,
            status: Some(RecordStatus::Active),
        }
    }

    pub fn matches(&self, e: &Expense) -> bool {
        self.range.contains_date(e.date) && self.status.is_none_or(|s| e.status == s)
    }
}

#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn query_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, StoreError>;
}

#[async_trait]
pub trait ExpenseStore: Send + Sync {
    async fn query_expenses(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, StoreError>;
}

#[async_trait]
pub trait StaffingStore: Send + Sync {
    /// Sum of daily salaries over active staff
    async fn active_staff_daily_cost(&self) -> Result<Decimal, StoreError>;
}

/// Name/category lookup for line-item attribution
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Entries for the given ids; unknown ids are simply absent
    async fn lookup(
        &self,
        product_ids: &[String],
    ) -> Result<HashMap<String, CatalogProduct>, StoreError>;
}

/// Bundle of store handles the report engine reads from
#[derive(Clone)]
pub struct Stores {
    pub transactions: Arc<dyn TransactionStore>,
    pub expenses: Arc<dyn ExpenseStore>,
    pub staffing: Arc<dyn StaffingStore>,
    pub catalog: Arc<dyn ProductCatalog>,
}

impl Stores {
    /// All four roles served by one in-memory snapshot
    pub fn from_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            transactions: store.clone(),
            expenses: store.clone(),
            staffing: store.clone(),
            catalog: store,
        }
    }
}

/// Bound a store call by `limit`
pub async fn with_timeout<T, F>(store: &'static str, limit: Duration, fut: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout {
            store,
            elapsed: limit,
        }),
    }
}
