//! In-memory store over an immutable snapshot
//!
//! Serves all four store roles. The snapshot is loaded once (from the
//! `DATA_FILE` JSON document or empty) and never mutated, so concurrent
//! reports share it without locking.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{CatalogProduct, Expense, StaffMember, Transaction};
use thiserror::Error;

use super::{
    ExpenseFilter, ExpenseStore, ProductCatalog, StaffingStore, StoreError, TransactionFilter,
    TransactionStore,
};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk document shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub staff: Vec<StaffMember>,
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Snapshot,
    products: HashMap<String, CatalogProduct>,
}

impl MemoryStore {
    pub fn new(snapshot: Snapshot) -> Self {
        let products = snapshot
            .products
            .iter()
            .map(|p| (p.id.clone(), p.clone()))
            .collect();
        Self { snapshot, products }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a JSON snapshot from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: display.clone(),
            source,
        })?;
        let snapshot: Snapshot =
            serde_json::from_str(&raw).map_err(|source| SnapshotError::Parse {
                path: display,
                source,
            })?;

        tracing::info!(
            transactions = snapshot.transactions.len(),
            expenses = snapshot.expenses.len(),
            staff = snapshot.staff.len(),
            products = snapshot.products.len(),
            "Loaded data snapshot"
        );
        Ok(Self::new(snapshot))
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn query_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .snapshot
            .transactions
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ExpenseStore for MemoryStore {
    async fn query_expenses(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, StoreError> {
        Ok(self
            .snapshot
            .expenses
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl StaffingStore for MemoryStore {
    async fn active_staff_daily_cost(&self) -> Result<Decimal, StoreError> {
        Ok(self
            .snapshot
            .staff
            .iter()
            .filter(|s| s.is_active())
            .map(|s| s.daily_salary)
            .sum())
    }
}

#[async_trait]
impl ProductCatalog for MemoryStore {
    async fn lookup(
        &self,
        product_ids: &[String],
    ) -> Result<HashMap<String, CatalogProduct>, StoreError> {
        Ok(product_ids
            .iter()
            .filter_map(|id| self.products.get(id).map(|p| (id.clone(), p.clone())))
            .collect())
    }
}
