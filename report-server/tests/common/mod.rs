//! Shared fixtures for the report API tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use report_server::core::Config;
use report_server::store::{
    ExpenseFilter, ExpenseStore, MemoryStore, Snapshot, StoreError, Stores, TransactionFilter,
    TransactionStore,
};
use report_server::utils::clock::FixedClock;
use report_server::{JwtService, ServerState, api};
use rust_decimal::Decimal;
use serde_json::Value;
use shared::models::{
    CatalogProduct, Expense, ExpenseCategory, LineItem, PaymentMethod, RecordStatus, StaffMember,
    Transaction, TransactionStatus,
};
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Wednesday 2024-05-15 14:30 UTC
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 15, 14, 30, 0).unwrap()
}

pub fn at(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

pub fn money(v: i64) -> Decimal {
    Decimal::from(v)
}

pub fn config_with(extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("JWT_SECRET".to_string(), SECRET.to_string()),
        ("STORE_TIMEOUT_MS".to_string(), "100".to_string()),
    ]);
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }
    Config::from_vars(|k| vars.get(k).cloned()).unwrap()
}

pub fn state_with_stores(stores: Stores) -> ServerState {
    ServerState::new(config_with(&[]), stores, Arc::new(FixedClock(now())))
}

pub fn app(snapshot: Snapshot) -> Router {
    let state = state_with_stores(Stores::from_memory(Arc::new(MemoryStore::new(snapshot))));
    api::build_app(&state)
}

/// Memory-backed app with extra configuration, e.g. a business timezone
pub fn app_configured(extra: &[(&str, &str)], snapshot: Snapshot) -> Router {
    let state = ServerState::new(
        config_with(extra),
        Stores::from_memory(Arc::new(MemoryStore::new(snapshot))),
        Arc::new(FixedClock(now())),
    );
    api::build_app(&state)
}

pub fn app_with_stores(stores: Stores) -> Router {
    api::build_app(&state_with_stores(stores))
}

pub fn token(role: &str) -> String {
    JwtService::with_config(config_with(&[]).jwt)
        .generate_token("u-1", "tester", role)
        .unwrap()
}

/// GET `uri` with an optional bearer token → (status, JSON body)
pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    let (status, bytes) = get_raw(app, uri, token).await;
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get_raw(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(t) = token {
        builder = builder.header("Authorization", format!("Bearer {t}"));
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

/// GET as an admin and unwrap `data` from a success envelope
pub async fn report(app: &Router, uri: &str) -> Value {
    let (status, body) = get(app, uri, Some(&token("admin"))).await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["success"], true);
    body["data"].clone()
}

// ========== record builders ==========

pub fn item(product: &str, name: &str, unit_price: i64, quantity: u32) -> LineItem {
    LineItem {
        product: product.to_string(),
        name: name.to_string(),
        unit_price: money(unit_price),
        quantity,
        subtotal: money(unit_price * i64::from(quantity)),
    }
}

pub fn tx(
    id: &str,
    total: i64,
    status: TransactionStatus,
    created_at: &str,
    method: PaymentMethod,
    items: Vec<LineItem>,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        items,
        subtotal: money(total),
        tax: Decimal::ZERO,
        discount: Decimal::ZERO,
        total: money(total),
        payment_method: method,
        status,
        created_at: at(created_at),
    }
}

pub fn completed(id: &str, total: i64, created_at: &str) -> Transaction {
    tx(
        id,
        total,
        TransactionStatus::Completed,
        created_at,
        PaymentMethod::Cash,
        vec![],
    )
}

pub fn expense(id: &str, category: ExpenseCategory, amount: i64, date: &str) -> Expense {
    Expense {
        id: id.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        category,
        subcategory: String::new(),
        amount: money(amount),
        status: RecordStatus::Active,
        created_by: None,
        created_at: None,
    }
}

pub fn staff(id: &str, daily_salary: i64, status: RecordStatus) -> StaffMember {
    StaffMember {
        id: id.to_string(),
        name: id.to_string(),
        daily_salary: money(daily_salary),
        status,
    }
}

pub fn product(id: &str, category: &str, subcategory: &str) -> CatalogProduct {
    CatalogProduct {
        id: id.to_string(),
        name: id.to_string(),
        category: category.to_string(),
        subcategory: subcategory.to_string(),
    }
}

// ========== failing stores ==========

/// Every call fails immediately
pub struct DownStore;

#[async_trait]
impl TransactionStore for DownStore {
    async fn query_transactions(
        &self,
        _filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, StoreError> {
        Err(StoreError::unavailable("transactions", "connection refused"))
    }
}

#[async_trait]
impl ExpenseStore for DownStore {
    async fn query_expenses(&self, _filter: &ExpenseFilter) -> Result<Vec<Expense>, StoreError> {
        Err(StoreError::unavailable("expenses", "connection refused"))
    }
}

/// Every call stalls past the store timeout
pub struct StalledStore;

#[async_trait]
impl ExpenseStore for StalledStore {
    async fn query_expenses(&self, _filter: &ExpenseFilter) -> Result<Vec<Expense>, StoreError> {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Ok(vec![])
    }
}

/// Memory-backed stores with selected roles replaced
pub fn stores_replacing(
    snapshot: Snapshot,
    transactions: Option<Arc<dyn TransactionStore>>,
    expenses: Option<Arc<dyn ExpenseStore>>,
) -> Stores {
    let mut stores = Stores::from_memory(Arc::new(MemoryStore::new(snapshot)));
    if let Some(t) = transactions {
        stores.transactions = t;
    }
    if let Some(e) = expenses {
        stores.expenses = e;
    }
    stores
}
