//! Sales report shapes

use serde::{Deserialize, Serialize};

/// GET /reports/overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOverview {
    pub total_orders: u64,
    pub total_revenue: f64,
    pub total_subtotal: f64,
    pub total_tax: f64,
    pub average_order_value: f64,
    pub total_items_sold: u64,
}

/// One bucket of GET /reports/revenue-over-time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenuePoint {
    /// Bucket key (`YYYY-MM-DD HH:00`, `YYYY-MM-DD`, `YYYY-Www` or `YYYY-MM`)
    pub period: String,
    pub revenue: f64,
    pub orders: u64,
}

/// One bucket of GET /reports/sales-by-category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySales {
    pub category: String,
    pub revenue: f64,
    pub quantity: u64,
    /// Number of line items contributing
    pub items: u64,
}

/// One row of GET /reports/top-products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_id: String,
    pub name: String,
    pub quantity: u64,
    pub revenue: f64,
}

/// One row of GET /reports/payment-methods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodSales {
    pub method: String,
    pub count: u64,
    pub revenue: f64,
}

/// One row of GET /reports/sales-by-hour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlySales {
    /// Local hour of day, 0-23
    pub hour: u32,
    pub revenue: f64,
    pub orders: u64,
}

/// One row of GET /reports/sales-by-day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdaySales {
    /// 1 = Sunday .. 7 = Saturday
    pub day_number: u32,
    pub day: String,
    pub revenue: f64,
    pub orders: u64,
}
