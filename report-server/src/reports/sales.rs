//! Sales reports (completed transactions only)

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use shared::models::{CatalogProduct, LineItem, PaymentMethod, Transaction};
use shared::report::{
    CategorySales, HourlySales, PaymentMethodSales, ProductSales, RevenuePoint, SalesOverview,
    WeekdaySales,
};

use crate::analytics::keys::weekday_name;
use crate::analytics::money::{to_count, to_f64};
use crate::analytics::{Aggregator, RangePolicy, TimeBucket, TimeRange, metrics};
use crate::store::{TransactionFilter, with_timeout};

use super::{RangeQuery, ReportEngine, ReportError, log_store_error};

const UNCATEGORIZED: &str = "Uncategorized";

/// Line-item attribution: catalog subcategory, then category, then a fallback
fn category_label(catalog: &HashMap<String, CatalogProduct>, product_id: &str) -> String {
    catalog
        .get(product_id)
        .and_then(|p| {
            [p.subcategory.as_str(), p.category.as_str()]
                .into_iter()
                .find(|s| !s.trim().is_empty())
        })
        .unwrap_or(UNCATEGORIZED)
        .to_string()
}

/// Completed transactions in `range`, unwound into line items
/// Product ids in first-seen order, each once
fn distinct_products<'t>(items: impl Iterator<Item = &'t LineItem>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .map(|item| item.product.as_str())
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

fn line_items<'t>(
    transactions: &'t [Transaction],
    range: TimeRange,
) -> impl Iterator<Item = &'t LineItem> {
    let filter = TransactionFilter::completed(range);
    transactions
        .iter()
        .filter(move |t| filter.matches(t))
        .flat_map(|t| t.items.iter())
}

impl ReportEngine {
    /// GET /reports/overview
    pub async fn overview(&self, query: &RangeQuery) -> Result<SalesOverview, ReportError> {
        let range = self.resolve(query, RangePolicy::Today)?;
        let transactions = self.completed_transactions(range).await?;
        let filter = TransactionFilter::completed(range);

        let totals = Aggregator::new(|_: &Transaction| ())
            .filter(|t| filter.matches(t))
            .sum("revenue", |t| t.total)
            .sum("subtotal", |t| t.subtotal)
            .sum("tax", |t| t.tax)
            .sum("items", |t| Decimal::from(t.items_sold()))
            .run(&transactions);

        let orders = totals.count();
        let revenue = totals.total("revenue");

        tracing::debug!(
            start = %range.start,
            end = %range.end,
            records = transactions.len(),
            "overview computed"
        );

        Ok(SalesOverview {
            total_orders: orders,
            total_revenue: to_f64(revenue),
            total_subtotal: to_f64(totals.total("subtotal")),
            total_tax: to_f64(totals.total("tax")),
            average_order_value: to_f64(metrics::average_order_value(revenue, orders)),
            total_items_sold: to_count(totals.total("items")),
        })
    }

    /// GET /reports/revenue-over-time
    pub async fn revenue_over_time(
        &self,
        query: &RangeQuery,
        bucket: TimeBucket,
    ) -> Result<Vec<RevenuePoint>, ReportError> {
        let range = self.resolve(query, self.trailing())?;
        let transactions = self.completed_transactions(range).await?;
        let filter = TransactionFilter::completed(range);
        let calendar = self.calendar();

        let rows = Aggregator::new(|t: &Transaction| calendar.bucket_key(t.created_at, bucket))
            .filter(|t| filter.matches(t))
            .sum("revenue", |t| t.total)
            .run(&transactions)
            .sort_by_key();

        tracing::debug!(
            start = %range.start,
            end = %range.end,
            bucket = %bucket,
            records = transactions.len(),
            buckets = rows.len(),
            "revenue over time computed"
        );

        Ok(rows
            .into_rows()
            .into_iter()
            .map(|row| RevenuePoint {
                revenue: to_f64(row.sum("revenue")),
                orders: row.count,
                period: row.key,
            })
            .collect())
    }

    /// GET /reports/sales-by-category
    pub async fn sales_by_category(
        &self,
        query: &RangeQuery,
    ) -> Result<Vec<CategorySales>, ReportError> {
        let range = self.resolve(query, self.trailing())?;
        let transactions = self.completed_transactions(range).await?;

        let product_ids = distinct_products(line_items(&transactions, range));
        let catalog = if product_ids.is_empty() {
            HashMap::new()
        } else {
            with_timeout(
                "catalog",
                self.settings.store_timeout,
                self.stores.catalog.lookup(&product_ids),
            )
            .await
            .map_err(log_store_error)?
        };

        let rows = Aggregator::new(|i: &LineItem| category_label(&catalog, &i.product))
            .sum("revenue", LineItem::revenue)
            .sum("quantity", |i| Decimal::from(i.quantity))
            .run(line_items(&transactions, range))
            .sort_by_sum_desc("revenue");

        tracing::debug!(
            records = transactions.len(),
            products = product_ids.len(),
            categories = rows.len(),
            "sales by category computed"
        );

        Ok(rows
            .into_rows()
            .into_iter()
            .map(|row| CategorySales {
                revenue: to_f64(row.sum("revenue")),
                quantity: to_count(row.sum("quantity")),
                items: row.count,
                category: row.key,
            })
            .collect())
    }

    /// GET /reports/top-products
    pub async fn top_products(
        &self,
        query: &RangeQuery,
        limit: usize,
    ) -> Result<Vec<ProductSales>, ReportError> {
        let range = self.resolve(query, self.trailing())?;
        let transactions = self.completed_transactions(range).await?;

        let rows = Aggregator::new(|i: &LineItem| i.product.clone())
            .label(|i| i.name.clone())
            .sum("quantity", |i| Decimal::from(i.quantity))
            .sum("revenue", LineItem::revenue)
            .run(line_items(&transactions, range))
            .sort_by_sum_desc("quantity")
            .limit(limit);

        tracing::debug!(
            records = transactions.len(),
            limit,
            returned = rows.len(),
            "top products computed"
        );

        Ok(rows
            .into_rows()
            .into_iter()
            .map(|row| ProductSales {
                name: row.label.clone().unwrap_or_default(),
                quantity: to_count(row.sum("quantity")),
                revenue: to_f64(row.sum("revenue")),
                product_id: row.key,
            })
            .collect())
    }

    /// GET /reports/payment-methods
    pub async fn payment_methods(
        &self,
        query: &RangeQuery,
    ) -> Result<Vec<PaymentMethodSales>, ReportError> {
        let range = self.resolve(query, self.trailing())?;
        let transactions = self.completed_transactions(range).await?;
        let filter = TransactionFilter::completed(range);

        let rows = Aggregator::new(|t: &Transaction| t.payment_method)
            .filter(|t| filter.matches(t))
            .sum("revenue", |t| t.total)
            .run(&transactions);

        tracing::debug!(
            records = transactions.len(),
            methods = rows.len(),
            "payment methods computed"
        );

        Ok(rows
            .rows()
            .iter()
            .map(|row| PaymentMethodSales {
                method: PaymentMethod::as_str(&row.key).to_string(),
                count: row.count,
                revenue: to_f64(row.sum("revenue")),
            })
            .collect())
    }

    /// GET /reports/sales-by-hour
    pub async fn sales_by_hour(&self, query: &RangeQuery) -> Result<Vec<HourlySales>, ReportError> {
        let range = self.resolve(query, self.trailing())?;
        let transactions = self.completed_transactions(range).await?;
        let filter = TransactionFilter::completed(range);
        let calendar = self.calendar();

        let rows = Aggregator::new(|t: &Transaction| calendar.hour_of_day(t.created_at))
            .filter(|t| filter.matches(t))
            .sum("revenue", |t| t.total)
            .run(&transactions)
            .sort_by_key();

        tracing::debug!(records = transactions.len(), "sales by hour computed");

        Ok(rows
            .rows()
            .iter()
            .map(|row| HourlySales {
                hour: row.key,
                revenue: to_f64(row.sum("revenue")),
                orders: row.count,
            })
            .collect())
    }

    /// GET /reports/sales-by-day
    pub async fn sales_by_day(&self, query: &RangeQuery) -> Result<Vec<WeekdaySales>, ReportError> {
        let range = self.resolve(query, self.trailing())?;
        let transactions = self.completed_transactions(range).await?;
        let filter = TransactionFilter::completed(range);
        let calendar = self.calendar();

        let rows = Aggregator::new(|t: &Transaction| calendar.day_of_week(t.created_at))
            .filter(|t| filter.matches(t))
            .sum("revenue", |t| t.total)
            .run(&transactions)
            .sort_by_key();

        tracing::debug!(records = transactions.len(), "sales by day computed");

        Ok(rows
            .rows()
            .iter()
            .filter_map(|row| {
                weekday_name(row.key).map(|day| WeekdaySales {
                    day_number: row.key,
                    day: day.to_string(),
                    revenue: to_f64(row.sum("revenue")),
                    orders: row.count,
                })
            })
            .collect())
    }
}
