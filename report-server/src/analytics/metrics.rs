//! Derived-metric calculators
//!
//! Every division guards against a zero divisor and yields zero instead.

use rust_decimal::Decimal;

use super::money::round2;

pub const DAYS_PER_WEEK: i64 = 7;
pub const DAYS_PER_MONTH: i64 = 30;
pub const DAYS_PER_YEAR: i64 = 365;

/// `revenue / orders`, 0 when there are no orders
pub fn average_order_value(revenue: Decimal, orders: u64) -> Decimal {
    if orders == 0 {
        return Decimal::ZERO;
    }
    revenue / Decimal::from(orders)
}

/// `total / days`, 0 for a non-positive day count
pub fn daily_average(total: Decimal, days: i64) -> Decimal {
    if days <= 0 {
        return Decimal::ZERO;
    }
    total / Decimal::from(days)
}

/// A daily figure scaled to longer periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    pub daily: Decimal,
    pub weekly: Decimal,
    pub monthly: Decimal,
    pub yearly: Decimal,
}

impl Projection {
    pub fn from_daily(daily: Decimal) -> Self {
        Self {
            daily,
            weekly: daily * Decimal::from(DAYS_PER_WEEK),
            monthly: daily * Decimal::from(DAYS_PER_MONTH),
            yearly: daily * Decimal::from(DAYS_PER_YEAR),
        }
    }
}

/// `revenue - expenses`
pub fn gross_profit(revenue: Decimal, expenses: Decimal) -> Decimal {
    revenue - expenses
}

/// `gross / revenue × 100`, 2dp; 0 when revenue is 0
pub fn profit_margin(gross: Decimal, revenue: Decimal) -> Decimal {
    if revenue.is_zero() {
        return Decimal::ZERO;
    }
    round2(gross / revenue * Decimal::ONE_HUNDRED)
}
