//! `groupBy` / `limit` query parsing

use crate::analytics::TimeBucket;

use super::ReportError;

pub const DEFAULT_TOP_PRODUCTS: usize = 10;
pub const DEFAULT_TOP_EXPENSE_CATEGORIES: usize = 5;
pub const MAX_LIMIT: usize = 100;

pub const REVENUE_BUCKETS: &[TimeBucket] = &[
    TimeBucket::Hour,
    TimeBucket::Day,
    TimeBucket::Week,
    TimeBucket::Month,
];
pub const EXPENSE_BUCKETS: &[TimeBucket] = &[TimeBucket::Day, TimeBucket::Week, TimeBucket::Month];

fn blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// `limit`: positive integer up to [`MAX_LIMIT`]; missing or empty → `default`
pub fn parse_limit(raw: Option<&str>, default: usize) -> Result<usize, ReportError> {
    let Some(value) = blank(raw) else {
        return Ok(default);
    };
    match value.parse::<usize>() {
        Ok(n) if (1..=MAX_LIMIT).contains(&n) => Ok(n),
        _ => Err(ReportError::InvalidParameter {
            name: "limit",
            message: format!("limit must be an integer between 1 and {MAX_LIMIT}, got {value:?}"),
        }),
    }
}

/// `groupBy`: one of `allowed`; missing or empty → day
pub fn parse_bucket(raw: Option<&str>, allowed: &[TimeBucket]) -> Result<TimeBucket, ReportError> {
    let Some(value) = blank(raw) else {
        return Ok(TimeBucket::Day);
    };
    match value.parse::<TimeBucket>() {
        Ok(bucket) if allowed.contains(&bucket) => Ok(bucket),
        _ => {
            let names: Vec<&str> = allowed.iter().map(|b| b.as_str()).collect();
            Err(ReportError::InvalidParameter {
                name: "groupBy",
                message: format!("groupBy must be one of {}, got {value:?}", names.join("|")),
            })
        }
    }
}
