//! Presentation conversions for money and counts
//!
//! Sums stay in `Decimal` until a report shape is built; rounding happens
//! exactly once, here.

use rust_decimal::prelude::*;

/// Decimal places shown to clients
pub const DECIMAL_PLACES: u32 = 2;

/// Round half away from zero to 2dp and convert for JSON output
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_else(|| {
            tracing::error!(value = %value, "Decimal not representable as f64, defaulting to zero");
            0.0
        })
}

/// Summed quantity → integer count (negative or fractional input truncates toward zero)
pub fn to_count(value: Decimal) -> u64 {
    value.trunc().to_u64().unwrap_or(0)
}

/// Round a derived percentage/ratio to 2dp, staying in `Decimal`
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_f64_rounds_half_away_from_zero() {
        assert_eq!(to_f64(Decimal::new(1005, 3)), 1.01);
        assert_eq!(to_f64(Decimal::new(-1005, 3)), -1.01);
        assert_eq!(to_f64(Decimal::new(2004, 3)), 2.0);
    }

    #[test]
    fn test_sum_then_round_once() {
        // 0.1 thirty times is exactly 3 in Decimal
        let total: Decimal = std::iter::repeat_n(Decimal::new(1, 1), 30).sum();
        assert_eq!(total, Decimal::from(3));
        assert_eq!(to_f64(total), 3.0);
    }

    #[test]
    fn test_to_count() {
        assert_eq!(to_count(Decimal::from(7)), 7);
        assert_eq!(to_count(Decimal::from(-2)), 0);
    }
}
