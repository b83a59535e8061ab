//! Analytics engine primitives
//!
//! ```text
//! query ─► range::resolve ─► store fetch ─► Aggregator (keys::Calendar) ─► metrics ─► money
//! ```
//!
//! Everything here is pure: no I/O, no clock reads. The report assemblers in
//! [`crate::reports`] compose these pieces with store queries.

pub mod aggregate;
pub mod keys;
pub mod metrics;
pub mod money;
pub mod range;

pub use aggregate::{AggregateRow, Aggregation, Aggregator};
pub use keys::{Calendar, TimeBucket, WeekNumbering};
pub use range::{InvalidRangeError, RangePolicy, TimeRange};
