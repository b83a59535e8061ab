//! Data models
//!
//! Record snapshots the analytics engine reads. They are owned and mutated by
//! the external stores; wire format is camelCase JSON.

pub mod catalog;
pub mod expense;
pub mod staff;
pub mod transaction;

// Re-exports
pub use catalog::*;
pub use expense::*;
pub use staff::*;
pub use transaction::*;
