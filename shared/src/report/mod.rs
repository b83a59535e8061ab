//! Report response shapes
//!
//! Money fields are `f64` rounded to two decimals at the presentation
//! boundary; all internal math happens on `Decimal`.

pub mod expense;
pub mod financial;
pub mod sales;

pub use expense::*;
pub use financial::*;
pub use sales::*;
