//! # ib-models
//!
//! Data models for AlphaVantage company fundamentals and Damodaran industry
//! benchmarks.
//!
//! ## Usage
//!
//! ```ignore
//! use ib_models::{CompanyOverview, FinancialStatement};
//!
//! let overview = CompanyOverview::from_value(raw).normalize_numbers();
//! let statement = FinancialStatement::from_value(&income_json);
//! ```

#![warn(clippy::all)]

pub mod common;
pub mod fundamentals;
pub mod industry;
pub mod metrics;

// Re-export common types for convenience
pub use common::*;

pub use fundamentals::*;
pub use industry::*;
pub use metrics::*;
