//! # ib-loaders
//!
//! Loading and aggregation for industry benchmark comparisons.
//!
//! This crate provides:
//! - Damodaran industry datasets read from `.xls`/`.xlsx` workbooks, with optional download
//! - Per-topic industry aggregation (fundamentals, profitability, efficiency, risk, multiples, demand)
//! - Ticker to industry resolution from the global company table
//! - Cached AlphaVantage statement fetching, TTM construction and company ratios

pub mod cache;
pub mod datasets;
pub mod error;
pub mod industry;
pub mod industry_info;
pub mod loader;
pub mod metrics;
pub mod resolver;
pub mod spreadsheet;
pub mod statements;
pub mod ttm;

// Re-export commonly used types
pub use cache::{CacheConfig, CacheResult, FileCache, Staleness};
pub use datasets::{DatasetConfig, DatasetStore, TableSource};
pub use error::{LoaderError, LoaderResult};
pub use industry::{IndustryAggregator, IndustryFilter, Topic};
pub use industry_info::get_industry_info;
pub use loader::{normalize_ticker, DataLoader, LoaderContext};
pub use metrics::{compute_financial_metrics, CompanyMetricsLoader};
pub use resolver::{CompanyDirectory, CompanyRecord, CountryScope};
pub use spreadsheet::{ColumnKey, DatasetSpec, DatasetSpecs, Table};
pub use statements::{CompanyStatements, StatementFetcher, StatementLoader};
pub use ttm::{build_ttm, compute_5yr_cagr};

// Prelude for convenient imports
pub mod prelude {
  pub use crate::{
    CacheConfig, CompanyDirectory, DataLoader, DatasetConfig, DatasetStore, IndustryAggregator,
    IndustryFilter, LoaderContext, LoaderError, LoaderResult,
  };
}
