pub mod config;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::Config;
pub use error::{Error, Result};

/// The AlphaVantage API functions used for company fundamentals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuncType {
  Overview,
  IncomeStatement,
  BalanceSheet,
  CashFlow,
}

impl FuncType {
  /// The three statement functions, in the order they are fetched.
  pub const STATEMENTS: [FuncType; 3] =
    [FuncType::IncomeStatement, FuncType::BalanceSheet, FuncType::CashFlow];

  /// Data type name used in cache file names (`<SYMBOL>_<name>.json`).
  pub fn cache_name(&self) -> &'static str {
    match self {
      FuncType::Overview => "overview",
      FuncType::IncomeStatement => "income_statement",
      FuncType::BalanceSheet => "balance_sheet",
      FuncType::CashFlow => "cash_flow",
    }
  }
}

impl std::fmt::Display for FuncType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      FuncType::Overview => write!(f, "OVERVIEW"),
      FuncType::IncomeStatement => write!(f, "INCOME_STATEMENT"),
      FuncType::BalanceSheet => write!(f, "BALANCE_SHEET"),
      FuncType::CashFlow => write!(f, "CASH_FLOW"),
    }
  }
}

/// Base URL for AlphaVantage API (the `/query` path is appended by the transport)
pub const ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co";

/// Where Prof. Damodaran publishes the current year's US datasets
pub const DAMODARAN_DATASETS_URL: &str = "https://pages.stern.nyu.edu/~adamodar/pc/datasets";

/// API rate limits
pub const DEFAULT_RATE_LIMIT: u32 = 75; // requests per minute
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
