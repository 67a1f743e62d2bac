use super::{DirectRateLimiter, EndpointBase, impl_endpoint_base};
use crate::transport::Transport;
use ib_core::{FuncType, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

/// Company overview and financial statement endpoints
pub struct FundamentalsEndpoints {
  transport: Arc<Transport>,
  rate_limiter: Arc<DirectRateLimiter>,
}

impl FundamentalsEndpoints {
  /// Create a new fundamentals endpoints instance
  pub fn new(transport: Arc<Transport>, rate_limiter: Arc<DirectRateLimiter>) -> Self {
    Self { transport, rate_limiter }
  }

  /// Fetch any fundamentals function for a symbol.
  ///
  /// The symbol is upper-cased before the request is made.
  #[instrument(skip(self), fields(function = %function))]
  pub async fn fetch(&self, symbol: &str, function: FuncType) -> Result<Value> {
    self.wait_for_rate_limit().await?;

    let params = vec![("symbol".to_string(), symbol.trim().to_uppercase())];
    self.transport().get_json(function, params).await
  }

  /// Company overview with key financial metrics
  ///
  /// # Examples
  ///
  /// ```ignore
  /// let overview = client.fundamentals().company_overview("CROX").await?;
  /// println!("Beta: {}", overview["Beta"]);
  /// ```
  pub async fn company_overview(&self, symbol: &str) -> Result<Value> {
    self.fetch(symbol, FuncType::Overview).await
  }

  /// Annual and quarterly income statements
  pub async fn income_statement(&self, symbol: &str) -> Result<Value> {
    self.fetch(symbol, FuncType::IncomeStatement).await
  }

  /// Annual and quarterly balance sheets
  pub async fn balance_sheet(&self, symbol: &str) -> Result<Value> {
    self.fetch(symbol, FuncType::BalanceSheet).await
  }

  /// Annual and quarterly cash flow statements
  pub async fn cash_flow(&self, symbol: &str) -> Result<Value> {
    self.fetch(symbol, FuncType::CashFlow).await
  }
}

impl_endpoint_base!(FundamentalsEndpoints);
