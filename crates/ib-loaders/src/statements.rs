/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Cached fetching of company overviews and financial statements

use crate::cache::{CacheResult, FileCache};
use crate::error::LoaderResult;
use crate::loader::{normalize_ticker, DataLoader, LoaderContext};
use crate::ttm::{build_ttm, compute_5yr_cagr};
use async_trait::async_trait;
use ib_client::AlphaVantageClient;
use ib_core::FuncType;
use ib_models::{CompanyOverview, FinancialStatement, TtmStatement};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Income statement line item behind the five year revenue CAGR
pub const REVENUE_FIELD: &str = "totalRevenue";

/// Fetches fundamentals through the file cache.
///
/// Every call is awaited in turn; nothing is fetched concurrently.
pub struct StatementFetcher<'a> {
  client: &'a AlphaVantageClient,
  cache: &'a FileCache,
}

impl<'a> StatementFetcher<'a> {
  pub fn new(client: &'a AlphaVantageClient, cache: &'a FileCache) -> Self {
    Self { client, cache }
  }

  /// Raw payload for `(symbol, function)`, from the cache when usable.
  ///
  /// On a miss the payload is fetched, written back (best effort) and returned,
  /// error payloads included.
  #[instrument(skip(self))]
  pub async fn fetch(&self, symbol: &str, function: FuncType) -> LoaderResult<Value> {
    let symbol = normalize_ticker(symbol)?;
    match self.cache.get(&symbol, function).await {
      CacheResult::Hit(data) => return Ok(data),
      CacheResult::Stale(fetched_at) => info!("Refreshing {} {} cached at {}", symbol, function, fetched_at),
      _ => {}
    }

    info!("Fetching {} for {}", function, symbol);
    let data = self.client.fundamentals().fetch(&symbol, function).await?;
    self.cache.set(&symbol, function, &data).await;
    Ok(data)
  }

  /// One statement type; `None` when the payload is not a JSON object.
  pub async fn fetch_statement(
    &self,
    symbol: &str,
    function: FuncType,
  ) -> LoaderResult<Option<FinancialStatement>> {
    let value = self.fetch(symbol, function).await?;
    Ok(FinancialStatement::from_value(&value))
  }

  /// TTM view of one statement type.
  pub async fn fetch_ttm(&self, symbol: &str, function: FuncType) -> LoaderResult<Option<TtmStatement>> {
    let statement = self.fetch_statement(symbol, function).await?;
    Ok(build_ttm(statement.as_ref()))
  }

  /// Company overview with numeric fields converted and `RevCAGR5y` attached.
  ///
  /// A cached overview already carries both and is returned as stored.
  #[instrument(skip(self))]
  pub async fn fetch_overview(&self, symbol: &str) -> LoaderResult<CompanyOverview> {
    let symbol = normalize_ticker(symbol)?;
    if let CacheResult::Hit(data) = self.cache.get(&symbol, FuncType::Overview).await {
      return Ok(CompanyOverview::from_value(data));
    }

    info!("Fetching {} for {}", FuncType::Overview, symbol);
    let raw = self.client.fundamentals().company_overview(&symbol).await?;
    let mut overview = CompanyOverview::from_value(raw).normalize_numbers();

    let income = match self.cache.peek(&symbol, FuncType::IncomeStatement).await {
      Some(cached) => {
        debug!("Using cached income statement for {} revenue CAGR", symbol);
        Some(cached)
      }
      None => match self.client.fundamentals().income_statement(&symbol).await {
        Ok(fetched) => {
          self.cache.set(&symbol, FuncType::IncomeStatement, &fetched).await;
          Some(fetched)
        }
        Err(e) => {
          warn!("Income statement for {} unavailable, RevCAGR5y left empty: {}", symbol, e);
          None
        }
      },
    };
    let statement = income.as_ref().and_then(FinancialStatement::from_value);
    overview.set_rev_cagr_5y(compute_5yr_cagr(statement.as_ref(), REVENUE_FIELD));

    self.cache.set(&symbol, FuncType::Overview, &overview.to_value()).await;
    Ok(overview)
  }
}

/// Overview plus TTM statements for one company
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompanyStatements {
  pub symbol: String,
  pub overview: CompanyOverview,
  pub income_ttm: Option<TtmStatement>,
  pub balance_ttm: Option<TtmStatement>,
  pub cashflow_ttm: Option<TtmStatement>,
}

/// Loads the three statements (as TTM) and then the overview
pub struct StatementLoader;

#[async_trait]
impl DataLoader for StatementLoader {
  type Input = String;
  type Output = CompanyStatements;

  async fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output> {
    self.validate_input(&input).await?;
    let symbol = normalize_ticker(&input)?;
    let fetcher = context.fetcher();

    let income_ttm = fetcher.fetch_ttm(&symbol, FuncType::IncomeStatement).await?;
    let balance_ttm = fetcher.fetch_ttm(&symbol, FuncType::BalanceSheet).await?;
    let cashflow_ttm = fetcher.fetch_ttm(&symbol, FuncType::CashFlow).await?;
    let overview = fetcher.fetch_overview(&symbol).await?;

    Ok(CompanyStatements { symbol, overview, income_ttm, balance_ttm, cashflow_ttm })
  }

  async fn validate_input(&self, input: &Self::Input) -> LoaderResult<()> {
    normalize_ticker(input).map(|_| ())
  }

  fn name(&self) -> &'static str {
    "StatementLoader"
  }
}
