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

//! Company ratios from TTM statements and the overview

use crate::error::LoaderResult;
use crate::loader::{DataLoader, LoaderContext};
use crate::statements::{CompanyStatements, StatementLoader};
use async_trait::async_trait;
use ib_models::{round_to, safe_div, CompanyMetrics, CompanyOverview, TtmStatement};
use tracing::debug;

const DAYS_PER_YEAR: f64 = 365.0;

/// Derive the ratio set. Missing inputs or zero denominators leave a metric empty.
pub fn metrics_from_statements(
  income: Option<&TtmStatement>,
  balance: Option<&TtmStatement>,
  overview: &CompanyOverview,
) -> CompanyMetrics {
  let income_value = |field: &str| income.and_then(|s| s.number(field));
  let balance_value = |field: &str| balance.and_then(|s| s.number(field));

  let revenue = income.and_then(|s| s.get("totalRevenue"));
  let revenue_f = revenue.map(|r| r.as_f64());
  let gross_profit = income_value("grossProfit");

  let margin = |numerator: Option<f64>| safe_div(numerator, revenue_f).map(|m| round_to(m, 2));

  let cogs = income_value("costOfRevenue").or_else(|| match (revenue_f, gross_profit) {
    (Some(r), Some(g)) => Some(r - g),
    _ => None,
  });
  let days = |numerator: Option<f64>, denominator: Option<f64>| {
    safe_div(numerator, denominator).map(|ratio| (ratio * DAYS_PER_YEAR) as i64)
  };

  let total_debt = balance_value("shortLongTermDebtTotal").or_else(|| {
    match (balance_value("shortTermDebt"), balance_value("longTermDebt")) {
      (None, None) => None,
      (short, long) => Some(short.unwrap_or(0.0) + long.unwrap_or(0.0)),
    }
  });

  CompanyMetrics {
    revenue,
    gross_margin: margin(gross_profit),
    ebit_margin: margin(income_value("operatingIncome")),
    net_margin: margin(income_value("netIncome")),
    receivable_days: days(balance_value("currentNetReceivables"), revenue_f),
    inventory_days: days(balance_value("inventory"), cogs),
    payable_days: days(balance_value("currentAccountsPayable"), cogs),
    debt_to_equity: safe_div(total_debt, balance_value("totalShareholderEquity")).map(|r| round_to(r, 1)),
    return_on_capital: overview.number("ReturnOnAssetsTTM"),
    return_on_equity: overview.number("ReturnOnEquityTTM"),
    beta: overview.number("Beta").map(|b| round_to(b, 2)),
    revenue_cagr_5y: overview.rev_cagr_5y(),
  }
}

impl From<&CompanyStatements> for CompanyMetrics {
  fn from(statements: &CompanyStatements) -> Self {
    metrics_from_statements(
      statements.income_ttm.as_ref(),
      statements.balance_ttm.as_ref(),
      &statements.overview,
    )
  }
}

/// Fetch (or read from cache) everything needed and compute the ratios for a ticker.
pub async fn compute_financial_metrics(context: &LoaderContext, ticker: &str) -> LoaderResult<CompanyMetrics> {
  CompanyMetricsLoader.load(context, ticker.to_string()).await
}

pub struct CompanyMetricsLoader;

#[async_trait]
impl DataLoader for CompanyMetricsLoader {
  type Input = String;
  type Output = CompanyMetrics;

  async fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output> {
    let statements = StatementLoader.load(context, input).await?;
    let metrics = CompanyMetrics::from(&statements);
    debug!("Computed metrics for {}: {:?}", statements.symbol, metrics);
    Ok(metrics)
  }

  fn name(&self) -> &'static str {
    "CompanyMetricsLoader"
  }
}
