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

use crate::datasets::TableSource;
use crate::error::LoaderResult;
use crate::industry::{IndustryAggregator, IndustryFilter};
use crate::resolver::CompanyDirectory;
use ib_models::IndustryInfo;
use tracing::info;

/// Benchmarks of the industry a ticker belongs to.
///
/// Unknown tickers fail with [`crate::LoaderError::TickerNotFound`].
pub async fn get_industry_info<S: TableSource>(
  directory: &CompanyDirectory,
  aggregator: &IndustryAggregator<S>,
  ticker: &str,
) -> LoaderResult<IndustryInfo> {
  let (industry, company) = directory.resolve(ticker)?;
  info!("{} resolved to industry '{}'", ticker.trim().to_uppercase(), industry);

  let filter = IndustryFilter::only(&[industry.as_str()]);
  let snapshot = aggregator.snapshot(&filter).await?;
  Ok(IndustryInfo::from_snapshot(&snapshot, &industry, company))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::industry::fixtures::sample_source;
  use crate::resolver::{CompanyRecord, CountryScope};
  use crate::LoaderError;

  fn directory() -> CompanyDirectory {
    let record = |company: &str, ticker: &str, industry: &str| CompanyRecord {
      company: company.to_string(),
      exchange: "NasdaqGS".to_string(),
      ticker: ticker.to_string(),
      industry: industry.to_string(),
      sector: "Consumer Discretionary".to_string(),
      country: "United States".to_string(),
    };
    CompanyDirectory::new(
      vec![record("Crocs Inc", "CROX", "Shoe"), record("Levi Strauss", "LEVI", "Apparel")],
      CountryScope::default(),
    )
  }

  #[tokio::test]
  async fn test_industry_info_for_ticker() {
    let aggregator = IndustryAggregator::new(sample_source());
    let info = get_industry_info(&directory(), &aggregator, "crox").await.unwrap();

    assert_eq!(info.company_name, "Crocs Inc");
    assert_eq!(info.industry_name, "Shoe");
    assert_eq!(info.market_size.revenue, Some(73.0));
    assert_eq!(info.market_size.past_revenue_cagr_5y, Some(5.0));
    assert_eq!(info.market_size.next_revenue_cagr_5y, Some(0.0));
    assert_eq!(info.profitability.gross_margin, Some(45.0));
    assert_eq!(info.efficiency.inventory_days, Some(74));
    assert_eq!(info.risk.beta, Some(1.23));
    assert_eq!(info.multiples.ev_ebitda, Some(11.3));
    assert_eq!(info.multiples.forward_pe, None);
  }

  #[tokio::test]
  async fn test_industry_info_zero_cogs_leaves_days_empty() {
    let aggregator = IndustryAggregator::new(sample_source());
    let info = get_industry_info(&directory(), &aggregator, "LEVI").await.unwrap();
    assert_eq!(info.efficiency.receivable_days, Some(40));
    assert_eq!(info.efficiency.inventory_days, None);
    assert_eq!(info.efficiency.payable_days, None);
  }

  #[tokio::test]
  async fn test_unknown_ticker_skips_datasets() {
    let aggregator = IndustryAggregator::new(sample_source());
    let err = get_industry_info(&directory(), &aggregator, "ZZZZ").await.unwrap_err();
    assert!(matches!(err, LoaderError::TickerNotFound(_)));
    assert!(aggregator.source().loads.lock().unwrap().is_empty());
  }
}
