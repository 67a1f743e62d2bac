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

//! Ticker to industry resolution over Damodaran's company master table (`indname.xlsx`).

use crate::error::{LoaderError, LoaderResult};
use crate::spreadsheet::{normalize_name, Cell, Grid};
use std::collections::BTreeSet;
use tracing::debug;

/// Workbook and sheet holding the global company list
pub const COMPANY_WORKBOOK: &str = "indname.xlsx";
pub const COMPANY_SHEET: &str = "By country";

/// Pink-sheet listings are dropped unless asked for
pub const PINK_SHEET_EXCHANGE: &str = "OTCPK";

/// Country used when no scope is configured
pub const DEFAULT_COUNTRY: &str = "United States";

const COMPANY_COLUMN: &str = "Company Name";
const EXCHANGE_TICKER_COLUMN: &str = "Exchange:Ticker";
const INDUSTRY_COLUMN: &str = "Industry Group";
const SECTOR_COLUMN: &str = "Primary Sector";
const COUNTRY_COLUMN: &str = "Country";

/// Which countries' listings a lookup considers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryScope {
  All,
  Countries(Vec<String>),
}

impl Default for CountryScope {
  fn default() -> Self {
    CountryScope::Countries(vec![DEFAULT_COUNTRY.to_string()])
  }
}

impl CountryScope {
  /// Parse `All` or a comma separated country list.
  pub fn parse(raw: &str) -> Self {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      return CountryScope::default();
    }
    if trimmed.eq_ignore_ascii_case("all") {
      return CountryScope::All;
    }
    CountryScope::Countries(
      trimmed.split(',').map(str::trim).filter(|c| !c.is_empty()).map(str::to_string).collect(),
    )
  }

  pub fn includes(&self, country: &str) -> bool {
    match self {
      CountryScope::All => true,
      CountryScope::Countries(countries) => countries.iter().any(|c| c == country),
    }
  }
}

/// One listing from the company master table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRecord {
  pub company: String,
  pub exchange: String,
  pub ticker: String,
  pub industry: String,
  pub sector: String,
  pub country: String,
}

impl CompanyRecord {
  pub fn is_pink_sheet(&self) -> bool {
    self.exchange.contains(PINK_SHEET_EXCHANGE)
  }
}

/// Company master table with a country scope and pink-sheet policy.
#[derive(Debug, Clone)]
pub struct CompanyDirectory {
  records: Vec<CompanyRecord>,
  scope: CountryScope,
  include_pink: bool,
}

impl CompanyDirectory {
  pub fn new(records: Vec<CompanyRecord>, scope: CountryScope) -> Self {
    Self { records, scope, include_pink: false }
  }

  /// Builder: keep OTCPK listings
  pub fn with_pink_sheets(mut self, include: bool) -> Self {
    self.include_pink = include;
    self
  }

  /// Parse the `By country` sheet. Row 0 is the header; columns are found by name.
  pub fn from_grid(grid: &Grid, scope: CountryScope) -> LoaderResult<Self> {
    let header = grid.rows().first().ok_or_else(|| {
      LoaderError::SpreadsheetError(format!("{} has no header row", COMPANY_WORKBOOK))
    })?;
    let column = |name: &str| -> LoaderResult<usize> {
      header.iter().position(|cell| cell.as_text().as_deref() == Some(name)).ok_or_else(|| {
        LoaderError::SpreadsheetError(format!("column '{}' missing from {}", name, COMPANY_WORKBOOK))
      })
    };
    let company_col = column(COMPANY_COLUMN)?;
    let ticker_col = column(EXCHANGE_TICKER_COLUMN)?;
    let industry_col = column(INDUSTRY_COLUMN)?;
    let sector_col = column(SECTOR_COLUMN)?;
    let country_col = column(COUNTRY_COLUMN)?;

    let text = |row: &[Cell], col: usize| row.get(col).and_then(Cell::as_text).unwrap_or_default();
    let mut records = Vec::new();
    for row in grid.rows().iter().skip(1) {
      let exchange_ticker = text(row, ticker_col);
      if exchange_ticker.is_empty() {
        continue;
      }
      let (exchange, ticker) = match exchange_ticker.split_once(':') {
        Some((exchange, ticker)) => (exchange.trim().to_string(), ticker.trim().to_string()),
        None => (String::new(), exchange_ticker.clone()),
      };
      records.push(CompanyRecord {
        company: text(row, company_col),
        exchange,
        ticker,
        industry: text(row, industry_col),
        sector: text(row, sector_col),
        country: text(row, country_col),
      });
    }
    debug!("Loaded {} company listings", records.len());
    Ok(Self::new(records, scope))
  }

  pub fn scope(&self) -> &CountryScope {
    &self.scope
  }

  /// Listings inside the country scope, pink sheets dropped unless enabled
  pub fn listings(&self) -> impl Iterator<Item = &CompanyRecord> {
    self
      .records
      .iter()
      .filter(move |r| self.scope.includes(&r.country))
      .filter(move |r| self.include_pink || !r.is_pink_sheet())
  }

  fn find(&self, ticker: &str) -> LoaderResult<&CompanyRecord> {
    let wanted = ticker.trim().to_uppercase();
    self
      .listings()
      .find(|r| r.ticker.to_uppercase() == wanted)
      .ok_or_else(|| LoaderError::TickerNotFound(wanted))
  }

  /// `(industry, company name)` for a ticker
  pub fn resolve(&self, ticker: &str) -> LoaderResult<(String, String)> {
    let record = self.find(ticker)?;
    Ok((record.industry.clone(), record.company.clone()))
  }

  /// `(industry, sector)` for a ticker
  pub fn industry_and_sector(&self, ticker: &str) -> LoaderResult<(String, String)> {
    let record = self.find(ticker)?;
    Ok((record.industry.clone(), record.sector.clone()))
  }

  /// Every industry group in the table, in first-seen order
  pub fn industries(&self) -> Vec<String> {
    unique(self.records.iter().map(|r| r.industry.as_str()))
  }

  /// Every country in the table, in first-seen order
  pub fn countries(&self) -> Vec<String> {
    unique(self.records.iter().map(|r| r.country.as_str()))
  }

  /// Primary sectors served by companies of an industry
  pub fn sectors(&self, industry: &str) -> Vec<String> {
    unique(self.listings().filter(|r| r.industry == industry).map(|r| r.sector.as_str()))
  }

  /// Tickers of every in-scope company belonging to one of `industries`.
  ///
  /// Unknown industry or country names fail with the list of valid values.
  pub fn tickers_for(&self, industries: &[String]) -> LoaderResult<Vec<String>> {
    let valid_industries = self.industries();
    let unknown: Vec<_> = industries.iter().filter(|i| !valid_industries.contains(i)).collect();
    if !unknown.is_empty() {
      return Err(LoaderError::InvalidData(format!(
        "unknown industries {:?}; valid values are: {}",
        unknown,
        valid_industries.join(", ")
      )));
    }

    if let CountryScope::Countries(countries) = &self.scope {
      let valid_countries = self.countries();
      let unknown: Vec<_> = countries.iter().filter(|c| !valid_countries.contains(c)).collect();
      if !unknown.is_empty() {
        return Err(LoaderError::InvalidData(format!(
          "unknown countries {:?}; valid values are: {}",
          unknown,
          valid_countries.join(", ")
        )));
      }
    }

    let wanted: BTreeSet<&str> = industries.iter().map(String::as_str).collect();
    Ok(
      self
        .records
        .iter()
        .filter(|r| self.scope.includes(&r.country) && wanted.contains(r.industry.as_str()))
        .map(|r| r.ticker.clone())
        .collect(),
    )
  }
}

fn unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
  let mut seen = BTreeSet::new();
  values
    .filter(|v| !v.is_empty())
    .filter(|v| seen.insert(normalize_name(v)))
    .map(str::to_string)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::spreadsheet::test_grids::text;

  fn directory(scope: CountryScope) -> CompanyDirectory {
    let header = ["Company Name", "Exchange:Ticker", "Industry Group", "Primary Sector", "Country", "Broad Group"];
    let rows = [
      ["Crocs Inc (NasdaqGS:CROX)", "NasdaqGS:CROX", "Shoe", "Consumer Discretionary", "United States", "US"],
      ["Nike Inc (NYSE:NKE)", "NYSE:NKE", "Shoe", "Consumer Discretionary", "United States", "US"],
      ["Pinky Shoes", "OTCPK:PNKY", "Shoe", "Consumer Staples", "United States", "US"],
      ["Adidas AG (XTRA:ADS)", "XTRA:ADS", "Shoe", "Consumer Discretionary", "Germany", "Europe"],
      ["Amazon.com (NasdaqGS:AMZN)", "NasdaqGS:AMZN", "Retail (General)", "Consumer Discretionary", "United States", "US"],
      ["", "", "", "", "", ""],
    ];
    let mut grid = vec![header.iter().map(|h| text(h)).collect::<Vec<_>>()];
    grid.extend(rows.iter().map(|r| r.iter().map(|c| text(c)).collect::<Vec<_>>()));
    CompanyDirectory::from_grid(&Grid::new(grid), scope).unwrap()
  }

  #[test]
  fn test_resolve_known_ticker() {
    let dir = directory(CountryScope::default());
    let (industry, company) = dir.resolve("crox").unwrap();
    assert_eq!(industry, "Shoe");
    assert_eq!(company, "Crocs Inc (NasdaqGS:CROX)");
    assert_eq!(dir.industry_and_sector("NKE").unwrap().1, "Consumer Discretionary");
  }

  #[test]
  fn test_resolve_unknown_ticker_is_not_found() {
    let dir = directory(CountryScope::default());
    let err = dir.resolve("ZZZZ").unwrap_err();
    assert!(matches!(err, LoaderError::TickerNotFound(ref t) if t == "ZZZZ"));
    assert!(err.is_not_found());

    // Out of scope and pink-sheet listings are not resolvable by default
    assert!(dir.resolve("ADS").unwrap_err().is_not_found());
    assert!(dir.resolve("PNKY").unwrap_err().is_not_found());
  }

  #[test]
  fn test_scope_and_pink_sheet_policy() {
    let dir = directory(CountryScope::All).with_pink_sheets(true);
    assert!(dir.resolve("ADS").is_ok());
    assert!(dir.resolve("PNKY").is_ok());
    assert_eq!(dir.listings().count(), 5);
  }

  #[test]
  fn test_lists() {
    let dir = directory(CountryScope::default());
    assert_eq!(dir.industries(), vec!["Shoe".to_string(), "Retail (General)".to_string()]);
    assert_eq!(dir.countries(), vec!["United States".to_string(), "Germany".to_string()]);
    assert_eq!(dir.sectors("Shoe"), vec!["Consumer Discretionary".to_string()]);
  }

  #[test]
  fn test_tickers_for() {
    let dir = directory(CountryScope::default());
    let tickers = dir.tickers_for(&["Shoe".to_string()]).unwrap();
    assert_eq!(tickers, vec!["CROX", "NKE", "PNKY"]);

    let err = dir.tickers_for(&["Shoes".to_string()]).unwrap_err();
    assert!(err.to_string().contains("valid values are: Shoe, Retail (General)"));

    let bad_scope = directory(CountryScope::Countries(vec!["Atlantis".to_string()]));
    assert!(bad_scope.tickers_for(&["Shoe".to_string()]).is_err());
  }

  #[test]
  fn test_country_scope_parse() {
    assert_eq!(CountryScope::parse("All"), CountryScope::All);
    assert_eq!(CountryScope::parse(""), CountryScope::default());
    assert_eq!(
      CountryScope::parse("United States, Canada"),
      CountryScope::Countries(vec!["United States".to_string(), "Canada".to_string()])
    );
  }

  #[test]
  fn test_missing_column_is_error() {
    let grid = Grid::new(vec![vec![text("Company Name"), text("Ticker")]]);
    let err = CompanyDirectory::from_grid(&grid, CountryScope::All).unwrap_err();
    assert!(matches!(err, LoaderError::SpreadsheetError(_)));
  }
}
