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

//! Trailing-twelve-month statements and growth rates from AlphaVantage reports

use ib_models::{
  report_value, round_to, FinancialStatement, Numeric, TtmStatement, FISCAL_DATE_ENDING,
  REPORTED_CURRENCY,
};
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::warn;

/// Quarters summed into a full trailing year
pub const TTM_QUARTERS: usize = 4;

/// Years spanned by [`compute_5yr_cagr`]
pub const CAGR_YEARS: usize = 5;

/// Sum the latest (up to four) quarterly reports field by field.
///
/// Returns `None` when there are no quarterly reports. Fewer than four quarters
/// still produce a statement; `TtmStatement::is_complete` tells them apart.
pub fn build_ttm(statement: Option<&FinancialStatement>) -> Option<TtmStatement> {
  let statement = statement?;
  let latest: Vec<_> = statement.quarterly_reports.iter().take(TTM_QUARTERS).collect();
  let first = latest.first()?;

  let keys: BTreeSet<&String> = latest.iter().flat_map(|report| report.keys()).collect();

  let mut ttm = TtmStatement {
    fiscal_date_ending: first.get(FISCAL_DATE_ENDING).cloned(),
    reported_currency: first.get(REPORTED_CURRENCY).cloned(),
    ..Default::default()
  };

  for key in keys {
    if key == FISCAL_DATE_ENDING || key == REPORTED_CURRENCY {
      continue;
    }
    let total = Numeric::sum(latest.iter().map(|report| report_value(report, key)));
    ttm.values.insert(key.clone(), total);
  }

  ttm.source_quarters = latest
    .iter()
    .map(|report| report.get(FISCAL_DATE_ENDING).and_then(Value::as_str).map(str::to_string))
    .collect();

  if !ttm.is_complete() {
    warn!(
      "TTM for {} built from {} quarter(s) only",
      statement.symbol.as_deref().unwrap_or("unknown symbol"),
      ttm.quarters_used()
    );
  }
  Some(ttm)
}

/// Five year compound growth of `field` across the annual reports, rounded to 2 decimals.
///
/// Needs at least six annual reports with strictly positive values at index 0 and 5.
pub fn compute_5yr_cagr(statement: Option<&FinancialStatement>, field: &str) -> Option<f64> {
  let reports = &statement?.annual_reports;
  if reports.len() <= CAGR_YEARS {
    return None;
  }

  let latest = report_value(&reports[0], field)?.as_f64();
  let earlier = report_value(&reports[CAGR_YEARS], field)?.as_f64();
  if latest <= 0.0 || earlier <= 0.0 {
    return None;
  }

  let cagr = (latest / earlier).powf(1.0 / CAGR_YEARS as f64) - 1.0;
  cagr.is_finite().then(|| round_to(cagr, 2))
}
