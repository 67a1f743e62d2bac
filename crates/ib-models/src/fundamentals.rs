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

//! Fundamental analysis data models for company financials
//!
//! AlphaVantage returns statements as flat maps of line items to string-encoded
//! numbers. The models here keep that shape and convert lazily, so that a cached
//! payload can be written back byte-for-byte.

use crate::common::{convert_num, Numeric};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Overview fields that stay textual even when they look numeric
pub const OVERVIEW_TEXT_FIELDS: [&str; 13] = [
  "Address",
  "Description",
  "AssetType",
  "Country",
  "Currency",
  "Exchange",
  "FiscalYearEnd",
  "Industry",
  "Name",
  "OfficialSite",
  "Sector",
  "Symbol",
  "CIK",
];

/// Key under which the derived five year revenue CAGR is stored on the overview
pub const REV_CAGR_5Y_FIELD: &str = "RevCAGR5y";

/// Housekeeping fields copied from the latest quarter instead of summed
pub const FISCAL_DATE_ENDING: &str = "fiscalDateEnding";
pub const REPORTED_CURRENCY: &str = "reportedCurrency";

/// Company overview snapshot, kept as the provider's flat field map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyOverview(Map<String, Value>);

impl CompanyOverview {
  /// Wrap a raw API payload. Anything that is not a JSON object yields an empty overview.
  pub fn from_value(value: Value) -> Self {
    match value {
      Value::Object(map) => CompanyOverview(map),
      _ => CompanyOverview::default(),
    }
  }

  pub fn into_value(self) -> Value {
    Value::Object(self.0)
  }

  pub fn to_value(&self) -> Value {
    Value::Object(self.0.clone())
  }

  pub fn as_map(&self) -> &Map<String, Value> {
    &self.0
  }

  pub fn get(&self, field: &str) -> Option<&Value> {
    self.0.get(field)
  }

  /// Numeric view of a field; numbers pass through and numeric strings are converted.
  pub fn number(&self, field: &str) -> Option<f64> {
    self.0.get(field).and_then(Numeric::from_value).map(|n| n.as_f64())
  }

  pub fn text(&self, field: &str) -> Option<&str> {
    self.0.get(field).and_then(Value::as_str)
  }

  pub fn symbol(&self) -> Option<&str> {
    self.text("Symbol").filter(|s| !s.is_empty() && *s != "None")
  }

  pub fn name(&self) -> Option<&str> {
    self.text("Name")
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn rev_cagr_5y(&self) -> Option<f64> {
    self.number(REV_CAGR_5Y_FIELD)
  }

  pub fn set_rev_cagr_5y(&mut self, cagr: Option<f64>) {
    let value = cagr
      .and_then(serde_json::Number::from_f64)
      .map(Value::Number)
      .unwrap_or(Value::Null);
    self.0.insert(REV_CAGR_5Y_FIELD.to_string(), value);
  }

  /// Whether a field keeps its string form during normalisation.
  pub fn is_textual_field(field: &str) -> bool {
    if OVERVIEW_TEXT_FIELDS.contains(&field) {
      return true;
    }
    let lower = field.to_lowercase();
    lower.contains("date") || lower.contains("quarter")
  }

  /// Convert every non-textual string field to a number where possible.
  ///
  /// Fields that fail to convert keep their original value.
  pub fn normalize_numbers(mut self) -> Self {
    for (field, value) in self.0.iter_mut() {
      if Self::is_textual_field(field) {
        continue;
      }
      if let Value::String(raw) = value {
        if let Some(converted) = convert_num(raw) {
          *value = converted.to_value();
        }
      }
    }
    self
  }
}

/// A single period report: line item name to string-encoded number.
pub type StatementReport = BTreeMap<String, Value>;

/// Income statement, balance sheet or cash flow response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatement {
  /// Stock symbol
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub symbol: Option<String>,

  /// Annual reports, most recent first
  #[serde(rename = "annualReports", default)]
  pub annual_reports: Vec<StatementReport>,

  /// Quarterly reports, most recent first
  #[serde(rename = "quarterlyReports", default)]
  pub quarterly_reports: Vec<StatementReport>,
}

impl FinancialStatement {
  /// Read a statement out of a raw payload.
  ///
  /// Returns `None` when the payload is not an object. Error payloads (for example a
  /// rate-limit `Information` message) produce a statement without reports.
  pub fn from_value(value: &Value) -> Option<Self> {
    let obj = value.as_object()?;
    let reports = |key: &str| -> Vec<StatementReport> {
      obj
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
          items
            .iter()
            .filter_map(Value::as_object)
            .map(|report| report.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .collect()
        })
        .unwrap_or_default()
    };

    Some(FinancialStatement {
      symbol: obj.get("symbol").and_then(Value::as_str).map(str::to_string),
      annual_reports: reports("annualReports"),
      quarterly_reports: reports("quarterlyReports"),
    })
  }
}

/// Convert one line item of a report.
pub fn report_value(report: &StatementReport, field: &str) -> Option<Numeric> {
  report.get(field).and_then(Numeric::from_value)
}

/// Trailing-twelve-month statement synthesised from the latest quarterly reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TtmStatement {
  #[serde(rename = "fiscalDateEnding")]
  pub fiscal_date_ending: Option<Value>,

  #[serde(rename = "reportedCurrency")]
  pub reported_currency: Option<Value>,

  /// Summed line items; `None` where every quarter was missing the item
  #[serde(flatten)]
  pub values: BTreeMap<String, Option<Numeric>>,

  /// Period end dates of the quarters that were summed, most recent first
  #[serde(rename = "_ttm_from_quarters")]
  pub source_quarters: Vec<Option<String>>,
}

impl TtmStatement {
  /// Number of quarterly reports that went into the sums
  pub fn quarters_used(&self) -> usize {
    self.source_quarters.len()
  }

  /// A full trailing year needs four quarters; fewer means the sums are partial.
  pub fn is_complete(&self) -> bool {
    self.quarters_used() == 4
  }

  pub fn get(&self, field: &str) -> Option<Numeric> {
    self.values.get(field).copied().flatten()
  }

  pub fn number(&self, field: &str) -> Option<f64> {
    self.get(field).map(|n| n.as_f64())
  }
}
