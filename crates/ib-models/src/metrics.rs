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

//! Company-level ratios derived from TTM statements and the overview

use crate::common::Numeric;
use serde::{Deserialize, Serialize};

/// Ratios for one company. Every field is optional: missing inputs or a zero
/// denominator leave the metric empty rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyMetrics {
  /// TTM total revenue in reported currency
  pub revenue: Option<Numeric>,
  pub gross_margin: Option<f64>,
  pub ebit_margin: Option<f64>,
  pub net_margin: Option<f64>,
  pub receivable_days: Option<i64>,
  pub inventory_days: Option<i64>,
  pub payable_days: Option<i64>,
  pub debt_to_equity: Option<f64>,
  pub return_on_capital: Option<f64>,
  pub return_on_equity: Option<f64>,
  pub beta: Option<f64>,
  pub revenue_cagr_5y: Option<f64>,
}

impl CompanyMetrics {
  /// Whether any metric could be derived at all
  pub fn is_empty(&self) -> bool {
    *self == CompanyMetrics::default()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_is_empty() {
    assert!(CompanyMetrics::default().is_empty());
    let metrics = CompanyMetrics { beta: Some(1.2), ..Default::default() };
    assert!(!metrics.is_empty());
  }

  #[test]
  fn test_serializes_nulls() {
    let metrics = CompanyMetrics { revenue: Some(Numeric::Int(4_000)), ..Default::default() };
    let json = serde_json::to_value(&metrics).unwrap();
    assert_eq!(json["revenue"], serde_json::json!(4000));
    assert!(json["gross_margin"].is_null());
  }
}
