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

//! Numeric helpers shared by statement, overview and industry models

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A number parsed from an API string, keeping track of whether it was integral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
  Int(i64),
  Float(f64),
}

impl Numeric {
  pub fn as_f64(&self) -> f64 {
    match *self {
      Numeric::Int(v) => v as f64,
      Numeric::Float(v) => v,
    }
  }

  pub fn is_float(&self) -> bool {
    matches!(self, Numeric::Float(_))
  }

  /// Sum the present values. Returns `None` only when every value is missing.
  ///
  /// The total stays integral unless a component was a float or the integer sum overflows.
  pub fn sum<I>(values: I) -> Option<Numeric>
  where
    I: IntoIterator<Item = Option<Numeric>>,
  {
    let mut total: Option<Numeric> = None;
    for value in values.into_iter().flatten() {
      total = Some(match (total, value) {
        (None, v) => v,
        (Some(Numeric::Int(a)), Numeric::Int(b)) => match a.checked_add(b) {
          Some(sum) => Numeric::Int(sum),
          None => Numeric::Float(a as f64 + b as f64),
        },
        (Some(acc), v) => Numeric::Float(acc.as_f64() + v.as_f64()),
      });
    }
    total
  }

  /// Convert a JSON value: numbers are taken as-is, strings go through [`convert_num`].
  pub fn from_value(value: &Value) -> Option<Numeric> {
    match value {
      Value::Number(n) => match n.as_i64() {
        Some(i) => Some(Numeric::Int(i)),
        None => n.as_f64().map(Numeric::Float),
      },
      Value::String(s) => convert_num(s),
      _ => None,
    }
  }

  pub fn to_value(&self) -> Value {
    match *self {
      Numeric::Int(v) => Value::from(v),
      Numeric::Float(v) => serde_json::Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null),
    }
  }
}

impl std::fmt::Display for Numeric {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Numeric::Int(v) => write!(f, "{}", v),
      Numeric::Float(v) => write!(f, "{}", v),
    }
  }
}

/// Convert an AlphaVantage numeric string into a number.
///
/// Thousands separators are stripped and `(500)` reads as `-500`. Empty strings and
/// `"None"` are missing values. Strings with a decimal point parse as floats, anything
/// else tries an integer first and then a float.
pub fn convert_num(raw: &str) -> Option<Numeric> {
  let trimmed = raw.trim();
  if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
    return None;
  }

  let mut s = trimmed.replace(',', "");
  if s.len() >= 2 && s.starts_with('(') && s.ends_with(')') {
    s = format!("-{}", &s[1..s.len() - 1]);
  }

  if s.contains('.') {
    return s.parse::<f64>().ok().map(Numeric::Float);
  }
  match s.parse::<i64>() {
    Ok(v) => Some(Numeric::Int(v)),
    Err(_) => s.parse::<f64>().ok().map(Numeric::Float),
  }
}

/// Round to `decimals` places, ties to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
  let factor = 10f64.powi(decimals);
  (value * factor).round_ties_even() / factor
}

/// `numerator / denominator`, or `None` when either side is missing or the denominator is zero.
pub fn safe_div(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
  match (numerator, denominator) {
    (Some(n), Some(d)) if d != 0.0 => {
      let ratio = n / d;
      ratio.is_finite().then_some(ratio)
    }
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_convert_num_thousands_separator() {
    assert_eq!(convert_num("1,234"), Some(Numeric::Int(1234)));
  }

  #[test]
  fn test_convert_num_parenthesized_negative() {
    assert_eq!(convert_num("(500)"), Some(Numeric::Int(-500)));
    assert_eq!(convert_num("(1,250.5)"), Some(Numeric::Float(-1250.5)));
  }

  #[test]
  fn test_convert_num_missing_values() {
    assert_eq!(convert_num(""), None);
    assert_eq!(convert_num("   "), None);
    assert_eq!(convert_num("None"), None);
    assert_eq!(convert_num("none"), None);
  }

  #[test]
  fn test_convert_num_float_and_garbage() {
    assert_eq!(convert_num("12.5"), Some(Numeric::Float(12.5)));
    assert_eq!(convert_num("1e3"), Some(Numeric::Float(1000.0)));
    assert_eq!(convert_num("N/A"), None);
    assert_eq!(convert_num("1.2.3"), None);
  }

  #[test]
  fn test_sum_keeps_integers() {
    let values = [Some(Numeric::Int(10)), None, Some(Numeric::Int(30))];
    assert_eq!(Numeric::sum(values), Some(Numeric::Int(40)));
  }

  #[test]
  fn test_sum_promotes_to_float() {
    let values = [Some(Numeric::Int(10)), Some(Numeric::Float(0.5))];
    assert_eq!(Numeric::sum(values), Some(Numeric::Float(10.5)));
  }

  #[test]
  fn test_sum_all_missing() {
    assert_eq!(Numeric::sum([None, None]), None);
  }

  #[test]
  fn test_from_value() {
    assert_eq!(Numeric::from_value(&json!(7)), Some(Numeric::Int(7)));
    assert_eq!(Numeric::from_value(&json!(1.25)), Some(Numeric::Float(1.25)));
    assert_eq!(Numeric::from_value(&json!("2,000")), Some(Numeric::Int(2000)));
    assert_eq!(Numeric::from_value(&json!(null)), None);
    assert_eq!(Numeric::from_value(&json!(true)), None);
  }

  #[test]
  fn test_round_to_and_safe_div() {
    assert_eq!(round_to(0.0390, 2), 0.04);
    assert_eq!(round_to(2.5, 0), 2.0);
    assert_eq!(round_to(1.234, 1), 1.2);
    assert_eq!(safe_div(Some(1.0), Some(0.0)), None);
    assert_eq!(safe_div(None, Some(2.0)), None);
    assert_eq!(safe_div(Some(1.0), Some(4.0)), Some(0.25));
  }
}
