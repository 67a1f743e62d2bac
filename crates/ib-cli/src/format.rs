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

//! Text rendering of benchmarks and company ratios.
//!
//! Industry values arrive already in display units (billions, whole percent).
//! Company ratios are fractions and are scaled here so both columns compare.

use ib_models::{round_to, CompanyMetrics, IndustryInfo};

pub const NOT_AVAILABLE: &str = "n/a";

const BILLION: f64 = 1_000_000_000.0;

/// `$<n>B` with thousands separators, one decimal place only when fractional.
pub fn market_size(billions: Option<f64>) -> String {
  let Some(value) = billions.filter(|v| v.is_finite()) else {
    return NOT_AVAILABLE.to_string();
  };
  let sign = if value < 0.0 { "-" } else { "" };
  let rounded = round_to(value.abs(), 1);
  let whole = rounded.trunc();
  let tenths = ((rounded - whole) * 10.0).round() as u64;
  if tenths == 0 {
    format!("{}${}B", sign, group_thousands(whole as u64))
  } else {
    format!("{}${}.{}B", sign, group_thousands(whole as u64), tenths)
  }
}

/// `<v>%`
pub fn percent(value: Option<f64>) -> String {
  value.map(|v| format!("{}%", v)).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn number(value: Option<f64>) -> String {
  value.map(|v| v.to_string()).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn days(value: Option<i64>) -> String {
  value.map(|v| v.to_string()).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// A ratio expressed as a fraction, in percent with one decimal place
pub fn fraction_as_percent(value: Option<f64>) -> Option<f64> {
  value.map(|v| round_to(v * 100.0, 1))
}

fn group_thousands(value: u64) -> String {
  let digits = value.to_string();
  let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(c);
  }
  grouped
}

/// Debt to equity is compared as a percent of equity on both sides
pub const DEBT_TO_EQUITY_PERCENT: &str = "D/E (% of equity)";

/// One metric line: label, industry value, company value
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
  pub label: &'static str,
  pub industry: String,
  pub company: String,
}

impl Comparison {
  fn new(label: &'static str, industry: String, company: String) -> Self {
    Self { label, industry, company }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
  pub title: &'static str,
  pub rows: Vec<Comparison>,
}

/// Market size, profitability, efficiency and risk, side by side with the company.
///
/// Without company metrics the company column reads `n/a`.
pub fn comparison_sections(info: &IndustryInfo, company: Option<&CompanyMetrics>) -> Vec<Section> {
  let na = || NOT_AVAILABLE.to_string();
  let company_pct = |pick: fn(&CompanyMetrics) -> Option<f64>| percent(fraction_as_percent(company.and_then(pick)));
  let company_days = |pick: fn(&CompanyMetrics) -> Option<i64>| days(company.and_then(pick));
  let revenue = company.and_then(|c| c.revenue).map(|r| r.as_f64() / BILLION);

  vec![
    Section {
      title: "Market Size",
      rows: vec![
        Comparison::new("Market Size", market_size(info.market_size.revenue), market_size(revenue)),
        Comparison::new(
          "Past CAGR (5y)",
          percent(info.market_size.past_revenue_cagr_5y),
          company_pct(|c| c.revenue_cagr_5y),
        ),
        Comparison::new("Next CAGR (2y)", percent(info.market_size.next_revenue_cagr_2y), na()),
        Comparison::new("Next CAGR (5y)", percent(info.market_size.next_revenue_cagr_5y), na()),
      ],
    },
    Section {
      title: "Profitability",
      rows: vec![
        Comparison::new("Gross Margin", percent(info.profitability.gross_margin), company_pct(|c| c.gross_margin)),
        Comparison::new("EBIT Margin", percent(info.profitability.ebit_margin), company_pct(|c| c.ebit_margin)),
        Comparison::new("Net Margin", percent(info.profitability.net_margin), company_pct(|c| c.net_margin)),
        Comparison::new("ROC", percent(info.profitability.roc), company_pct(|c| c.return_on_capital)),
        Comparison::new("ROE", percent(info.profitability.roe), company_pct(|c| c.return_on_equity)),
      ],
    },
    Section {
      title: "Efficiency",
      rows: vec![
        Comparison::new(
          "Receivable Days (DSO)",
          days(info.efficiency.receivable_days),
          company_days(|c| c.receivable_days),
        ),
        Comparison::new(
          "Inventory Days (DSI)",
          days(info.efficiency.inventory_days),
          company_days(|c| c.inventory_days),
        ),
        Comparison::new("Payable Days (DPO)", days(info.efficiency.payable_days), company_days(|c| c.payable_days)),
      ],
    },
    Section {
      title: "Risk",
      rows: vec![
        Comparison::new("Number of Firms", number(info.risk.number_of_firms), na()),
        Comparison::new("Beta", number(info.risk.beta), number(company.and_then(|c| c.beta))),
        Comparison::new(
          DEBT_TO_EQUITY_PERCENT,
          percent(info.risk.debt_to_equity),
          company_pct(|c| c.debt_to_equity),
        ),
        Comparison::new("Cost of Capital", percent(info.risk.cost_of_capital), na()),
      ],
    },
  ]
}

/// Industry multiples; the company side is not derived.
pub fn multiples_section(info: &IndustryInfo) -> Section {
  let m = &info.multiples;
  let row = |label, value| Comparison::new(label, number(value), NOT_AVAILABLE.to_string());
  Section {
    title: "Multiples",
    rows: vec![
      row("Current PE", m.current_pe),
      row("Forward PE", m.forward_pe),
      row("EV/EBITDA", m.ev_ebitda),
      row("PBV", m.pbv),
      row("EV/Sales", m.ev_sales),
    ],
  }
}

/// Plain-text table of sections, with or without the company column.
pub fn render_sections(sections: &[Section], with_company: bool) -> String {
  let label_width = sections
    .iter()
    .flat_map(|s| s.rows.iter().map(|r| r.label.len()))
    .max()
    .unwrap_or(0);

  let mut out = String::new();
  for section in sections {
    out.push_str(&format!("\n{}\n", section.title));
    for row in &section.rows {
      if with_company {
        out.push_str(&format!(
          "  {:<width$}  {:>12}  {:>12}\n",
          row.label,
          row.industry,
          row.company,
          width = label_width
        ));
      } else {
        out.push_str(&format!("  {:<width$}  {:>12}\n", row.label, row.industry, width = label_width));
      }
    }
  }
  out
}

/// Company ratios, one per line
pub fn render_metrics(symbol: &str, metrics: &CompanyMetrics) -> String {
  let revenue = metrics.revenue.map(|r| r.as_f64() / BILLION);
  let lines = [
    ("Revenue (TTM)", market_size(revenue)),
    ("Gross Margin", percent(fraction_as_percent(metrics.gross_margin))),
    ("EBIT Margin", percent(fraction_as_percent(metrics.ebit_margin))),
    ("Net Margin", percent(fraction_as_percent(metrics.net_margin))),
    ("Receivable Days", days(metrics.receivable_days)),
    ("Inventory Days", days(metrics.inventory_days)),
    ("Payable Days", days(metrics.payable_days)),
    ("Debt/Equity (x)", number(metrics.debt_to_equity)),
    ("Return on Capital", percent(fraction_as_percent(metrics.return_on_capital))),
    ("Return on Equity", percent(fraction_as_percent(metrics.return_on_equity))),
    ("Beta", number(metrics.beta)),
    ("Revenue CAGR (5y)", percent(fraction_as_percent(metrics.revenue_cagr_5y))),
  ];

  let mut out = format!("{}\n", symbol);
  for (label, value) in lines {
    out.push_str(&format!("  {:<18} {:>10}\n", label, value));
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use ib_models::{EfficiencySummary, MarketSize, Numeric, RiskSummary};

  #[test]
  fn test_market_size() {
    assert_eq!(market_size(Some(1234.0)), "$1,234B");
    assert_eq!(market_size(Some(1234.5)), "$1,234.5B");
    assert_eq!(market_size(Some(73.0)), "$73B");
    assert_eq!(market_size(Some(0.25)), "$0.2B");
    assert_eq!(market_size(Some(1_000_000.0)), "$1,000,000B");
    assert_eq!(market_size(Some(-2.5)), "-$2.5B");
    assert_eq!(market_size(None), "n/a");
  }

  #[test]
  fn test_percent_and_number() {
    assert_eq!(percent(Some(45.0)), "45%");
    assert_eq!(percent(Some(9.1)), "9.1%");
    assert_eq!(percent(None), "n/a");
    assert_eq!(number(Some(1.23)), "1.23");
    assert_eq!(days(Some(74)), "74");
    assert_eq!(days(None), "n/a");
    assert_eq!(fraction_as_percent(Some(0.4)), Some(40.0));
    assert_eq!(fraction_as_percent(Some(0.081)), Some(8.1));
  }

  #[test]
  fn test_group_thousands() {
    assert_eq!(group_thousands(0), "0");
    assert_eq!(group_thousands(999), "999");
    assert_eq!(group_thousands(1000), "1,000");
    assert_eq!(group_thousands(21_000_000), "21,000,000");
  }

  fn info() -> IndustryInfo {
    IndustryInfo {
      company_name: "Crocs Inc".to_string(),
      industry_name: "Shoe".to_string(),
      market_size: MarketSize { revenue: Some(73.0), past_revenue_cagr_5y: Some(5.0), ..Default::default() },
      efficiency: EfficiencySummary { inventory_days: Some(74), ..Default::default() },
      risk: RiskSummary { beta: Some(1.23), number_of_firms: Some(11.0), ..Default::default() },
      ..Default::default()
    }
  }

  #[test]
  fn test_sections_without_company() {
    let sections = comparison_sections(&info(), None);
    assert_eq!(sections.len(), 4);
    assert_eq!(sections[0].rows[0].industry, "$73B");
    assert_eq!(sections[0].rows[0].company, "n/a");
    assert_eq!(sections[2].rows[1].industry, "74");
    assert_eq!(sections[3].rows[0].industry, "11");
  }

  #[test]
  fn test_sections_with_company() {
    let metrics = CompanyMetrics {
      revenue: Some(Numeric::Int(4_100_000_000)),
      gross_margin: Some(0.58),
      inventory_days: Some(101),
      beta: Some(2.01),
      debt_to_equity: Some(0.5),
      revenue_cagr_5y: Some(0.04),
      ..Default::default()
    };
    let sections = comparison_sections(&info(), Some(&metrics));
    assert_eq!(sections[0].rows[0].company, "$4.1B");
    assert_eq!(sections[0].rows[1].company, "4%");
    assert_eq!(sections[1].rows[0].company, "58%");
    assert_eq!(sections[1].rows[1].company, "n/a");
    assert_eq!(sections[2].rows[1].company, "101");
    assert_eq!(sections[3].rows[1].company, "2.01");
    assert_eq!(sections[3].rows[2].label, DEBT_TO_EQUITY_PERCENT);
    assert_eq!(sections[3].rows[2].company, "50%");
  }

  #[test]
  fn test_render_sections() {
    let text = render_sections(&comparison_sections(&info(), None), false);
    assert!(text.contains("\nMarket Size\n"));
    assert!(text.contains("Inventory Days (DSI)"));
    assert!(!text.contains("n/a  "));

    let text = render_metrics("CROX", &CompanyMetrics::default());
    assert!(text.starts_with("CROX\n"));
    assert!(text.contains("n/a"));
    assert!(text.contains("Debt/Equity (x)"));
  }
}
