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

//! Industry benchmark models built from Damodaran's annual datasets
//!
//! Each topic is a table keyed by industry name. Topics that fill gaps with zero
//! (fundamentals, profitability, demand) use plain `f64`; the others keep `None`
//! where the source spreadsheet had no value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate row present in every dataset
pub const TOTAL_MARKET: &str = "Total Market (without financials)";

/// Per-industry table for one topic, ordered by industry name
pub type IndustryTable<T> = BTreeMap<String, T>;

/// Dollar fundamentals, in billions of USD
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalsRow {
  pub revenue: f64,
  pub gross_profit: f64,
  pub ebitda: f64,
  pub ebit: f64,
  pub net_income: f64,
}

/// Margins and returns, in percent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilityRow {
  pub gross_margin: f64,
  pub net_margin: f64,
  pub ebit_margin: f64,
  pub ebitda_margin: f64,
  pub rnd_to_sales: f64,
  pub sga_to_sales: f64,
  pub roe: f64,
  pub roe_minus_coe: f64,
  pub roc: f64,
  pub roc_minus_wacc: f64,
  /// Economic value added, billions of USD
  pub eva: f64,
}

/// Working-capital turnover in days
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyRow {
  pub dso: Option<f64>,
  pub dsi: Option<f64>,
  pub dpo: Option<f64>,
  pub revenue_per_employee: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskRow {
  pub number_of_firms: Option<f64>,
  /// Debt to equity, percent
  pub debt_to_equity: Option<f64>,
  pub beta: Option<f64>,
  pub cost_of_equity: Option<f64>,
  pub after_tax_cost_of_debt: Option<f64>,
  pub cost_of_capital: Option<f64>,
  pub pct_money_losing: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiplesRow {
  pub pbv: Option<f64>,
  pub ev_to_invested_capital: Option<f64>,
  pub current_pe: Option<f64>,
  pub trailing_pe: Option<f64>,
  pub forward_pe: Option<f64>,
  pub price_to_sales: Option<f64>,
  pub ev_to_sales: Option<f64>,
  pub ev_to_ebitda: Option<f64>,
  pub ev_to_ebit: Option<f64>,
}

/// Historical and expected growth, in percent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandRow {
  pub net_income_cagr_5y: f64,
  pub revenue_cagr_5y: f64,
  pub expected_revenue_growth_2y: f64,
  pub expected_revenue_growth_5y: f64,
}

/// All topics computed for one request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndustrySnapshot {
  pub fundamentals: IndustryTable<FundamentalsRow>,
  pub profitability: IndustryTable<ProfitabilityRow>,
  pub efficiency: IndustryTable<EfficiencyRow>,
  pub risk: IndustryTable<RiskRow>,
  pub multiples: IndustryTable<MultiplesRow>,
  pub demand: IndustryTable<DemandRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSize {
  /// Industry revenue, billions of USD
  pub revenue: Option<f64>,
  pub past_revenue_cagr_5y: Option<f64>,
  pub next_revenue_cagr_2y: Option<f64>,
  pub next_revenue_cagr_5y: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilitySummary {
  pub gross_margin: Option<f64>,
  pub ebit_margin: Option<f64>,
  pub net_margin: Option<f64>,
  pub roc: Option<f64>,
  pub roe: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EfficiencySummary {
  pub receivable_days: Option<i64>,
  pub inventory_days: Option<i64>,
  pub payable_days: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskSummary {
  pub number_of_firms: Option<f64>,
  pub beta: Option<f64>,
  pub debt_to_equity: Option<f64>,
  pub cost_of_equity: Option<f64>,
  pub cost_of_capital: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiplesSummary {
  pub current_pe: Option<f64>,
  pub forward_pe: Option<f64>,
  pub ev_ebitda: Option<f64>,
  pub pbv: Option<f64>,
  pub ev_sales: Option<f64>,
}

/// A company's industry benchmarks, joined by ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndustryInfo {
  pub company_name: String,
  pub industry_name: String,
  pub market_size: MarketSize,
  pub profitability: ProfitabilitySummary,
  pub efficiency: EfficiencySummary,
  pub risk: RiskSummary,
  pub multiples: MultiplesSummary,
}

impl IndustryInfo {
  /// Project the rows for `industry` out of a snapshot.
  ///
  /// Topics without a row for the industry leave their section empty.
  pub fn from_snapshot(
    snapshot: &IndustrySnapshot,
    industry: &str,
    company_name: impl Into<String>,
  ) -> Self {
    let fundamentals = snapshot.fundamentals.get(industry);
    let demand = snapshot.demand.get(industry);
    let profitability = snapshot.profitability.get(industry);
    let efficiency = snapshot.efficiency.get(industry);
    let risk = snapshot.risk.get(industry);
    let multiples = snapshot.multiples.get(industry);

    // Days are whole numbers after aggregation; truncate like the company side.
    let days = |v: Option<f64>| v.map(|d| d as i64);

    IndustryInfo {
      company_name: company_name.into(),
      industry_name: industry.to_string(),
      market_size: MarketSize {
        revenue: fundamentals.map(|r| r.revenue),
        past_revenue_cagr_5y: demand.map(|r| r.revenue_cagr_5y),
        next_revenue_cagr_2y: demand.map(|r| r.expected_revenue_growth_2y),
        next_revenue_cagr_5y: demand.map(|r| r.expected_revenue_growth_5y),
      },
      profitability: ProfitabilitySummary {
        gross_margin: profitability.map(|r| r.gross_margin),
        ebit_margin: profitability.map(|r| r.ebit_margin),
        net_margin: profitability.map(|r| r.net_margin),
        roc: profitability.map(|r| r.roc),
        roe: profitability.map(|r| r.roe),
      },
      efficiency: EfficiencySummary {
        receivable_days: days(efficiency.and_then(|r| r.dso)),
        inventory_days: days(efficiency.and_then(|r| r.dsi)),
        payable_days: days(efficiency.and_then(|r| r.dpo)),
      },
      risk: RiskSummary {
        number_of_firms: risk.and_then(|r| r.number_of_firms),
        beta: risk.and_then(|r| r.beta),
        debt_to_equity: risk.and_then(|r| r.debt_to_equity),
        cost_of_equity: risk.and_then(|r| r.cost_of_equity),
        cost_of_capital: risk.and_then(|r| r.cost_of_capital),
      },
      multiples: MultiplesSummary {
        current_pe: multiples.and_then(|r| r.current_pe),
        forward_pe: multiples.and_then(|r| r.forward_pe),
        ev_ebitda: multiples.and_then(|r| r.ev_to_ebitda),
        pbv: multiples.and_then(|r| r.pbv),
        ev_sales: multiples.and_then(|r| r.ev_to_sales),
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn snapshot_for(industry: &str) -> IndustrySnapshot {
    let mut snapshot = IndustrySnapshot::default();
    snapshot.fundamentals.insert(
      industry.to_string(),
      FundamentalsRow { revenue: 412.0, gross_profit: 190.0, ..Default::default() },
    );
    snapshot.demand.insert(
      industry.to_string(),
      DemandRow { revenue_cagr_5y: 7.0, expected_revenue_growth_2y: 5.0, ..Default::default() },
    );
    snapshot.efficiency.insert(
      industry.to_string(),
      EfficiencyRow { dso: Some(34.0), dsi: Some(91.0), dpo: None, revenue_per_employee: None },
    );
    snapshot.risk.insert(
      industry.to_string(),
      RiskRow { number_of_firms: Some(41.0), beta: Some(1.12), ..Default::default() },
    );
    snapshot
  }

  #[test]
  fn test_from_snapshot_projects_rows() {
    let snapshot = snapshot_for("Shoe");
    let info = IndustryInfo::from_snapshot(&snapshot, "Shoe", "Crocs Inc");

    assert_eq!(info.company_name, "Crocs Inc");
    assert_eq!(info.industry_name, "Shoe");
    assert_eq!(info.market_size.revenue, Some(412.0));
    assert_eq!(info.market_size.past_revenue_cagr_5y, Some(7.0));
    assert_eq!(info.efficiency.receivable_days, Some(34));
    assert_eq!(info.efficiency.payable_days, None);
    assert_eq!(info.risk.beta, Some(1.12));
  }

  #[test]
  fn test_from_snapshot_missing_topics_are_empty() {
    let snapshot = snapshot_for("Shoe");
    let info = IndustryInfo::from_snapshot(&snapshot, "Shoe", "Crocs Inc");
    assert_eq!(info.profitability, ProfitabilitySummary::default());
    assert_eq!(info.multiples, MultiplesSummary::default());

    let other = IndustryInfo::from_snapshot(&snapshot, "Retail (Online)", "Amazon");
    assert_eq!(other.market_size, MarketSize::default());
  }
}
