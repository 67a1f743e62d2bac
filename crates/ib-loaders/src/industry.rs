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

//! Industry benchmark topics built from Damodaran's datasets.
//!
//! Each topic is a pure function of its source tables and, where needed, of an
//! upstream topic. [`IndustryAggregator`] evaluates requested topics in
//! dependency order, loading each dataset once per request.

use crate::datasets::TableSource;
use crate::error::{LoaderError, LoaderResult};
use crate::spreadsheet::{ColumnKey, Table};
use ib_models::{
  round_to, DemandRow, EfficiencyRow, FundamentalsRow, IndustrySnapshot, IndustryTable,
  MultiplesRow, ProfitabilityRow, RiskRow, TOTAL_MARKET,
};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

/// Dataset ids used by the topics
pub mod datasets {
  pub const DOLLAR_US: &str = "DollarUS";
  pub const MARGIN: &str = "margin";
  pub const EVA: &str = "EVA";
  pub const WORKING_CAPITAL: &str = "wcdata";
  pub const EMPLOYEE: &str = "Employee";
  pub const BETAS: &str = "betas";
  pub const WACC: &str = "wacc";
  pub const PE: &str = "pedata";
  pub const PBV: &str = "pbvdata";
  pub const PS: &str = "psdata";
  pub const EV_EBITDA: &str = "vebitda";
  pub const HISTORICAL_GROWTH: &str = "histgr";
}

use datasets::*;

/// Header group of the EV multiples restricted to firms with positive EBITDA
pub const POSITIVE_EBITDA_GROUP: &str = "Only positive EBITDA firms";

/// Benchmark topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topic {
  Fundamentals,
  Profitability,
  Efficiency,
  Risk,
  Multiples,
  Demand,
}

impl Topic {
  pub const ALL: [Topic; 6] = [
    Topic::Fundamentals,
    Topic::Profitability,
    Topic::Efficiency,
    Topic::Risk,
    Topic::Multiples,
    Topic::Demand,
  ];

  /// Datasets read directly by the topic
  pub fn datasets(&self) -> &'static [&'static str] {
    match self {
      Topic::Fundamentals => &[DOLLAR_US],
      Topic::Profitability => &[MARGIN, EVA],
      Topic::Efficiency => &[WORKING_CAPITAL, EMPLOYEE],
      Topic::Risk => &[BETAS, WACC, PE],
      Topic::Multiples => &[PBV, PE, PS, EV_EBITDA],
      Topic::Demand => &[HISTORICAL_GROWTH],
    }
  }

  /// Topics whose output this topic consumes
  pub fn upstream(&self) -> &'static [Topic] {
    match self {
      Topic::Efficiency => &[Topic::Fundamentals],
      _ => &[],
    }
  }

  /// Requested topics plus their upstream topics, each after its dependencies.
  pub fn evaluation_order(requested: &[Topic]) -> Vec<Topic> {
    fn visit(topic: Topic, order: &mut Vec<Topic>) {
      if order.contains(&topic) {
        return;
      }
      for upstream in topic.upstream() {
        visit(*upstream, order);
      }
      order.push(topic);
    }

    let mut order = Vec::new();
    for topic in requested {
      visit(*topic, &mut order);
    }
    order
  }
}

impl std::fmt::Display for Topic {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      Topic::Fundamentals => "fundamentals",
      Topic::Profitability => "profitability",
      Topic::Efficiency => "efficiency",
      Topic::Risk => "risk",
      Topic::Multiples => "multiples",
      Topic::Demand => "demand",
    };
    write!(f, "{}", name)
  }
}

/// Which industries a result keeps.
///
/// Built from a borrowed list; the caller's list is never modified. A restricted
/// filter always keeps the total market row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IndustryFilter {
  #[default]
  All,
  Only(BTreeSet<String>),
}

impl IndustryFilter {
  pub fn only<S: AsRef<str>>(industries: &[S]) -> Self {
    let mut names: BTreeSet<String> = industries.iter().map(|s| s.as_ref().to_string()).collect();
    names.insert(TOTAL_MARKET.to_string());
    IndustryFilter::Only(names)
  }

  pub fn from_option<S: AsRef<str>>(industries: Option<&[S]>) -> Self {
    industries.map(Self::only).unwrap_or_default()
  }

  pub fn includes(&self, industry: &str) -> bool {
    match self {
      IndustryFilter::All => true,
      IndustryFilter::Only(names) => names.contains(industry),
    }
  }

  pub fn apply<T>(&self, table: IndustryTable<T>) -> IndustryTable<T> {
    match self {
      IndustryFilter::All => table,
      IndustryFilter::Only(_) => table.into_iter().filter(|(name, _)| self.includes(name)).collect(),
    }
  }
}

/// Column picked from a dataset and how its values are scaled and rounded
struct Measure {
  column: ColumnKey,
  scale: f64,
  decimals: i32,
}

impl Measure {
  fn new(column: ColumnKey, scale: f64, decimals: i32) -> Self {
    Self { column, scale, decimals }
  }

  fn resolve<'t>(&self, table: &'t Table) -> LoaderResult<Resolved<'t>> {
    Ok(Resolved { table, col: table.require(&self.column)?, scale: self.scale, decimals: self.decimals })
  }
}

/// A measure bound to a column of a loaded table
struct Resolved<'t> {
  table: &'t Table,
  col: usize,
  scale: f64,
  decimals: i32,
}

impl Resolved<'_> {
  fn get(&self, industry: &str) -> Option<f64> {
    self.table.value(industry, self.col).map(|v| round_to(v * self.scale, self.decimals))
  }

  fn get_or_zero(&self, industry: &str) -> f64 {
    self.get(industry).unwrap_or(0.0)
  }

  fn raw(&self, industry: &str) -> Option<f64> {
    self.table.value(industry, self.col)
  }
}

fn col(name: &str) -> ColumnKey {
  ColumnKey::single(name)
}

/// Dollar fundamentals in billions, rounded, blanks as zero.
pub fn fundamentals(dollar_us: &Table) -> LoaderResult<IndustryTable<FundamentalsRow>> {
  let billions = |name: &str| Measure::new(col(name), 1.0 / 1000.0, 0).resolve(dollar_us);
  let revenue = billions("Revenues ($ millions)")?;
  let gross_profit = billions("Gross Profit ($ millions)")?;
  let ebitda = billions("EBITDA ($ millions)")?;
  let ebit = billions("EBIT (Operating Income) ($ millions)")?;
  let net_income = billions("Net Income ( $ millions)")?;

  Ok(
    dollar_us
      .industries()
      .iter()
      .map(|name| {
        let row = FundamentalsRow {
          revenue: revenue.get_or_zero(name),
          gross_profit: gross_profit.get_or_zero(name),
          ebitda: ebitda.get_or_zero(name),
          ebit: ebit.get_or_zero(name),
          net_income: net_income.get_or_zero(name),
        };
        (name.clone(), row)
      })
      .collect(),
  )
}

/// Margins and excess returns in whole percent, EVA in billions, blanks as zero.
pub fn profitability(margin: &Table, eva: &Table) -> LoaderResult<IndustryTable<ProfitabilityRow>> {
  fn pct<'t>(table: &'t Table, name: &str) -> LoaderResult<Resolved<'t>> {
    Measure::new(col(name), 100.0, 0).resolve(table)
  }
  let gross_margin = pct(margin, "Gross Margin")?;
  let net_margin = pct(margin, "Net Margin")?;
  let ebit_margin = pct(margin, "After-tax Lease & R&D adj Margin")?;
  let ebitda_margin = pct(margin, "EBITDA/Sales")?;
  let rnd = pct(margin, "R&D/Sales")?;
  let sga = pct(margin, "SG&A/ Sales")?;
  let roe = pct(eva, "ROE")?;
  let roe_spread = pct(eva, "(ROE - COE)")?;
  let roc = pct(eva, "ROC")?;
  let roc_spread = pct(eva, "(ROC - WACC)")?;
  let eva_billions = Measure::new(col("EVA (US $ millions)"), 1.0 / 1000.0, 0).resolve(eva)?;

  Ok(
    margin
      .industries()
      .iter()
      .map(|name| {
        let row = ProfitabilityRow {
          gross_margin: gross_margin.get_or_zero(name),
          net_margin: net_margin.get_or_zero(name),
          ebit_margin: ebit_margin.get_or_zero(name),
          ebitda_margin: ebitda_margin.get_or_zero(name),
          rnd_to_sales: rnd.get_or_zero(name),
          sga_to_sales: sga.get_or_zero(name),
          roe: roe.get_or_zero(name),
          roe_minus_coe: roe_spread.get_or_zero(name),
          roc: roc.get_or_zero(name),
          roc_minus_wacc: roc_spread.get_or_zero(name),
          eva: eva_billions.get_or_zero(name),
        };
        (name.clone(), row)
      })
      .collect(),
  )
}

/// Turnover days from working-capital ratios.
///
/// Inventory and payable days are scaled from sales to cost of goods sold using
/// the industry's revenue and gross profit; they are empty when COGS is zero.
pub fn efficiency(
  wcdata: &Table,
  employee: &Table,
  fundamentals: &IndustryTable<FundamentalsRow>,
) -> LoaderResult<IndustryTable<EfficiencyRow>> {
  let ratio = |name: &str| Measure::new(col(name), 1.0, 0).resolve(wcdata);
  let receivables = ratio("Acc Rec/ Sales")?;
  let inventory = ratio("Inventory/Sales")?;
  let payables = ratio("Acc Pay/ Sales")?;
  let per_employee = Measure::new(col("Revenues per Employee ($)"), 1.0, 0).resolve(employee)?;

  Ok(
    wcdata
      .industries()
      .iter()
      .map(|name| {
        let dso = receivables.raw(name).map(|r| round_to(r * 365.0, 0));
        let to_cogs_days = |ratio: Option<f64>| -> Option<f64> {
          let row = fundamentals.get(name)?;
          let cogs = row.revenue - row.gross_profit;
          if cogs == 0.0 {
            return None;
          }
          let days = ratio? * row.revenue * 365.0 / cogs;
          days.is_finite().then(|| round_to(days, 0))
        };
        let row = EfficiencyRow {
          dso,
          dsi: to_cogs_days(inventory.raw(name)),
          dpo: to_cogs_days(payables.raw(name)),
          revenue_per_employee: per_employee.raw(name),
        };
        (name.clone(), row)
      })
      .collect(),
  )
}

/// Leverage, beta and cost of capital. Blanks stay empty.
pub fn risk(betas: &Table, wacc: &Table, pedata: &Table) -> LoaderResult<IndustryTable<RiskRow>> {
  let firms = Measure::new(col("Number of firms"), 1.0, 0).resolve(betas)?;
  let debt_to_equity = Measure::new(col("D/E Ratio"), 100.0, 0).resolve(betas)?;
  let beta_col = betas.require_prefix("Average")?;
  let beta = Resolved { table: betas, col: beta_col, scale: 1.0, decimals: 2 };
  let cost = |name: &str| Measure::new(col(name), 100.0, 1).resolve(wacc);
  let cost_of_equity = cost("Cost of Equity")?;
  let cost_of_debt = cost("After-tax Cost of Debt")?;
  let cost_of_capital = cost("Cost of Capital")?;
  let money_losing = Measure::new(col("% of Money Losing firms (Trailing)"), 1.0, 0).resolve(pedata)?;

  Ok(
    betas
      .industries()
      .iter()
      .map(|name| {
        let row = RiskRow {
          number_of_firms: firms.raw(name),
          debt_to_equity: debt_to_equity.get(name),
          beta: beta.get(name),
          cost_of_equity: cost_of_equity.get(name),
          after_tax_cost_of_debt: cost_of_debt.get(name),
          cost_of_capital: cost_of_capital.get(name),
          pct_money_losing: money_losing.raw(name),
        };
        (name.clone(), row)
      })
      .collect(),
  )
}

/// Valuation multiples rounded to one decimal. Blanks stay empty.
pub fn multiples(
  pbvdata: &Table,
  pedata: &Table,
  psdata: &Table,
  vebitda: &Table,
) -> LoaderResult<IndustryTable<MultiplesRow>> {
  fn one_dp<'t>(table: &'t Table, key: ColumnKey) -> LoaderResult<Resolved<'t>> {
    Measure::new(key, 1.0, 1).resolve(table)
  }
  let pbv = one_dp(pbvdata, col("PBV"))?;
  let ev_ic = one_dp(pbvdata, col("EV/ Invested Capital"))?;
  let current_pe = one_dp(pedata, col("Current PE"))?;
  let trailing_pe = one_dp(pedata, col("Trailing PE"))?;
  let forward_pe = one_dp(pedata, col("Forward PE"))?;
  let price_sales = one_dp(psdata, col("Price/Sales"))?;
  let ev_sales = one_dp(psdata, col("EV/Sales"))?;
  let ev_ebitda = one_dp(vebitda, ColumnKey::pair(POSITIVE_EBITDA_GROUP, "EV/EBITDA"))?;
  let ev_ebit = one_dp(vebitda, ColumnKey::pair(POSITIVE_EBITDA_GROUP, "EV/EBIT"))?;

  Ok(
    pbvdata
      .industries()
      .iter()
      .map(|name| {
        let row = MultiplesRow {
          pbv: pbv.get(name),
          ev_to_invested_capital: ev_ic.get(name),
          current_pe: current_pe.get(name),
          trailing_pe: trailing_pe.get(name),
          forward_pe: forward_pe.get(name),
          price_to_sales: price_sales.get(name),
          ev_to_sales: ev_sales.get(name),
          ev_to_ebitda: ev_ebitda.get(name),
          ev_to_ebit: ev_ebit.get(name),
        };
        (name.clone(), row)
      })
      .collect(),
  )
}

/// Historical and expected growth in whole percent, blanks as zero.
pub fn demand(histgr: &Table) -> LoaderResult<IndustryTable<DemandRow>> {
  let pct = |name: &str| Measure::new(col(name), 100.0, 0).resolve(histgr);
  let net_income = pct("CAGR in Net Income- Last 5 years")?;
  let revenue = pct("CAGR in Revenues- Last 5 years")?;
  let next_2y = pct("Expected Growth in Revenues - Next 2 years")?;
  let next_5y = pct("Expected Growth in Revenues - Next 5 years")?;

  Ok(
    histgr
      .industries()
      .iter()
      .map(|name| {
        let row = DemandRow {
          net_income_cagr_5y: net_income.get_or_zero(name),
          revenue_cagr_5y: revenue.get_or_zero(name),
          expected_revenue_growth_2y: next_2y.get_or_zero(name),
          expected_revenue_growth_5y: next_5y.get_or_zero(name),
        };
        (name.clone(), row)
      })
      .collect(),
  )
}

fn loaded<'a>(tables: &'a HashMap<&'static str, Table>, id: &str) -> LoaderResult<&'a Table> {
  tables
    .get(id)
    .ok_or_else(|| LoaderError::InvalidData(format!("dataset '{}' was not loaded", id)))
}

/// Evaluates topics over a table source.
pub struct IndustryAggregator<S: TableSource> {
  source: S,
}

impl<S: TableSource> IndustryAggregator<S> {
  pub fn new(source: S) -> Self {
    Self { source }
  }

  pub fn source(&self) -> &S {
    &self.source
  }

  /// Every topic, filtered.
  pub async fn snapshot(&self, filter: &IndustryFilter) -> LoaderResult<IndustrySnapshot> {
    self.snapshot_of(&Topic::ALL, filter).await
  }

  /// The requested topics, computed once each in dependency order, filtered.
  ///
  /// Topics that were not requested are left empty even when computed as a dependency.
  pub async fn snapshot_of(&self, requested: &[Topic], filter: &IndustryFilter) -> LoaderResult<IndustrySnapshot> {
    let order = Topic::evaluation_order(requested);
    let mut tables: HashMap<&'static str, Table> = HashMap::new();
    for topic in &order {
      for dataset in topic.datasets() {
        if !tables.contains_key(dataset) {
          debug!("Loading dataset {} for {}", dataset, topic);
          tables.insert(*dataset, self.source.table(dataset).await?);
        }
      }
    }
    let table = |id: &str| loaded(&tables, id);

    let mut snapshot = IndustrySnapshot::default();
    for topic in &order {
      match topic {
        Topic::Fundamentals => snapshot.fundamentals = fundamentals(table(DOLLAR_US)?)?,
        Topic::Profitability => snapshot.profitability = profitability(table(MARGIN)?, table(EVA)?)?,
        Topic::Efficiency => {
          snapshot.efficiency =
            efficiency(table(WORKING_CAPITAL)?, table(EMPLOYEE)?, &snapshot.fundamentals)?
        }
        Topic::Risk => snapshot.risk = risk(table(BETAS)?, table(WACC)?, table(PE)?)?,
        Topic::Multiples => {
          snapshot.multiples = multiples(table(PBV)?, table(PE)?, table(PS)?, table(EV_EBITDA)?)?
        }
        Topic::Demand => snapshot.demand = demand(table(HISTORICAL_GROWTH)?)?,
      }
    }

    if !requested.contains(&Topic::Fundamentals) {
      snapshot.fundamentals.clear();
    }

    let snapshot = IndustrySnapshot {
      fundamentals: filter.apply(snapshot.fundamentals),
      profitability: filter.apply(snapshot.profitability),
      efficiency: filter.apply(snapshot.efficiency),
      risk: filter.apply(snapshot.risk),
      multiples: filter.apply(snapshot.multiples),
      demand: filter.apply(snapshot.demand),
    };
    info!("Industry snapshot computed for {:?}", order);
    Ok(snapshot)
  }

  pub async fn fundamentals(&self, filter: &IndustryFilter) -> LoaderResult<IndustryTable<FundamentalsRow>> {
    Ok(self.snapshot_of(&[Topic::Fundamentals], filter).await?.fundamentals)
  }

  pub async fn profitability(&self, filter: &IndustryFilter) -> LoaderResult<IndustryTable<ProfitabilityRow>> {
    Ok(self.snapshot_of(&[Topic::Profitability], filter).await?.profitability)
  }

  pub async fn efficiency(&self, filter: &IndustryFilter) -> LoaderResult<IndustryTable<EfficiencyRow>> {
    Ok(self.snapshot_of(&[Topic::Efficiency], filter).await?.efficiency)
  }

  pub async fn risk(&self, filter: &IndustryFilter) -> LoaderResult<IndustryTable<RiskRow>> {
    Ok(self.snapshot_of(&[Topic::Risk], filter).await?.risk)
  }

  pub async fn multiples(&self, filter: &IndustryFilter) -> LoaderResult<IndustryTable<MultiplesRow>> {
    Ok(self.snapshot_of(&[Topic::Multiples], filter).await?.multiples)
  }

  pub async fn demand(&self, filter: &IndustryFilter) -> LoaderResult<IndustryTable<DemandRow>> {
    Ok(self.snapshot_of(&[Topic::Demand], filter).await?.demand)
  }
}

#[cfg(test)]
pub(crate) mod fixtures {
  use super::*;
  use crate::spreadsheet::test_grids::{num, single_level, text};
  use crate::spreadsheet::{Cell, DatasetSpec, Grid};
  use async_trait::async_trait;
  use std::sync::Mutex;

  /// Tables held in memory, recording every load
  #[derive(Default)]
  pub struct MemorySource {
    tables: HashMap<String, Table>,
    pub loads: Mutex<Vec<String>>,
  }

  impl MemorySource {
    pub fn insert(&mut self, grid: &Grid, dataset: &str, header_levels: u8) {
      let table = Table::from_grid(dataset, grid, DatasetSpec::new(0, header_levels)).unwrap();
      self.tables.insert(dataset.to_string(), table);
    }

    pub fn single(&mut self, dataset: &str, headers: &[&str], data: &[(&str, &[Option<f64>])]) {
      self.insert(&single_level(0, headers, data), dataset, 1);
    }

    pub fn load_count(&self, dataset: &str) -> usize {
      self.loads.lock().unwrap().iter().filter(|d| d.as_str() == dataset).count()
    }
  }

  #[async_trait]
  impl TableSource for MemorySource {
    async fn table(&self, dataset: &str) -> LoaderResult<Table> {
      self.loads.lock().unwrap().push(dataset.to_string());
      self
        .tables
        .get(dataset)
        .cloned()
        .ok_or_else(|| LoaderError::DatasetNotFound(dataset.to_string()))
    }
  }

  /// Shoe, Apparel (zero COGS) and the total market row
  pub fn sample_source() -> MemorySource {
    let mut source = MemorySource::default();
    source.single(
      DOLLAR_US,
      &[
        "Revenues ($ millions)",
        "Gross Profit ($ millions)",
        "EBITDA ($ millions)",
        "EBIT (Operating Income) ($ millions)",
        "Net Income ( $ millions)",
      ],
      &[
        ("Shoe", &[Some(73000.0), Some(36600.0), Some(9800.0), Some(7900.0), Some(5600.0)]),
        ("Apparel", &[Some(10000.0), Some(10000.0), None, Some(1200.0), Some(900.0)]),
        (TOTAL_MARKET, &[Some(21000000.0), Some(7000000.0), Some(4100000.0), Some(2800000.0), Some(2100000.0)]),
      ],
    );
    source.single(
      MARGIN,
      &[
        "Gross Margin",
        "Net Margin",
        "After-tax Lease & R&D adj Margin",
        "EBITDA/Sales",
        "R&D/Sales",
        "SG&A/ Sales",
      ],
      &[
        ("Shoe", &[Some(0.4512), Some(0.081), Some(0.12), Some(0.15), None, Some(0.25)]),
        ("Apparel", &[Some(0.52), Some(0.06), Some(0.09), Some(0.11), Some(0.01), Some(0.3)]),
        (TOTAL_MARKET, &[Some(0.33), Some(0.1), Some(0.13), Some(0.19), Some(0.04), Some(0.17)]),
      ],
    );
    source.single(
      EVA,
      &["ROE", "(ROE - COE)", "ROC", "(ROC - WACC)", "EVA (US $ millions)"],
      &[
        ("Shoe", &[Some(0.2), Some(0.1), Some(0.18), Some(0.09), Some(2600.0)]),
        ("Apparel", &[Some(0.12), Some(0.02), Some(0.1), Some(0.01), Some(-400.0)]),
        (TOTAL_MARKET, &[Some(0.15), Some(0.05), Some(0.12), Some(0.03), Some(150000.0)]),
      ],
    );
    source.single(
      WORKING_CAPITAL,
      &["Acc Rec/ Sales", "Inventory/Sales", "Acc Pay/ Sales"],
      &[
        ("Shoe", &[Some(0.2), Some(0.1), Some(0.05)]),
        ("Apparel", &[Some(0.11), Some(0.2), Some(0.08)]),
        (TOTAL_MARKET, &[Some(0.12), None, Some(0.07)]),
      ],
    );
    source.single(
      EMPLOYEE,
      &["Revenues per Employee  ($)"],
      &[("Shoe", &[Some(412000.0)]), ("Apparel", &[None])],
    );
    source.single(
      BETAS,
      &["Number of firms", "D/E Ratio", "Average Beta"],
      &[
        ("Shoe", &[Some(11.0), Some(0.2561), Some(1.234)]),
        ("Apparel", &[Some(39.0), None, Some(0.9871)]),
        (TOTAL_MARKET, &[Some(5900.0), Some(0.2), Some(1.0)]),
      ],
    );
    source.single(
      WACC,
      &["Cost of Equity", "After-tax Cost of Debt", "Cost of Capital"],
      &[
        ("Shoe", &[Some(0.0912), Some(0.0401), Some(0.0823)]),
        ("Apparel", &[Some(0.085), None, Some(0.074)]),
        (TOTAL_MARKET, &[Some(0.09), Some(0.04), Some(0.08)]),
      ],
    );
    source.single(
      PE,
      &["Current PE", "Trailing PE", "Forward PE", "% of Money Losing firms (Trailing)"],
      &[
        ("Shoe", &[Some(22.47), Some(20.31), None, Some(0.3)]),
        ("Apparel", &[Some(18.12), Some(17.0), Some(15.55), Some(0.41)]),
        (TOTAL_MARKET, &[Some(24.0), Some(23.1), Some(19.8), Some(0.45)]),
      ],
    );
    source.single(
      PBV,
      &["PBV", "EV/ Invested Capital"],
      &[
        ("Shoe", &[Some(5.56), Some(4.21)]),
        ("Apparel", &[Some(2.81), Some(2.14)]),
        (TOTAL_MARKET, &[Some(3.9), Some(2.7)]),
      ],
    );
    source.single(
      PS,
      &["Price/Sales", "EV/Sales"],
      &[
        ("Shoe", &[Some(2.04), Some(2.26)]),
        ("Apparel", &[Some(1.12), Some(1.31)]),
        (TOTAL_MARKET, &[Some(2.5), Some(2.8)]),
      ],
    );
    let vebitda = Grid::new(vec![
      vec![
        text(""),
        text("All firms"),
        Cell::Empty,
        text(POSITIVE_EBITDA_GROUP),
        Cell::Empty,
      ],
      vec![text("Industry Name"), text("EV/EBITDA"), text("EV/EBIT"), text("EV/EBITDA"), text("EV/EBIT")],
      vec![text("Shoe"), num(9.1), num(12.4), num(11.26), num(15.04)],
      vec![text("Apparel"), num(8.0), num(10.0), num(8.44), Cell::Empty],
      vec![text(TOTAL_MARKET), num(13.0), num(18.0), num(14.1), num(19.2)],
    ]);
    source.insert(&vebitda, EV_EBITDA, 2);
    source.single(
      HISTORICAL_GROWTH,
      &[
        "CAGR in Net Income- Last 5 years",
        "CAGR in Revenues- Last 5 years",
        "Expected Growth in Revenues - Next 2 years",
        "Expected Growth in Revenues - Next 5 years",
      ],
      &[
        ("Shoe", &[Some(0.0712), Some(0.0548), Some(0.061), None]),
        ("Apparel", &[Some(0.02), Some(0.031), Some(0.04), Some(0.035)]),
        (TOTAL_MARKET, &[Some(0.09), Some(0.07), Some(0.05), Some(0.045)]),
      ],
    );
    source
  }
}
