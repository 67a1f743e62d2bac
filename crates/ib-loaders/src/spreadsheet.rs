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

//! Reading Damodaran's industry spreadsheets into tables indexed by industry.
//!
//! Each dataset has a banner of title rows (`skip_rows`) followed by one or two
//! header rows. Workbook cells are copied into a [`Grid`] first so that the
//! layout rules can be exercised without a file on disk.

use calamine::{open_workbook_auto, Data, Reader};
use ib_models::convert_num;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::error::{LoaderError, LoaderResult};

/// Sheet names tried in order before falling back to the first sheet
pub const PREFERRED_SHEETS: [&str; 2] = ["Industry Averages", "Sheet1"];

/// Workbook holding per-dataset layout overrides
pub const SPECIFICS_WORKBOOK: &str = "adamodar_specifics.xlsx";

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
  Empty,
  Number(f64),
  Text(String),
}

impl Cell {
  pub fn is_empty(&self) -> bool {
    match self {
      Cell::Empty => true,
      Cell::Text(s) => s.trim().is_empty(),
      Cell::Number(_) => false,
    }
  }

  /// Numbers pass through; numeric text is converted, anything else is missing.
  pub fn as_f64(&self) -> Option<f64> {
    match self {
      Cell::Number(v) if v.is_finite() => Some(*v),
      Cell::Text(s) => convert_num(s).map(|n| n.as_f64()).filter(|v| v.is_finite()),
      _ => None,
    }
  }

  /// Whitespace-normalised text of the cell
  pub fn as_text(&self) -> Option<String> {
    match self {
      Cell::Empty => None,
      Cell::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => Some(format!("{}", *v as i64)),
      Cell::Number(v) => Some(v.to_string()),
      Cell::Text(s) => {
        let text = normalize_name(s);
        (!text.is_empty()).then_some(text)
      }
    }
  }
}

impl From<&Data> for Cell {
  fn from(data: &Data) -> Self {
    match data {
      Data::Int(v) => Cell::Number(*v as f64),
      Data::Float(v) => Cell::Number(*v),
      Data::String(s) => Cell::Text(s.clone()),
      Data::Bool(b) => Cell::Text(b.to_string()),
      _ => Cell::Empty,
    }
  }
}

/// Trim and collapse internal whitespace runs to a single space.
pub fn normalize_name(name: &str) -> String {
  name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Raw rectangular sheet contents, row-major, absolute positions preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
  rows: Vec<Vec<Cell>>,
}

impl Grid {
  pub fn new(rows: Vec<Vec<Cell>>) -> Self {
    Self { rows }
  }

  pub fn rows(&self) -> &[Vec<Cell>] {
    &self.rows
  }

  pub fn height(&self) -> usize {
    self.rows.len()
  }

  pub fn width(&self) -> usize {
    self.rows.iter().map(Vec::len).max().unwrap_or(0)
  }

  pub fn cell(&self, row: usize, col: usize) -> &Cell {
    const EMPTY: &Cell = &Cell::Empty;
    self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(EMPTY)
  }

  /// Read a named sheet, or the preferred sheet when `sheet` is `None`.
  pub fn from_workbook(path: &Path, sheet: Option<&str>) -> LoaderResult<Self> {
    if !path.exists() {
      return Err(LoaderError::DatasetNotFound(path.display().to_string()));
    }
    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names();
    let chosen = match sheet {
      Some(name) => names.iter().find(|n| n.as_str() == name).cloned().ok_or_else(|| {
        LoaderError::SpreadsheetError(format!("sheet '{}' not found in {}", name, path.display()))
      })?,
      None => choose_sheet(&names)
        .ok_or_else(|| LoaderError::SpreadsheetError(format!("{} has no sheets", path.display())))?,
    };
    debug!("Reading sheet '{}' of {}", chosen, path.display());

    let range = workbook.worksheet_range(&chosen)?;
    let (row_offset, col_offset) = range.start().map(|(r, c)| (r as usize, c as usize)).unwrap_or((0, 0));

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); row_offset];
    for row in range.rows() {
      let mut cells = vec![Cell::Empty; col_offset];
      cells.extend(row.iter().map(Cell::from));
      rows.push(cells);
    }
    Ok(Grid::new(rows))
  }
}

/// "Industry Averages", else "Sheet1", else the first sheet
pub fn choose_sheet(names: &[String]) -> Option<String> {
  PREFERRED_SHEETS
    .iter()
    .find_map(|preferred| names.iter().find(|n| n.as_str() == *preferred))
    .or_else(|| names.first())
    .cloned()
}

/// Layout of one dataset: banner rows to skip and header depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSpec {
  pub skip_rows: usize,
  pub header_levels: u8,
}

impl DatasetSpec {
  pub fn new(skip_rows: usize, header_levels: u8) -> Self {
    Self { skip_rows, header_levels }
  }
}

/// Layout table for every known dataset id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSpecs {
  specs: HashMap<String, DatasetSpec>,
}

impl DatasetSpecs {
  /// Built-in layouts for the datasets used by the industry aggregator.
  pub fn builtin() -> Self {
    let mut specs = DatasetSpecs::default();
    for id in [
      "DollarUS", "margin", "EVA", "wcdata", "Employee", "betas", "wacc", "pedata", "pbvdata",
      "psdata", "histgr",
    ] {
      specs.insert(id, DatasetSpec::new(7, 1));
    }
    specs.insert("vebitda", DatasetSpec::new(7, 2));
    specs
  }

  pub fn insert(&mut self, dataset: impl Into<String>, spec: DatasetSpec) {
    self.specs.insert(dataset.into(), spec);
  }

  /// Layout of a dataset, or a configuration error when it is unknown.
  pub fn get(&self, dataset: &str) -> LoaderResult<DatasetSpec> {
    self.specs.get(dataset).copied().ok_or_else(|| {
      LoaderError::ConfigurationError(format!("no skiprows/header levels entry for dataset '{}'", dataset))
    })
  }

  pub fn len(&self) -> usize {
    self.specs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.specs.is_empty()
  }

  /// Build the table from the `skiprows` and `header levels` sheets of the
  /// specifics workbook. Each sheet has a header row, then `dataset id, value` rows.
  pub fn from_grids(skiprows: &Grid, header_levels: &Grid) -> LoaderResult<Self> {
    let read = |grid: &Grid, what: &str| -> LoaderResult<HashMap<String, f64>> {
      let mut values = HashMap::new();
      for (i, row) in grid.rows().iter().enumerate().skip(1) {
        let Some(id) = row.first().and_then(Cell::as_text) else {
          continue;
        };
        let value = row.get(1).and_then(Cell::as_f64).ok_or_else(|| {
          LoaderError::ConfigurationError(format!("{} row {} for '{}' has no numeric value", what, i + 1, id))
        })?;
        values.insert(id, value);
      }
      Ok(values)
    };

    let skips = read(skiprows, "skiprows")?;
    let levels = read(header_levels, "header levels")?;

    let mut specs = DatasetSpecs::default();
    for (id, skip) in skips {
      let Some(level) = levels.get(&id) else {
        return Err(LoaderError::ConfigurationError(format!(
          "dataset '{}' has skiprows but no header levels entry",
          id
        )));
      };
      let level = *level as u8;
      if !(1..=2).contains(&level) || skip < 0.0 {
        return Err(LoaderError::ConfigurationError(format!(
          "dataset '{}' has an invalid layout ({} rows, {} header levels)",
          id, skip, level
        )));
      }
      specs.insert(id, DatasetSpec::new(skip as usize, level));
    }
    Ok(specs)
  }

  /// Read the specifics workbook.
  pub fn from_workbook(path: &Path) -> LoaderResult<Self> {
    let skiprows = Grid::from_workbook(path, Some("skiprows"))?;
    let header_levels = Grid::from_workbook(path, Some("header levels"))?;
    Self::from_grids(&skiprows, &header_levels)
  }
}

/// Column address. Two-level tables are addressed by `(group, column)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnKey {
  Single(String),
  Pair(String, String),
}

impl ColumnKey {
  pub fn single(name: &str) -> Self {
    ColumnKey::Single(normalize_name(name))
  }

  pub fn pair(group: &str, name: &str) -> Self {
    ColumnKey::Pair(normalize_name(group), normalize_name(name))
  }

  /// Innermost header name
  pub fn name(&self) -> &str {
    match self {
      ColumnKey::Single(name) | ColumnKey::Pair(_, name) => name,
    }
  }

  fn matches(&self, wanted: &ColumnKey) -> bool {
    match (self, wanted) {
      (ColumnKey::Pair(g, n), ColumnKey::Pair(wg, wn)) => g == wg && n == wn,
      // A bare name on a two-level table matches on the inner level
      (_, ColumnKey::Single(wn)) => self.name() == wn.as_str(),
      (ColumnKey::Single(_), ColumnKey::Pair(..)) => false,
    }
  }
}

impl std::fmt::Display for ColumnKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ColumnKey::Single(name) => write!(f, "{}", name),
      ColumnKey::Pair(group, name) => write!(f, "({}, {})", group, name),
    }
  }
}

/// A dataset table indexed by industry name.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
  dataset: String,
  columns: Vec<ColumnKey>,
  index: Vec<String>,
  rows: Vec<Vec<Cell>>,
}

impl Table {
  /// Apply a dataset layout to a grid.
  ///
  /// Column 0 is the industry index. With two header levels, blank group cells
  /// take the group to their left.
  pub fn from_grid(dataset: &str, grid: &Grid, spec: DatasetSpec) -> LoaderResult<Self> {
    let levels = spec.header_levels as usize;
    if !(1..=2).contains(&levels) {
      return Err(LoaderError::ConfigurationError(format!(
        "dataset '{}' has unsupported header depth {}",
        dataset, levels
      )));
    }
    let header_row = spec.skip_rows;
    if grid.height() < header_row + levels {
      return Err(LoaderError::SpreadsheetError(format!(
        "dataset '{}' has {} rows, expected at least {} before data",
        dataset,
        grid.height(),
        header_row + levels
      )));
    }

    let width = grid.width();
    let mut columns = Vec::with_capacity(width.saturating_sub(1));
    let mut group = String::new();
    for col in 1..width {
      let key = if levels == 1 {
        ColumnKey::Single(grid.cell(header_row, col).as_text().unwrap_or_default())
      } else {
        if let Some(g) = grid.cell(header_row, col).as_text() {
          group = g;
        }
        let name = grid.cell(header_row + 1, col).as_text().unwrap_or_default();
        ColumnKey::Pair(group.clone(), name)
      };
      columns.push(key);
    }

    let mut index = Vec::new();
    let mut rows = Vec::new();
    for row in grid.rows().iter().skip(header_row + levels) {
      let Some(name) = row.first().and_then(Cell::as_text) else {
        continue;
      };
      let mut values: Vec<Cell> = row.iter().skip(1).cloned().collect();
      values.resize(columns.len(), Cell::Empty);
      index.push(name);
      rows.push(values);
    }

    debug!("Dataset '{}': {} columns, {} industries", dataset, columns.len(), index.len());
    Ok(Table { dataset: dataset.to_string(), columns, index, rows })
  }

  pub fn dataset(&self) -> &str {
    &self.dataset
  }

  pub fn columns(&self) -> &[ColumnKey] {
    &self.columns
  }

  /// Industry names in sheet order
  pub fn industries(&self) -> &[String] {
    &self.index
  }

  pub fn find(&self, key: &ColumnKey) -> Option<usize> {
    self.columns.iter().position(|c| c.matches(key))
  }

  /// First column whose innermost name starts with `prefix`
  pub fn find_prefix(&self, prefix: &str) -> Option<usize> {
    let prefix = normalize_name(prefix);
    self.columns.iter().position(|c| c.name().starts_with(&prefix))
  }

  /// Column position, or a spreadsheet error naming the dataset.
  pub fn require(&self, key: &ColumnKey) -> LoaderResult<usize> {
    self.find(key).ok_or_else(|| {
      LoaderError::SpreadsheetError(format!("column {} not found in dataset '{}'", key, self.dataset))
    })
  }

  pub fn require_prefix(&self, prefix: &str) -> LoaderResult<usize> {
    self.find_prefix(prefix).ok_or_else(|| {
      LoaderError::SpreadsheetError(format!(
        "no column starting with '{}' in dataset '{}'",
        prefix, self.dataset
      ))
    })
  }

  fn row_of(&self, industry: &str) -> Option<usize> {
    self.index.iter().position(|name| name == industry)
  }

  /// Numeric value of a cell, `None` when the industry is absent or the cell is blank.
  pub fn value(&self, industry: &str, column: usize) -> Option<f64> {
    self.row_of(industry).and_then(|row| self.value_at(row, column))
  }

  pub fn value_at(&self, row: usize, column: usize) -> Option<f64> {
    self.rows.get(row).and_then(|r| r.get(column)).and_then(Cell::as_f64)
  }

  pub fn get(&self, industry: &str, key: &ColumnKey) -> Option<f64> {
    self.find(key).and_then(|col| self.value(industry, col))
  }
}

/// Load a dataset file with its layout.
pub fn load_table(dataset: &str, path: &Path, spec: DatasetSpec) -> LoaderResult<Table> {
  let grid = Grid::from_workbook(path, None)?;
  Table::from_grid(dataset, &grid, spec)
}
