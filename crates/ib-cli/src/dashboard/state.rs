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

//! Dashboard state, independent of the terminal.

use crossterm::event::{KeyCode, KeyModifiers};
use ib_loaders::{LoaderError, LoaderResult};
use ib_models::{CompanyMetrics, IndustryInfo};

/// What the event loop should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  None,
  Submit(String),
  Quit,
}

/// A successful lookup
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
  pub symbol: String,
  pub info: IndustryInfo,
  /// Empty when no API key is configured or the fetch failed
  pub company: Option<CompanyMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Outcome {
  #[default]
  Empty,
  Loaded(Lookup),
  NotFound(String),
  Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusKind {
  Info,
  Success,
  Warning,
  Error,
}

#[derive(Debug)]
pub struct DashboardState {
  pub input: String,
  pub outcome: Outcome,
  pub show_json: bool,
  pub status: String,
  pub status_kind: StatusKind,
  pub company_enabled: bool,
}

impl DashboardState {
  pub fn new(company_enabled: bool) -> Self {
    let status = if company_enabled {
      "Enter a company ticker, e.g. CROX, CMG, AAPL".to_string()
    } else {
      "Enter a company ticker. Company metrics are off: no AlphaVantage API key".to_string()
    };
    Self {
      input: String::new(),
      outcome: Outcome::Empty,
      show_json: false,
      status,
      status_kind: StatusKind::Info,
      company_enabled,
    }
  }

  pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match code {
      KeyCode::Esc => Action::Quit,
      KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
      KeyCode::Enter => {
        let symbol = self.input.trim().to_uppercase();
        if symbol.is_empty() {
          self.set_status(StatusKind::Warning, "Enter a ticker first");
          Action::None
        } else {
          self.input = symbol.clone();
          Action::Submit(symbol)
        }
      }
      KeyCode::Tab => {
        self.show_json = !self.show_json;
        Action::None
      }
      KeyCode::Backspace => {
        self.input.pop();
        Action::None
      }
      KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
        self.input.push(c);
        Action::None
      }
      _ => Action::None,
    }
  }

  pub fn begin(&mut self, symbol: &str) {
    self.set_status(StatusKind::Info, format!("Loading industry data for {}...", symbol));
  }

  /// Record a lookup. Company failures only blank the company column.
  pub fn finish(
    &mut self,
    symbol: &str,
    info: LoaderResult<IndustryInfo>,
    company: Option<LoaderResult<CompanyMetrics>>,
  ) {
    match info {
      Ok(info) => {
        let header = format!("{} ({}) | Industry: {}", info.company_name, symbol, info.industry_name);
        let company = match company {
          Some(Ok(metrics)) => {
            self.set_status(StatusKind::Success, header);
            Some(metrics)
          }
          Some(Err(e)) => {
            self.set_status(StatusKind::Warning, format!("{} | company metrics unavailable: {}", header, e));
            None
          }
          None => {
            self.set_status(StatusKind::Success, header);
            None
          }
        };
        self.outcome = Outcome::Loaded(Lookup { symbol: symbol.to_string(), info, company });
      }
      Err(LoaderError::TickerNotFound(_)) => {
        self.set_status(
          StatusKind::Warning,
          format!("Ticker {} was not found. Please enter a valid company ticker and try again.", symbol),
        );
        self.outcome = Outcome::NotFound(symbol.to_string());
      }
      Err(e) => {
        self.set_status(StatusKind::Error, format!("An unexpected error occurred: {}", e));
        self.outcome = Outcome::Failed(e.to_string());
      }
    }
  }

  pub fn lookup(&self) -> Option<&Lookup> {
    match &self.outcome {
      Outcome::Loaded(lookup) => Some(lookup),
      _ => None,
    }
  }

  /// Pretty JSON of the loaded industry info
  pub fn raw_json(&self) -> Option<String> {
    self.lookup().and_then(|l| serde_json::to_string_pretty(&l.info).ok())
  }

  fn set_status(&mut self, kind: StatusKind, message: impl Into<String>) {
    self.status_kind = kind;
    self.status = message.into();
  }
}
