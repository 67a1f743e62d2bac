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

//! Interactive terminal dashboard: type a ticker, see its industry benchmarks
//! next to the company's own ratios.

pub mod state;
pub mod view;

use crate::config::{ApiArgs, DatasetArgs};
use anyhow::Result;
use clap::Args;
use crossterm::{
  event::{self, Event, KeyEventKind},
  terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
  ExecutableCommand,
};
use ib_loaders::{
  compute_financial_metrics, get_industry_info, CompanyDirectory, DatasetStore, IndustryAggregator,
  LoaderContext, LoaderResult,
};
use ib_models::IndustryInfo;
use ratatui::{backend::CrosstermBackend, Terminal};
use state::{Action, DashboardState};
use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::warn;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Set while the alternate screen is up; log output is dropped meanwhile.
static SCREEN_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Log sink for the dashboard: stderr, except while the terminal is in raw mode.
pub fn log_writer() -> Box<dyn io::Write> {
  if SCREEN_ACTIVE.load(Ordering::Relaxed) {
    Box::new(io::sink())
  } else {
    Box::new(io::stderr())
  }
}

#[derive(Args, Debug)]
pub struct DashboardArgs {
  /// Ticker to look up on start
  #[arg(long)]
  pub ticker: Option<String>,

  #[command(flatten)]
  pub datasets: DatasetArgs,

  #[command(flatten)]
  pub api: ApiArgs,
}

struct Dashboard {
  aggregator: IndustryAggregator<DatasetStore>,
  directory: Option<CompanyDirectory>,
  context: Option<LoaderContext>,
  state: DashboardState,
}

impl Dashboard {
  /// Industry info, then company metrics when an API key is configured.
  async fn lookup(&mut self, symbol: &str) {
    let info = self.industry_info(symbol).await;
    let company = match (&info, &self.context) {
      (Ok(_), Some(context)) => Some(compute_financial_metrics(context, symbol).await),
      _ => None,
    };
    self.state.finish(symbol, info, company);
  }

  /// The company table is read on first use and kept for later lookups.
  async fn industry_info(&mut self, symbol: &str) -> LoaderResult<IndustryInfo> {
    let directory = match self.directory.take() {
      Some(directory) => directory,
      None => self.aggregator.source().company_directory().await?,
    };
    let result = get_industry_info(&directory, &self.aggregator, symbol).await;
    self.directory = Some(directory);
    result
  }
}

pub async fn execute(args: DashboardArgs) -> Result<()> {
  let store = args.datasets.store()?;
  let context = match args.api.loader_context() {
    Ok(context) => Some(context),
    Err(e) => {
      warn!("Company metrics disabled: {}", e);
      None
    }
  };
  let mut app = Dashboard {
    aggregator: IndustryAggregator::new(store),
    directory: None,
    state: DashboardState::new(context.is_some()),
    context,
  };

  // Setup terminal
  enable_raw_mode()?;
  SCREEN_ACTIVE.store(true, Ordering::Relaxed);
  io::stdout().execute(EnterAlternateScreen)?;
  let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

  let result = run(&mut terminal, &mut app, args.ticker).await;

  // Cleanup terminal
  disable_raw_mode()?;
  io::stdout().execute(LeaveAlternateScreen)?;
  SCREEN_ACTIVE.store(false, Ordering::Relaxed);
  result
}

async fn run(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  app: &mut Dashboard,
  initial: Option<String>,
) -> Result<()> {
  if let Some(ticker) = initial {
    app.state.input = ticker;
    if let Action::Submit(symbol) = app.state.handle_key(event::KeyCode::Enter, event::KeyModifiers::NONE) {
      submit(terminal, app, &symbol).await?;
    }
  }

  loop {
    terminal.draw(|f| view::draw(f, &app.state))?;

    if !event::poll(POLL_INTERVAL)? {
      continue;
    }
    if let Event::Key(key) = event::read()? {
      if key.kind != KeyEventKind::Press {
        continue;
      }
      match app.state.handle_key(key.code, key.modifiers) {
        Action::Quit => return Ok(()),
        Action::Submit(symbol) => submit(terminal, app, &symbol).await?,
        Action::None => {}
      }
    }
  }
}

async fn submit(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  app: &mut Dashboard,
  symbol: &str,
) -> Result<()> {
  app.state.begin(symbol);
  terminal.draw(|f| view::draw(f, &app.state))?;
  app.lookup(symbol).await;
  Ok(())
}
