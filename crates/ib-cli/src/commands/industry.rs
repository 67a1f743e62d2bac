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

use crate::config::DatasetArgs;
use crate::format;
use anyhow::{bail, Result};
use clap::Args;
use ib_loaders::{get_industry_info, normalize_ticker, IndustryAggregator, LoaderError};
use tracing::info;

#[derive(Args, Debug)]
pub struct IndustryArgs {
  /// Company ticker, e.g. CROX
  pub ticker: String,

  /// Print JSON instead of tables
  #[arg(long)]
  pub json: bool,

  #[command(flatten)]
  pub datasets: DatasetArgs,
}

pub async fn execute(args: IndustryArgs) -> Result<()> {
  let symbol = normalize_ticker(&args.ticker)?;
  let store = args.datasets.store()?;

  let progress = super::spinner(format!("Loading industry data for {}", symbol));
  let directory = match store.company_directory().await {
    Ok(directory) => directory,
    Err(e) => {
      progress.finish_and_clear();
      return Err(e.into());
    }
  };
  let aggregator = IndustryAggregator::new(store);
  let result = get_industry_info(&directory, &aggregator, &symbol).await;
  progress.finish_and_clear();

  let info = match result {
    Ok(info) => info,
    Err(LoaderError::TickerNotFound(ticker)) => {
      bail!("Ticker '{}' was not found in the company table (countries: {})", ticker, args.datasets.country)
    }
    Err(e) => return Err(e.into()),
  };
  info!("{} belongs to {}", symbol, info.industry_name);

  if args.json {
    println!("{}", serde_json::to_string_pretty(&info)?);
    return Ok(());
  }

  println!("{} ({}) | Industry: {}", info.company_name, symbol, info.industry_name);
  let mut sections = format::comparison_sections(&info, None);
  sections.push(format::multiples_section(&info));
  print!("{}", format::render_sections(&sections, false));
  Ok(())
}
