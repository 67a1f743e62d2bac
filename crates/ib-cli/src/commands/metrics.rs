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

use crate::config::ApiArgs;
use crate::format;
use anyhow::{Context, Result};
use clap::Args;
use ib_loaders::{compute_financial_metrics, normalize_ticker};
use tracing::info;

#[derive(Args, Debug)]
pub struct MetricsArgs {
  /// Company ticker, e.g. CROX
  pub ticker: String,

  /// Print JSON instead of a table
  #[arg(long)]
  pub json: bool,

  #[command(flatten)]
  pub api: ApiArgs,
}

pub async fn execute(args: MetricsArgs) -> Result<()> {
  let symbol = normalize_ticker(&args.ticker)?;
  let context = args.api.loader_context()?;

  info!("Computing financial metrics for {}", symbol);
  let progress = super::spinner(format!("Fetching fundamentals for {}", symbol));
  let result = compute_financial_metrics(&context, &symbol).await;
  progress.finish_and_clear();
  let metrics = result.with_context(|| format!("Failed to compute metrics for {}", symbol))?;

  if args.json {
    println!("{}", serde_json::to_string_pretty(&metrics)?);
  } else {
    print!("{}", format::render_metrics(&symbol, &metrics));
  }
  Ok(())
}
