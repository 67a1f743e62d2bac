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
use anyhow::{Context, Result};
use clap::Args;
use ib_loaders::ttm::TTM_QUARTERS;
use ib_loaders::{normalize_ticker, DataLoader, StatementLoader};
use ib_models::TtmStatement;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct StatementsArgs {
  /// Company ticker, e.g. CROX
  pub ticker: String,

  /// Print one JSON document
  #[arg(long)]
  pub json: bool,

  #[command(flatten)]
  pub api: ApiArgs,
}

pub async fn execute(args: StatementsArgs) -> Result<()> {
  let symbol = normalize_ticker(&args.ticker)?;
  let context = args.api.loader_context()?;

  let progress = super::spinner(format!("Fetching statements for {}", symbol));
  let result = StatementLoader.load(&context, symbol.clone()).await;
  progress.finish_and_clear();
  let statements = result.with_context(|| format!("Failed to load statements for {}", symbol))?;

  if args.json {
    println!("{}", serde_json::to_string_pretty(&statements)?);
    return Ok(());
  }

  print_block("COMPANY OVERVIEW", &statements.overview)?;
  print_ttm("TTM INCOME STATEMENT", statements.income_ttm.as_ref())?;
  print_ttm("TTM BALANCE SHEET", statements.balance_ttm.as_ref())?;
  print_ttm("TTM CASH FLOW STATEMENT", statements.cashflow_ttm.as_ref())?;
  Ok(())
}

fn print_block<T: Serialize>(title: &str, value: &T) -> Result<()> {
  println!("\n--- {} ---", title);
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

fn print_ttm(title: &str, ttm: Option<&TtmStatement>) -> Result<()> {
  match ttm {
    Some(statement) if !statement.is_complete() => print_block(
      &format!("{} (partial: {} of {} quarters)", title, statement.quarters_used(), TTM_QUARTERS),
      statement,
    ),
    Some(statement) => print_block(title, statement),
    None => {
      println!("\n--- {} ---\nnot available", title);
      Ok(())
    }
  }
}
