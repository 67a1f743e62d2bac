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
use anyhow::Result;
use clap::{Args, Subcommand};
use ib_loaders::CompanyDirectory;

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// Industry groups in the company table
  Industries(DatasetArgs),
  /// Countries in the company table
  Countries(DatasetArgs),
  /// Primary sectors of an industry's companies
  Sectors(SectorsArgs),
  /// Tickers belonging to one or more industries
  Tickers(TickersArgs),
}

#[derive(Args, Debug)]
pub struct SectorsArgs {
  /// Industry group name, e.g. "Shoe"
  pub industry: String,

  #[command(flatten)]
  pub datasets: DatasetArgs,
}

#[derive(Args, Debug)]
pub struct TickersArgs {
  /// Industry group names
  #[arg(required = true)]
  pub industries: Vec<String>,

  #[command(flatten)]
  pub datasets: DatasetArgs,
}

pub async fn execute(cmd: ListCommands) -> Result<()> {
  let lines = match cmd {
    ListCommands::Industries(datasets) => directory(&datasets).await?.industries(),
    ListCommands::Countries(datasets) => directory(&datasets).await?.countries(),
    ListCommands::Sectors(args) => directory(&args.datasets).await?.sectors(&args.industry),
    ListCommands::Tickers(args) => directory(&args.datasets).await?.tickers_for(&args.industries)?,
  };
  for line in lines {
    println!("{}", line);
  }
  Ok(())
}

async fn directory(datasets: &DatasetArgs) -> Result<CompanyDirectory> {
  Ok(datasets.store()?.company_directory().await?)
}
