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

use super::state::{DashboardState, Outcome, StatusKind};
use crate::format::{self, Section};
use ratatui::{
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
  Frame,
};

pub fn draw(f: &mut Frame, state: &DashboardState) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(3), // Ticker input
      Constraint::Length(3), // Status line
      Constraint::Min(0),    // Tables and JSON
      Constraint::Length(1), // Key help
    ])
    .split(f.area());

  render_input(f, chunks[0], state);
  render_status(f, chunks[1], state);

  if state.show_json && state.lookup().is_some() {
    let halves = Layout::default()
      .direction(Direction::Horizontal)
      .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
      .split(chunks[2]);
    render_body(f, halves[0], state);
    render_json(f, halves[1], state);
  } else {
    render_body(f, chunks[2], state);
  }

  render_help(f, chunks[3]);
}

fn render_input(f: &mut Frame, area: Rect, state: &DashboardState) {
  let input = Paragraph::new(Line::from(vec![
    Span::raw(state.input.as_str()),
    Span::styled("_", Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK)),
  ]))
  .block(Block::default().borders(Borders::ALL).title("Company Ticker"));
  f.render_widget(input, area);
}

fn render_status(f: &mut Frame, area: Rect, state: &DashboardState) {
  let color = match state.status_kind {
    StatusKind::Info => Color::White,
    StatusKind::Success => Color::Green,
    StatusKind::Warning => Color::Yellow,
    StatusKind::Error => Color::Red,
  };
  let status = Paragraph::new(state.status.as_str())
    .style(Style::default().fg(color))
    .block(Block::default().borders(Borders::ALL).title("Status"));
  f.render_widget(status, area);
}

fn render_body(f: &mut Frame, area: Rect, state: &DashboardState) {
  match &state.outcome {
    Outcome::Loaded(lookup) => {
      let sections = format::comparison_sections(&lookup.info, lookup.company.as_ref());
      let company_title = if state.company_enabled { "Company" } else { "Company (no key)" };
      let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, sections.len() as u32); sections.len()])
        .split(area);
      for (section, column) in sections.iter().zip(columns.iter()) {
        render_section(f, *column, section, company_title);
      }
    }
    Outcome::NotFound(symbol) => {
      let lines = vec![
        Line::from(Span::styled(
          format!("No company with ticker {} in the industry table.", symbol),
          Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from("Please enter a valid company ticker and try again."),
      ];
      render_message(f, area, lines);
    }
    Outcome::Failed(message) => {
      let lines = vec![
        Line::from(Span::styled("An unexpected error occurred.", Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(message.as_str()),
        Line::from("Please check your input and data directory and try again."),
      ];
      render_message(f, area, lines);
    }
    Outcome::Empty => {
      let lines = vec![
        Line::from("Enter a company ticker above to compare it with its industry:"),
        Line::from("market size, profitability, efficiency and risk."),
        Line::from(""),
        Line::from("Sample tickers: CROX, CMG, AAPL"),
      ];
      render_message(f, area, lines);
    }
  }
}

fn render_section(f: &mut Frame, area: Rect, section: &Section, company_title: &str) {
  let header = Row::new(vec!["Metric", "Industry", company_title])
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
  let rows = section.rows.iter().map(|row| {
    Row::new(vec![
      Cell::from(row.label),
      Cell::from(row.industry.clone()),
      Cell::from(row.company.clone()),
    ])
  });
  let table = Table::new(rows, [Constraint::Percentage(50), Constraint::Percentage(25), Constraint::Percentage(25)])
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(section.title));
  f.render_widget(table, area);
}

fn render_json(f: &mut Frame, area: Rect, state: &DashboardState) {
  let title = match state.lookup() {
    Some(lookup) => format!("Raw JSON: {}", lookup.symbol),
    None => "Raw JSON".to_string(),
  };
  let json = state.raw_json().unwrap_or_default();
  let panel = Paragraph::new(json)
    .wrap(Wrap { trim: false })
    .block(Block::default().borders(Borders::ALL).title(title));
  f.render_widget(panel, area);
}

fn render_message(f: &mut Frame, area: Rect, lines: Vec<Line<'_>>) {
  let message = Paragraph::new(lines)
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title("Industry Info"));
  f.render_widget(message, area);
}

fn render_help(f: &mut Frame, area: Rect) {
  let help = Line::from(vec![
    Span::styled("Enter", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    Span::styled(" look up • ", Style::default().fg(Color::Gray)),
    Span::styled("Tab", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    Span::styled(" raw JSON • ", Style::default().fg(Color::Gray)),
    Span::styled("Esc", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
    Span::styled(" quit", Style::default().fg(Color::Gray)),
  ]);
  f.render_widget(Paragraph::new(help), area);
}

#[cfg(test)]
mod tests {
  use super::*;
  use ib_loaders::LoaderError;
  use ib_models::{IndustryInfo, MarketSize};
  use ratatui::{backend::TestBackend, Terminal};

  fn screen(state: &DashboardState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(160, 30)).unwrap();
    terminal.draw(|f| draw(f, state)).unwrap();
    terminal.backend().buffer().content.iter().map(|c| c.symbol()).collect()
  }

  #[test]
  fn test_loaded_shows_four_tables() {
    let mut state = DashboardState::new(false);
    let info = IndustryInfo {
      company_name: "Crocs Inc".to_string(),
      industry_name: "Shoe".to_string(),
      market_size: MarketSize { revenue: Some(73.0), ..Default::default() },
      ..Default::default()
    };
    state.finish("CROX", Ok(info), None);
    let text = screen(&state);

    for title in ["Market Size", "Profitability", "Efficiency", "Risk"] {
      assert!(text.contains(title), "missing {}", title);
    }
    assert!(text.contains("$73B"));
    assert!(!text.contains("Raw JSON"));

    state.show_json = true;
    assert!(screen(&state).contains("Raw JSON: CROX"));
  }

  #[test]
  fn test_not_found_message() {
    let mut state = DashboardState::new(true);
    state.finish("ZZZZ", Err(LoaderError::TickerNotFound("ZZZZ".to_string())), None);
    assert!(screen(&state).contains("No company with ticker ZZZZ"));
  }
}
