//! Data overview page: row preview and descriptive statistics.

use std::sync::Arc;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use super::{format_cell, format_stat, render_data_error, render_page_header};
use crate::application::DatasetSummary;
use crate::tui::styles::Theme;

const STAT_HEADERS: [&str; 9] = ["column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"];

pub fn render_overview(
    f: &mut Frame,
    area: Rect,
    dataset: Result<&Arc<DatasetSummary>, &str>,
    preview_rows: usize,
) {
    // borders + header row
    let preview_height = u16::try_from(preview_rows)
        .unwrap_or(u16::MAX)
        .saturating_add(3);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),              // Header
            Constraint::Length(preview_height), // Preview
            Constraint::Min(0),                 // Statistics
        ])
        .split(area);

    render_page_header(f, chunks[0], "Data Overview", "Dataset preview and statistical summary");

    let summary = match dataset {
        Ok(summary) => summary,
        Err(message) => {
            render_data_error(f, chunks[1].union(chunks[2]), message);
            return;
        }
    };

    render_preview(f, chunks[1], summary, preview_rows);
    render_statistics(f, chunks[2], summary);
}

fn render_preview(f: &mut Frame, area: Rect, summary: &DatasetSummary, rows: usize) {
    let preview = summary.preview(rows);

    let header = Row::new(
        preview
            .columns()
            .iter()
            .map(|c| Cell::from(c.clone()))
            .collect::<Vec<_>>(),
    )
    .style(Theme::header());

    let body: Vec<Row> = preview
        .rows()
        .iter()
        .map(|row| Row::new(row.iter().map(|v| Cell::from(format_cell(*v))).collect::<Vec<_>>()))
        .collect();

    let widths = vec![Constraint::Min(6); preview.feature_count()];
    let table = Table::new(body, widths)
        .header(header)
        .style(Theme::text())
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" Dataset Preview (first {rows} rows) "),
                    Theme::subtitle(),
                ))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );
    f.render_widget(table, area);
}

fn render_statistics(f: &mut Frame, area: Rect, summary: &DatasetSummary) {
    let header = Row::new(STAT_HEADERS.map(Cell::from)).style(Theme::header());

    let body: Vec<Row> = summary
        .summary_statistics()
        .into_iter()
        .map(|s| {
            Row::new(vec![
                Cell::from(Span::styled(s.name, Theme::focused())),
                Cell::from(s.count.to_string()),
                Cell::from(format_stat(s.mean)),
                Cell::from(format_stat(s.std)),
                Cell::from(format_stat(s.min)),
                Cell::from(format_stat(s.q25)),
                Cell::from(format_stat(s.median)),
                Cell::from(format_stat(s.q75)),
                Cell::from(format_stat(s.max)),
            ])
        })
        .collect();

    let mut widths = vec![Constraint::Length(26)];
    widths.extend([Constraint::Min(8); 8]);

    let table = Table::new(body, widths)
        .header(header)
        .style(Theme::text())
        .block(
            Block::default()
                .title(Span::styled(" Statistical Summary ", Theme::subtitle()))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );
    f.render_widget(table, area);
}
