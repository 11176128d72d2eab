//! Analysis & Insights page: how the dataset sits against the plausible ranges.

use std::sync::Arc;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use super::{render_data_error, render_page_header};
use crate::application::DatasetSummary;
use crate::domain::ranges;
use crate::tui::styles::Theme;

pub fn render_insights(f: &mut Frame, area: Rect, dataset: Result<&Arc<DatasetSummary>, &str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Notes
        ])
        .split(area);

    render_page_header(f, chunks[0], "Analysis & Insights", "Range compliance per feature");

    let summary = match dataset {
        Ok(summary) => summary,
        Err(message) => {
            render_data_error(f, chunks[1], message);
            return;
        }
    };

    let header = Row::new(["Feature", "Range", "Present", "Below", "Above", "In range"])
        .style(Theme::header());

    let rows: Vec<Row> = summary
        .range_compliance()
        .into_iter()
        .map(|c| {
            let range = ranges::range_for(c.field)
                .map_or_else(|| "-".to_string(), |r| format!("{} - {}", r.min, r.max));
            let (share, style) = match c.in_range_percent() {
                Some(p) => (format!("{p:.1}%"), Theme::gauge(p)),
                None => ("n/a".to_string(), Theme::text_muted()),
            };
            Row::new(vec![
                Cell::from(Span::styled(c.field.column(), Theme::focused())),
                Cell::from(range),
                Cell::from(c.present.to_string()),
                Cell::from(c.below.to_string()),
                Cell::from(c.above.to_string()),
                Cell::from(Span::styled(share, style)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(26),
        Constraint::Length(16),
        Constraint::Length(9),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Min(9),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .style(Theme::text())
        .block(
            Block::default()
                .title(Span::styled(" Plausible Ranges ", Theme::subtitle()))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );
    f.render_widget(table, chunks[1]);

    let notes = Paragraph::new(Line::from(Span::styled(
        "Missing cells are excluded. Ranges are observed bounds from data cleaning, not clinical limits.",
        Theme::text_muted(),
    )));
    f.render_widget(notes, chunks[2]);
}
