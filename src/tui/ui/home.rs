//! Home page: dataset headline metrics.

use std::sync::Arc;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use super::{render_data_error, render_page_header};
use crate::application::DatasetSummary;
use crate::tui::styles::Theme;

pub fn render_home(f: &mut Frame, area: Rect, dataset: Result<&Arc<DatasetSummary>, &str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // Intro
            Constraint::Length(5), // Metrics
            Constraint::Min(0),    // Source
        ])
        .split(area);

    render_page_header(
        f,
        chunks[0],
        "Welcome to the Diabetes Analysis Project",
        "Home",
    );

    let intro = Paragraph::new(vec![
        Line::from(Span::styled(
            "This dashboard provides interactive views and tools for exploring",
            Theme::text(),
        )),
        Line::from(Span::styled(
            "diabetes-related data and health metrics.",
            Theme::text(),
        )),
    ])
    .wrap(Wrap { trim: true });
    f.render_widget(intro, chunks[1]);

    match dataset {
        Ok(summary) => {
            render_metrics(f, chunks[2], summary);
            render_source(f, chunks[3], summary);
        }
        Err(message) => render_data_error(f, chunks[2].union(chunks[3]), message),
    }
}

fn render_metrics(f: &mut Frame, area: Rect, summary: &DatasetSummary) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    f.render_widget(
        metric("Total Records", summary.record_count().to_string()),
        columns[0],
    );
    f.render_widget(
        metric("Features", summary.feature_count().to_string()),
        columns[1],
    );

    let quality = summary.data_quality_percent();
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Data Quality ", Theme::subtitle()))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .gauge_style(Theme::gauge(quality))
        .percent(quality.clamp(0.0, 100.0) as u16)
        .label(format!("{quality:.1}%"));
    f.render_widget(gauge, columns[2]);
}

fn metric(title: &'static str, value: String) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(value, Theme::title())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(Span::styled(format!(" {title} "), Theme::subtitle()))
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    )
}

fn render_source(f: &mut Frame, area: Rect, summary: &DatasetSummary) {
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Source: ", Theme::text_secondary()),
            Span::styled(summary.source().display().to_string(), Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Loaded: ", Theme::text_secondary()),
            Span::styled(
                summary.loaded_at().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                Theme::text(),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Use the sidebar to explore the data, calculate a BMI, or check a profile.",
            Theme::text_muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}
