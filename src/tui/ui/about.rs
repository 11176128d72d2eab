//! About page.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::Theme;

pub fn render_about(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled("About this project", Theme::title())),
        Line::from(""),
        Line::from(Span::styled(
            "An exploratory dashboard over the Pima Indians diabetes dataset \
             (women aged 21 and over).",
            Theme::text(),
        )),
        Line::from(""),
        Line::from(Span::styled("Pages", Theme::subtitle())),
        Line::from(Span::styled("  Home: record count, feature count, data quality", Theme::text())),
        Line::from(Span::styled("  Data Overview: first rows and descriptive statistics", Theme::text())),
        Line::from(Span::styled("  BMI Calculator: weight / height² with WHO categories", Theme::text())),
        Line::from(Span::styled("  Profile Check: plausible-range validation of measurements", Theme::text())),
        Line::from(Span::styled("  Analysis & Insights: range compliance across the dataset", Theme::text())),
        Line::from(""),
        Line::from(Span::styled(
            "No predictions are made. Ranges flag implausible measurements only.",
            Theme::text_muted(),
        )),
    ];

    let about = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(Span::styled(" About ", Theme::subtitle()))
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );
    f.render_widget(about, area);
}
