//! UI module: View components for the TUI.

pub mod about;
pub mod bmi;
pub mod form;
pub mod home;
pub mod insights;
pub mod overview;
pub mod profile;

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::Page;
use crate::tui::styles::Theme;

/// Page title bar with a secondary caption.
pub fn render_page_header(f: &mut Frame, area: Rect, title: &str, caption: &str) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled(title.to_string(), Theme::title()),
        Span::styled(format!(" │ {caption}"), Theme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );
    f.render_widget(header, area);
}

/// Page navigation list.
pub fn render_sidebar(f: &mut Frame, area: Rect, current: Page) {
    let mut lines = vec![
        Line::from(Span::styled(" Select a page:", Theme::text_secondary())),
        Line::from(""),
    ];
    for (i, page) in Page::ALL.iter().enumerate() {
        let style = if *page == current {
            Theme::selected()
        } else {
            Theme::text()
        };
        lines.push(Line::from(Span::styled(
            format!(" {} {} ", i + 1, page.title()),
            style,
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" [Tab] ", Theme::key_hint()),
        Span::styled("Next page", Theme::key_desc()),
    ]));
    lines.push(Line::from(vec![
        Span::styled(" [Ctrl-Q] ", Theme::key_hint()),
        Span::styled("Quit", Theme::key_desc()),
    ]));

    let block = Block::default()
        .title(Span::styled(" Diabetes Analysis ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Shown in place of a data-bound page when the dataset is unavailable.
pub fn render_data_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Dataset Unavailable", Theme::danger())),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Theme::text())),
        Line::from(""),
        Line::from(Span::styled("Press [R] to retry", Theme::text_secondary())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::danger()),
    );
    f.render_widget(content, area);
}

pub fn render_caption(f: &mut Frame, area: Rect) {
    let caption = Paragraph::new(Line::from(Span::styled(
        "Built with Ratatui | Diabetes Analysis Project",
        Theme::text_muted(),
    )))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );
    f.render_widget(caption, area);
}

/// Raw cell text; missing values render as `NaN`.
#[must_use]
pub fn format_cell(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| v.to_string())
}

/// Statistic text with three decimals; undefined values render as `NaN`.
#[must_use]
pub fn format_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| format!("{v:.3}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_formatting() {
        assert_eq!(format_cell(Some(148.0)), "148");
        assert_eq!(format_cell(Some(0.627)), "0.627");
        assert_eq!(format_cell(None), "NaN");
        assert_eq!(format_stat(Some(1.2909944)), "1.291");
        assert_eq!(format_stat(None), "NaN");
    }
}
