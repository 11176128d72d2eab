//! Numeric input form shared by the BMI and profile pages.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::styles::Theme;

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub value: String,
    pub required: bool,
}

impl FormField {
    #[must_use]
    pub fn required(label: &'static str, hint: &'static str) -> Self {
        Self {
            label,
            hint,
            value: String::new(),
            required: true,
        }
    }

    #[must_use]
    pub fn optional(label: &'static str, hint: &'static str) -> Self {
        Self {
            required: false,
            ..Self::required(label, hint)
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    /// Parse the field as a number.
    ///
    /// Blank optional fields yield `Ok(None)`.
    pub fn parse(&self) -> Result<Option<f64>, String> {
        let raw = self.value.trim();
        if raw.is_empty() {
            return if self.required {
                Err(format!("{}: Required", self.label))
            } else {
                Ok(None)
            };
        }
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| format!("{}: Invalid number", self.label))
    }
}

/// Field list with a selection cursor.
#[derive(Debug, Clone)]
pub struct InputForm {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl InputForm {
    #[must_use]
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            selected_field: 0,
            error_message: None,
        }
    }

    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Accepts digits, `.` and `-` only.
    pub fn input_char(&mut self, c: char) {
        if c.is_ascii_digit() || c == '.' || c == '-' {
            self.fields[self.selected_field].value.push(c);
            self.error_message = None;
        }
    }

    pub fn delete_char(&mut self) {
        self.fields[self.selected_field].value.pop();
    }

    pub fn clear_field(&mut self) {
        self.fields[self.selected_field].value.clear();
    }

    /// Replace field values in order.
    pub fn fill(&mut self, values: &[&str]) {
        for (field, value) in self.fields.iter_mut().zip(values) {
            field.value = (*value).to_string();
        }
        self.error_message = None;
    }
}

/// Render fields in two columns.
pub fn render_form_fields(f: &mut Frame, area: Rect, form: &InputForm) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (form.fields.len() + 1) / 2;
    render_field_column(f, columns[0], &form.fields[..mid], 0, form.selected_field);
    render_field_column(f, columns[1], &form.fields[mid..], mid, form.selected_field);
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let (border_style, title_style) = if is_selected {
            (Theme::border_focused(), Theme::focused())
        } else {
            (Theme::border(), Theme::text_secondary())
        };

        let title = if field.required {
            format!(" {} ", field.label)
        } else {
            format!(" {} (optional) ", field.label)
        };
        let block = Block::default()
            .title(Span::styled(title, title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value = if field.value.is_empty() {
            Span::styled(field.hint, Theme::text_muted())
        } else {
            Span::styled(field.value.as_str(), Theme::text())
        };
        let cursor = if is_selected {
            Span::styled("▌", Theme::cursor())
        } else {
            Span::raw("")
        };

        let content = Paragraph::new(Line::from(vec![Span::raw(" "), value, cursor])).block(block);
        f.render_widget(content, chunks[i]);
    }
}
