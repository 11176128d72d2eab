//! BMI calculator page.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::form::{render_form_fields, FormField, InputForm};
use super::render_page_header;
use crate::domain::BmiCalculator;
use crate::tui::styles::Theme;

/// Accepted input limits, kg and m.
const WEIGHT_LIMITS: (f64, f64) = (1.0, 300.0);
const HEIGHT_LIMITS: (f64, f64) = (0.5, 2.5);

pub struct BmiState {
    pub form: InputForm,
    pub result: Option<BmiCalculator>,
}

impl Default for BmiState {
    fn default() -> Self {
        Self {
            form: InputForm::new(vec![
                FormField::required("Weight", "kg (1-300)").with_value("70"),
                FormField::required("Height", "m (0.5-2.5)").with_value("1.7"),
            ]),
            result: None,
        }
    }
}

impl BmiState {
    /// Validate inputs and compute the BMI.
    pub fn calculate(&mut self) {
        match self.read_inputs() {
            Ok(calc) => {
                self.result = Some(calc);
                self.form.error_message = None;
            }
            Err(message) => {
                self.result = None;
                self.form.error_message = Some(message);
            }
        }
    }

    fn read_inputs(&self) -> Result<BmiCalculator, String> {
        let weight = within(&self.form.fields[0], WEIGHT_LIMITS)?;
        let height = within(&self.form.fields[1], HEIGHT_LIMITS)?;
        BmiCalculator::new(weight, height).map_err(|e| e.to_string())
    }
}

fn within(field: &FormField, (min, max): (f64, f64)) -> Result<f64, String> {
    let value = field
        .parse()?
        .ok_or_else(|| format!("{}: Required", field.label))?;
    if value < min || value > max {
        return Err(format!(
            "{}: Value must be between {} and {}",
            field.label, min, max
        ));
    }
    Ok(value)
}

pub fn render_bmi(f: &mut Frame, area: Rect, state: &BmiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(6), // Inputs
            Constraint::Min(0),    // Result
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_page_header(f, chunks[0], "BMI Calculator", "weight / height²");
    render_form_fields(f, chunks[1], &state.form);
    render_result(f, chunks[2], state);
    render_footer(f, chunks[3], state);
}

fn render_result(f: &mut Frame, area: Rect, state: &BmiState) {
    let block = Block::default()
        .title(Span::styled(" Result ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let lines = match &state.result {
        Some(calc) => {
            let category = calc.category();
            vec![
                Line::from(vec![
                    Span::styled("Your BMI: ", Theme::text_secondary()),
                    Span::styled(format!("{:.2}", calc.calculate_bmi()), Theme::title()),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Category: ", Theme::text_secondary()),
                    Span::styled(category.label(), Theme::bmi_category(category)),
                ]),
            ]
        }
        None => vec![Line::from(Span::styled(
            "Press [Enter] to calculate",
            Theme::text_muted(),
        ))],
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(f: &mut Frame, area: Rect, state: &BmiState) {
    let content = if let Some(err) = &state.form.error_message {
        Line::from(vec![
            Span::styled("! ", Theme::danger()),
            Span::styled(err.as_str(), Theme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", Theme::key_hint()),
            Span::styled("Navigate ", Theme::key_desc()),
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Calculate ", Theme::key_desc()),
            Span::styled("[Esc] ", Theme::key_hint()),
            Span::styled("Home", Theme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );
    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BmiCategory;

    #[test]
    fn test_default_inputs_calculate() {
        let mut state = BmiState::default();
        state.calculate();
        let calc = state.result.expect("result");
        assert_eq!(calc.category(), BmiCategory::NormalWeight);
        assert!(state.form.error_message.is_none());
    }

    #[test]
    fn test_out_of_limit_height() {
        let mut state = BmiState::default();
        state.form.fill(&["70", "3"]);
        state.calculate();
        assert!(state.result.is_none());
        assert_eq!(
            state.form.error_message.as_deref(),
            Some("Height: Value must be between 0.5 and 2.5")
        );
    }
}
