//! Profile check page: enter measurements and see range validation.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use serde_json::Value;

use super::form::{render_form_fields, FormField, InputForm};
use super::render_page_header;
use crate::application::ScreeningTally;
use crate::domain::{whole_i64, HealthField, HealthProfile, ProfileDict};
use crate::tui::styles::Theme;

/// Form order; the first four are the core features.
const FIELD_ORDER: [HealthField; 8] = [
    HealthField::Glucose,
    HealthField::BloodPressure,
    HealthField::Bmi,
    HealthField::Age,
    HealthField::SkinThickness,
    HealthField::Insulin,
    HealthField::Pregnancies,
    HealthField::DiabetesPedigree,
];

/// First record of the Pima dataset (its zero insulin is out of range).
const SAMPLE: [&str; 8] = ["148", "72", "33.6", "50", "35", "0", "6", "0.627"];

pub struct ProfileState {
    pub form: InputForm,
    pub outcome: Option<HealthProfile>,
}

impl Default for ProfileState {
    fn default() -> Self {
        Self {
            form: InputForm::new(vec![
                FormField::required("Glucose", "mg/dL (44-199)"),
                FormField::required("Blood Pressure", "mm Hg (24-122)"),
                FormField::required("BMI", "kg/m² (18.2-67.1)"),
                FormField::required("Age", "years (21-81)"),
                FormField::optional("Skin Thickness", "mm (7-99)"),
                FormField::optional("Insulin", "mu U/ml (14-846)"),
                FormField::optional("Pregnancies", "count (0-20), blank = 0"),
                FormField::optional("Diabetes Pedigree", "(0.078-2.42)"),
            ]),
            outcome: None,
        }
    }
}

impl ProfileState {
    /// Collect the form into dictionary input. Blank optional fields are omitted.
    pub fn to_input(&self) -> Result<ProfileDict, String> {
        let mut input = ProfileDict::new();
        for (field, entry) in FIELD_ORDER.iter().zip(&self.form.fields) {
            let Some(value) = entry.parse()? else {
                continue;
            };
            let json = match whole_i64(value) {
                Some(whole) if field.is_integer() => Value::from(whole),
                _ => Value::from(value),
            };
            input.insert(field.key().to_string(), json);
        }
        Ok(input)
    }

    pub fn load_sample_data(&mut self) {
        self.form.fill(&SAMPLE);
        self.outcome = None;
    }
}

pub fn render_profile(f: &mut Frame, area: Rect, state: &ProfileState, tally: ScreeningTally) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(14), // Form
            Constraint::Min(0),     // Result
            Constraint::Length(3),  // Footer
        ])
        .split(area);

    render_page_header(f, chunks[0], "Profile Check", "Plausible-range validation");
    render_form_fields(f, chunks[1], &state.form);
    render_outcome(f, chunks[2], state, tally);
    render_footer(f, chunks[3], state);
}

fn render_outcome(f: &mut Frame, area: Rect, state: &ProfileState, tally: ScreeningTally) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let summary_block = Block::default()
        .title(Span::styled(" Summary ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());
    let errors_block = Block::default()
        .title(Span::styled(
            format!(" Range Checks ({} checked, {} flagged) ", tally.checked, tally.flagged),
            Theme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let Some(profile) = &state.outcome else {
        let hint = Paragraph::new(Line::from(Span::styled(
            "Fill in the form and press [Enter]",
            Theme::text_muted(),
        )))
        .block(summary_block);
        f.render_widget(hint, columns[0]);
        f.render_widget(errors_block, columns[1]);
        return;
    };

    let summary: Vec<Line> = profile
        .summary()
        .lines()
        .map(|line| Line::from(Span::styled(line.to_string(), Theme::text())))
        .collect();
    f.render_widget(Paragraph::new(summary).block(summary_block), columns[0]);

    let errors: Vec<Line> = if profile.is_valid() {
        vec![Line::from(Span::styled(
            "All values within expected ranges",
            Theme::success(),
        ))]
    } else {
        profile
            .validation_errors()
            .iter()
            .map(|message| {
                Line::from(vec![
                    Span::styled("• ", Theme::warning()),
                    Span::styled(message.as_str(), Theme::text()),
                ])
            })
            .collect()
    };
    let errors = Paragraph::new(errors)
        .block(errors_block)
        .wrap(Wrap { trim: true });
    f.render_widget(errors, columns[1]);
}

fn render_footer(f: &mut Frame, area: Rect, state: &ProfileState) {
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
            Span::styled("Check ", Theme::key_desc()),
            Span::styled("[S] ", Theme::key_hint()),
            Span::styled("Sample Record ", Theme::key_desc()),
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
    use crate::domain::ProfileError;
    use serde_json::json;

    #[test]
    fn test_sample_input_builds_profile() {
        let mut state = ProfileState::default();
        state.load_sample_data();

        let input = state.to_input().expect("input");
        assert_eq!(input["age"], json!(50));
        assert_eq!(input["pregnancies"], json!(6));
        assert_eq!(input["bmi"], json!(33.6));

        let profile = HealthProfile::from_dict(&input).expect("profile");
        assert_eq!(
            profile.validation_errors(),
            ["Insulin (0) is below minimum expected value (14)"]
        );
    }

    #[test]
    fn test_blank_optionals_are_omitted() {
        let mut state = ProfileState::default();
        state.form.fill(&["120", "80", "28.5", "45"]);

        let input = state.to_input().expect("input");
        assert_eq!(input.len(), 4);
        assert!(!input.contains_key("pregnancies"));
    }

    #[test]
    fn test_oversized_integer_is_not_clamped() {
        let mut state = ProfileState::default();
        state.form.fill(&["120", "80", "28.5", "99999999999999999999"]);

        let input = state.to_input().expect("input");
        assert!(input["age"].is_f64());
        assert!(matches!(
            HealthProfile::from_dict(&input),
            Err(ProfileError::NotInteger { field: HealthField::Age, .. })
        ));
    }

    #[test]
    fn test_missing_required_value() {
        let mut state = ProfileState::default();
        state.form.fill(&["120", "", "28.5", "45"]);
        assert_eq!(state.to_input(), Err("Blood Pressure: Required".to_string()));
    }
}
