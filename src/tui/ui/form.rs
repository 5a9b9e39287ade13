//! Symptom intake form.
//!
//! Generalizes a simple numeric field list with choice fields: every
//! categorical question cycles through its label set, with the unset
//! sentinel always first, matching the selection order the encoding
//! expects.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{FeverIntensity, Gender, SymptomReport, YesNo};
use crate::tui::styles::ScreenerTheme;

const GENDER_OPTIONS: &[&str] = &["", "Female", "Male"];
const FEVER_INTENSITY_OPTIONS: &[&str] = &["", "High Grade", "Intermittent", "Low"];
const YES_NO_OPTIONS: &[&str] = &["", "Yes", "No"];

/// Identifies a form field independent of its position on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    PatientId,
    Age,
    Gender,
    FeverIntensity,
    FeverDays,
    HeadacheDays,
    BodyacheDays,
    VomitingDays,
    ChillsDays,
    RigorsDays,
    AbdominalDiscomfortDays,
    CoughDays,
    UrinalVariation,
    Pallor,
    Temperature,
}

/// Editable value of a form field.
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// Free text, may stay empty.
    Text { buffer: String },
    /// Non-negative number edited as a digit buffer.
    Number { buffer: String, decimal: bool },
    /// One label from a fixed set; index 0 is the unset sentinel.
    Choice {
        options: &'static [&'static str],
        selected: usize,
    },
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct IntakeField {
    pub id: FieldId,
    pub label: &'static str,
    pub hint: &'static str,
    pub value: FieldValue,
}

fn text(id: FieldId, label: &'static str, hint: &'static str) -> IntakeField {
    IntakeField {
        id,
        label,
        hint,
        value: FieldValue::Text {
            buffer: String::new(),
        },
    }
}

fn number(id: FieldId, label: &'static str, hint: &'static str, decimal: bool) -> IntakeField {
    IntakeField {
        id,
        label,
        hint,
        value: FieldValue::Number {
            buffer: "0".to_string(),
            decimal,
        },
    }
}

fn choice(
    id: FieldId,
    label: &'static str,
    hint: &'static str,
    options: &'static [&'static str],
) -> IntakeField {
    IntakeField {
        id,
        label,
        hint,
        value: FieldValue::Choice {
            options,
            selected: 0,
        },
    }
}

/// Intake form state
pub struct IntakeFormState {
    pub fields: Vec<IntakeField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for IntakeFormState {
    fn default() -> Self {
        Self {
            fields: vec![
                text(FieldId::PatientId, "Patient ID", "optional"),
                number(FieldId::Age, "Age", "years", false),
                choice(FieldId::Gender, "Gender", "select", GENDER_OPTIONS),
                choice(
                    FieldId::FeverIntensity,
                    "Fever intensity",
                    "select",
                    FEVER_INTENSITY_OPTIONS,
                ),
                number(FieldId::FeverDays, "Days with fever", "days", false),
                number(FieldId::HeadacheDays, "Days with headache", "days", false),
                number(FieldId::BodyacheDays, "Days with body ache", "days", false),
                number(FieldId::VomitingDays, "Days with vomiting", "days", false),
                number(FieldId::ChillsDays, "Days with chills", "days", false),
                number(FieldId::RigorsDays, "Days with rigors", "days", false),
                number(
                    FieldId::AbdominalDiscomfortDays,
                    "Days with abdominal discomfort",
                    "days",
                    false,
                ),
                number(FieldId::CoughDays, "Days with cough", "days", false),
                choice(
                    FieldId::UrinalVariation,
                    "Any changes in urination?",
                    "select",
                    YES_NO_OPTIONS,
                ),
                choice(FieldId::Pallor, "Pallor (paleness)?", "select", YES_NO_OPTIONS),
                number(FieldId::Temperature, "Body temperature (F)", "degrees F", true),
            ],
            selected_field: 0,
            error_message: None,
        }
    }
}

impl IntakeFormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field
    pub fn input_char(&mut self, c: char) {
        match &mut self.fields[self.selected_field].value {
            FieldValue::Text { buffer } => {
                if !c.is_control() {
                    buffer.push(c);
                }
            }
            FieldValue::Number { buffer, decimal } => {
                if c.is_ascii_digit() || (*decimal && c == '.' && !buffer.contains('.')) {
                    // Typing over the "0" default replaces it.
                    if buffer.as_str() == "0" && c.is_ascii_digit() {
                        buffer.clear();
                    }
                    buffer.push(c);
                }
            }
            FieldValue::Choice { .. } => return,
        }
        self.error_message = None;
    }

    /// Cycle the current choice field forward
    pub fn cycle_next(&mut self) {
        if let FieldValue::Choice { options, selected } =
            &mut self.fields[self.selected_field].value
        {
            *selected = (*selected + 1) % options.len();
            self.error_message = None;
        }
    }

    /// Cycle the current choice field backward
    pub fn cycle_prev(&mut self) {
        if let FieldValue::Choice { options, selected } =
            &mut self.fields[self.selected_field].value
        {
            *selected = if *selected == 0 {
                options.len() - 1
            } else {
                *selected - 1
            };
            self.error_message = None;
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        match &mut self.fields[self.selected_field].value {
            FieldValue::Text { buffer } | FieldValue::Number { buffer, .. } => {
                buffer.pop();
            }
            FieldValue::Choice { .. } => {}
        }
    }

    /// Clear the current field back to its default
    pub fn clear_field(&mut self) {
        match &mut self.fields[self.selected_field].value {
            FieldValue::Text { buffer } => buffer.clear(),
            FieldValue::Number { buffer, .. } => "0".clone_into(buffer),
            FieldValue::Choice { selected, .. } => *selected = 0,
        }
    }

    /// Wipe all field buffers from memory and reset the form.
    ///
    /// Called after a submission completes so patient input does not
    /// persist in UI state.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut() {
            match &mut field.value {
                FieldValue::Text { buffer } | FieldValue::Number { buffer, .. } => {
                    buffer.zeroize();
                }
                FieldValue::Choice { selected, .. } => *selected = 0,
            }
        }
        *self = Self::default();
    }

    /// Snapshot the form into a report.
    ///
    /// Parses numeric buffers; categorical selections map straight to
    /// their variants, with the sentinel staying `None` for the encoder
    /// to flag.
    pub fn to_report(&self) -> Result<SymptomReport, String> {
        let mut report = SymptomReport::default();

        for field in &self.fields {
            match (field.id, &field.value) {
                (FieldId::PatientId, FieldValue::Text { buffer }) => {
                    let trimmed = buffer.trim();
                    report.patient_id = (!trimmed.is_empty()).then(|| trimmed.to_string());
                }
                (FieldId::Age, FieldValue::Number { buffer, .. }) => {
                    report.age = parse_count(field.label, buffer)?;
                }
                (FieldId::Gender, FieldValue::Choice { options, selected }) => {
                    report.gender = Gender::parse_label(options[*selected]);
                }
                (FieldId::FeverIntensity, FieldValue::Choice { options, selected }) => {
                    report.fever_intensity = FeverIntensity::parse_label(options[*selected]);
                }
                (FieldId::FeverDays, FieldValue::Number { buffer, .. }) => {
                    report.fever_days = parse_count(field.label, buffer)?;
                }
                (FieldId::HeadacheDays, FieldValue::Number { buffer, .. }) => {
                    report.headache_days = parse_count(field.label, buffer)?;
                }
                (FieldId::BodyacheDays, FieldValue::Number { buffer, .. }) => {
                    report.bodyache_days = parse_count(field.label, buffer)?;
                }
                (FieldId::VomitingDays, FieldValue::Number { buffer, .. }) => {
                    report.vomiting_days = parse_count(field.label, buffer)?;
                }
                (FieldId::ChillsDays, FieldValue::Number { buffer, .. }) => {
                    report.chills_days = parse_count(field.label, buffer)?;
                }
                (FieldId::RigorsDays, FieldValue::Number { buffer, .. }) => {
                    report.rigors_days = parse_count(field.label, buffer)?;
                }
                (FieldId::AbdominalDiscomfortDays, FieldValue::Number { buffer, .. }) => {
                    report.abdominal_discomfort_days = parse_count(field.label, buffer)?;
                }
                (FieldId::CoughDays, FieldValue::Number { buffer, .. }) => {
                    report.cough_days = parse_count(field.label, buffer)?;
                }
                (FieldId::UrinalVariation, FieldValue::Choice { options, selected }) => {
                    report.urinal_variation = YesNo::parse_label(options[*selected]);
                }
                (FieldId::Pallor, FieldValue::Choice { options, selected }) => {
                    report.pallor = YesNo::parse_label(options[*selected]);
                }
                (FieldId::Temperature, FieldValue::Number { buffer, .. }) => {
                    report.temperature = parse_temperature(field.label, buffer)?;
                }
                _ => return Err(format!("{}: internal field mismatch", field.label)),
            }
        }

        Ok(report)
    }

    /// Load sample data for quick manual testing.
    pub fn load_sample_data(&mut self) {
        // 30yo male, three days of high-grade fever with chills and rigors.
        for field in self.fields.iter_mut() {
            match (field.id, &mut field.value) {
                (FieldId::Age, FieldValue::Number { buffer, .. }) => "30".clone_into(buffer),
                (FieldId::Gender, FieldValue::Choice { selected, .. }) => *selected = 2,
                (FieldId::FeverIntensity, FieldValue::Choice { selected, .. }) => *selected = 1,
                (FieldId::FeverDays, FieldValue::Number { buffer, .. }) => "3".clone_into(buffer),
                (FieldId::HeadacheDays, FieldValue::Number { buffer, .. }) => {
                    "2".clone_into(buffer);
                }
                (FieldId::BodyacheDays, FieldValue::Number { buffer, .. }) => {
                    "1".clone_into(buffer);
                }
                (FieldId::ChillsDays, FieldValue::Number { buffer, .. }) => "2".clone_into(buffer),
                (FieldId::RigorsDays, FieldValue::Number { buffer, .. }) => "1".clone_into(buffer),
                (FieldId::CoughDays, FieldValue::Number { buffer, .. }) => "1".clone_into(buffer),
                (FieldId::UrinalVariation, FieldValue::Choice { selected, .. }) => *selected = 2,
                (FieldId::Pallor, FieldValue::Choice { selected, .. }) => *selected = 1,
                (FieldId::Temperature, FieldValue::Number { buffer, .. }) => {
                    "101.5".clone_into(buffer);
                }
                _ => {}
            }
        }
    }
}

fn parse_count(label: &str, buffer: &str) -> Result<u32, String> {
    buffer
        .trim()
        .parse()
        .map_err(|_| format!("{label}: enter a whole number"))
}

fn parse_temperature(label: &str, buffer: &str) -> Result<f64, String> {
    let value: f64 = buffer
        .trim()
        .parse()
        .map_err(|_| format!("{label}: enter a number"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{label}: must be at least 0.0"));
    }
    Ok(value)
}

/// Render the symptom intake form
pub fn render_intake_form(f: &mut Frame, area: Rect, state: &IntakeFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ScreenerTheme::text()),
        Span::styled("Symptom Intake", ScreenerTheme::title()),
        Span::styled(" │ Malaria Risk Screening", ScreenerTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ScreenerTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &IntakeFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = state.fields.len().div_ceil(2);

    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[IntakeField],
    offset: usize,
    selected: usize,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let border_style = if is_selected {
            ScreenerTheme::border_focused()
        } else {
            ScreenerTheme::border()
        };

        let title_style = if is_selected {
            ScreenerTheme::focused()
        } else {
            ScreenerTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let content = Paragraph::new(field_line(field, is_selected)).block(block);
        f.render_widget(content, chunks[i]);
    }
}

fn field_line(field: &IntakeField, is_selected: bool) -> Line<'_> {
    let mut spans = vec![Span::raw(" ")];

    match &field.value {
        FieldValue::Text { buffer } | FieldValue::Number { buffer, .. } => {
            if buffer.is_empty() {
                spans.push(Span::styled(field.hint, ScreenerTheme::text_muted()));
            } else {
                spans.push(Span::styled(buffer.as_str(), ScreenerTheme::text()));
            }
            if is_selected {
                spans.push(Span::styled("▌", ScreenerTheme::focused()));
            }
        }
        FieldValue::Choice { options, selected } => {
            if is_selected {
                spans.push(Span::styled("◂ ", ScreenerTheme::focused()));
            }
            if *selected == 0 {
                spans.push(Span::styled(field.hint, ScreenerTheme::text_muted()));
            } else {
                spans.push(Span::styled(options[*selected], ScreenerTheme::text()));
            }
            if is_selected {
                spans.push(Span::styled(" ▸", ScreenerTheme::focused()));
            }
        }
    }

    Line::from(spans)
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &IntakeFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", ScreenerTheme::warning()),
            Span::styled(err.clone(), ScreenerTheme::warning()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", ScreenerTheme::key_hint()),
            Span::styled("Navigate ", ScreenerTheme::key_desc()),
            Span::styled("[◂▸] ", ScreenerTheme::key_hint()),
            Span::styled("Select ", ScreenerTheme::key_desc()),
            Span::styled("[Enter] ", ScreenerTheme::key_hint()),
            Span::styled("Confirm ", ScreenerTheme::key_desc()),
            Span::styled("[F2] ", ScreenerTheme::key_hint()),
            Span::styled("Sample ", ScreenerTheme::key_desc()),
            Span::styled("[Esc] ", ScreenerTheme::key_hint()),
            Span::styled("Quit", ScreenerTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ScreenerTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeverIntensity, Gender, YesNo};

    fn select(state: &mut IntakeFormState, id: FieldId, option_index: usize) {
        for field in state.fields.iter_mut() {
            if field.id == id {
                if let FieldValue::Choice { selected, .. } = &mut field.value {
                    *selected = option_index;
                }
            }
        }
    }

    #[test]
    fn test_defaults_snapshot_to_unset_report() {
        let state = IntakeFormState::default();
        let report = state.to_report().expect("defaults parse");
        assert_eq!(report.age, 0);
        assert!(report.gender.is_none());
        assert!(report.fever_intensity.is_none());
        assert!(report.urinal_variation.is_none());
        assert!(report.pallor.is_none());
        assert_eq!(report.temperature, 0.0);
        assert!(report.patient_id.is_none());
    }

    #[test]
    fn test_choice_selection_maps_to_variants() {
        let mut state = IntakeFormState::default();
        select(&mut state, FieldId::Gender, 1);
        select(&mut state, FieldId::FeverIntensity, 2);
        select(&mut state, FieldId::UrinalVariation, 1);
        select(&mut state, FieldId::Pallor, 2);

        let report = state.to_report().expect("parses");
        assert_eq!(report.gender, Some(Gender::Female));
        assert_eq!(report.fever_intensity, Some(FeverIntensity::Intermittent));
        assert_eq!(report.urinal_variation, Some(YesNo::Yes));
        assert_eq!(report.pallor, Some(YesNo::No));
    }

    #[test]
    fn test_sample_data_matches_documented_scenario() {
        let mut state = IntakeFormState::default();
        state.load_sample_data();
        let report = state.to_report().expect("sample parses");
        let vector = report.encode().expect("sample is complete");
        assert_eq!(
            vector.as_row(),
            &[3.0, 3.0, 2.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 2.0, 1.0, 101.5, 30.0, 1.0]
        );
    }

    #[test]
    fn test_number_input_replaces_default_zero() {
        let mut state = IntakeFormState::default();
        state.selected_field = 1; // Age
        state.input_char('4');
        state.input_char('2');
        let report = state.to_report().expect("parses");
        assert_eq!(report.age, 42);
    }

    #[test]
    fn test_decimal_only_where_allowed() {
        let mut state = IntakeFormState::default();

        state.selected_field = 1; // Age, integer
        state.input_char('.');
        let report = state.to_report().expect("dot ignored");
        assert_eq!(report.age, 0);

        state.selected_field = state.fields.len() - 1; // Temperature
        state.input_char('9');
        state.input_char('8');
        state.input_char('.');
        state.input_char('.');
        state.input_char('6');
        let report = state.to_report().expect("single dot accepted");
        assert!((report.temperature - 98.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_number_buffer_is_rejected() {
        let mut state = IntakeFormState::default();
        state.selected_field = 1; // Age
        state.delete_char();
        let err = state.to_report().expect_err("empty buffer");
        assert!(err.starts_with("Age"));
    }

    #[test]
    fn test_cycle_wraps_through_sentinel() {
        let mut state = IntakeFormState::default();
        state.selected_field = 2; // Gender, 3 options
        state.cycle_prev();
        let report = state.to_report().expect("parses");
        assert_eq!(report.gender, Some(Gender::Male));

        state.cycle_next();
        let report = state.to_report().expect("parses");
        assert!(report.gender.is_none());
    }

    #[test]
    fn test_clear_sensitive_resets_everything() {
        let mut state = IntakeFormState::default();
        state.load_sample_data();
        state.selected_field = 5;
        state.error_message = Some("warning".into());

        state.clear_sensitive();

        assert_eq!(state.selected_field, 0);
        assert!(state.error_message.is_none());
        let report = state.to_report().expect("parses");
        assert!(report.gender.is_none());
        assert_eq!(report.fever_days, 0);
    }
}
