//! Screening result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::{RiskAssessment, RiskIndication};
use crate::tui::styles::ScreenerTheme;

/// Result screen state
#[derive(Debug, Clone)]
pub enum ResultState {
    /// Screening finished with an assessment
    Complete { assessment: RiskAssessment },
    /// Screening failed
    Error { message: String },
}

/// Render the screening result
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_result_header(f, chunks[0]);
    match state {
        ResultState::Complete { assessment } => render_assessment(f, chunks[1], assessment),
        ResultState::Error { message } => render_error(f, chunks[1], message),
    }
    render_result_footer(f, chunks[2]);
}

fn render_result_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ScreenerTheme::text()),
        Span::styled("Screening Result", ScreenerTheme::title()),
        Span::styled(" │ Preliminary Assessment", ScreenerTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ScreenerTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_assessment(f: &mut Frame, area: Rect, assessment: &RiskAssessment) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(ScreenerTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Headline
            Constraint::Length(4), // Advice
            Constraint::Min(0),    // Meta
        ])
        .margin(1)
        .split(inner);

    let style = ScreenerTheme::indication(assessment.indication);
    let headline = Paragraph::new(vec![
        Line::from(Span::styled(
            assessment.indication.headline(),
            style.add_modifier(ratatui::style::Modifier::BOLD),
        )),
        Line::from(""),
    ])
    .alignment(Alignment::Center);
    f.render_widget(headline, chunks[0]);

    let advice_text = match assessment.indication.advice() {
        Some(advice) => Span::styled(advice, ScreenerTheme::text()),
        // Unrecognized model output: no risk message is shown.
        None => Span::styled(
            "The screening did not produce a recognizable result. No risk message is \
             available; please consult a medical professional directly.",
            ScreenerTheme::text_muted(),
        ),
    };
    let advice = Paragraph::new(Line::from(advice_text))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(advice, chunks[1]);

    let mut meta = vec![Span::styled(
        assessment
            .created_at
            .format("Screened %Y-%m-%d %H:%M UTC")
            .to_string(),
        ScreenerTheme::text_secondary(),
    )];
    if let Some(patient_id) = &assessment.patient_id {
        meta.push(Span::styled(" │ Patient ", ScreenerTheme::text_muted()));
        meta.push(Span::styled(patient_id.clone(), ScreenerTheme::text_secondary()));
    }
    let meta = Paragraph::new(Line::from(meta)).alignment(Alignment::Center);
    f.render_widget(meta, chunks[2]);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Screening failed", ScreenerTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(message, ScreenerTheme::text())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(ScreenerTheme::danger()),
    );

    f.render_widget(content, area);
}

fn render_result_footer(f: &mut Frame, area: Rect) {
    let content = Line::from(vec![
        Span::styled("[Enter] ", ScreenerTheme::key_hint()),
        Span::styled("New Screening ", ScreenerTheme::key_desc()),
        Span::styled("[Esc] ", ScreenerTheme::key_hint()),
        Span::styled("Quit", ScreenerTheme::key_desc()),
    ]);

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

    #[test]
    fn test_unknown_indication_has_no_advice() {
        let assessment = RiskAssessment::from_code(3, None);
        assert_eq!(assessment.indication, RiskIndication::Unknown);
        assert!(assessment.indication.advice().is_none());
    }
}
