//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation between intake and result
//! - Input event handling
//! - Synchronous screening on submit
//!
//! Each submission is one unit of work: snapshot the form, run the
//! screening service, render the outcome, wipe the form. No state
//! survives a submit cycle except the cached model.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::{ForestClassifier, ModelError};
use crate::application::ScreeningService;
use crate::domain::FEATURE_COUNT;
use crate::MalascreenError;

use super::ui::{
    form::{render_intake_form, IntakeFormState},
    render_disclaimer,
    result::{render_result, ResultState},
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Intake,
    Result,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Screening service with the cached model
    service: ScreeningService<ForestClassifier>,

    /// Intake form state
    form_state: IntakeFormState,

    /// Result screen state, set after a submit
    result_state: Option<ResultState>,
}

impl App {
    /// Create a new application instance, loading the risk model from
    /// `MALASCREEN_MODEL_PATH` (default `models`).
    ///
    /// # Errors
    /// Returns an error if the model artifact cannot be loaded. There is
    /// no screening without a model, so this is fatal at startup.
    pub fn new() -> Result<Self> {
        let model_path =
            std::env::var("MALASCREEN_MODEL_PATH").unwrap_or_else(|_| "models".to_string());
        let service = Self::build_service(std::path::Path::new(&model_path))?;
        Ok(Self::with_service(service))
    }

    /// Load the model artifact and build the screening service around it.
    fn build_service(
        model_dir: &std::path::Path,
    ) -> crate::Result<ScreeningService<ForestClassifier>> {
        let classifier = ForestClassifier::load(model_dir)?;
        let service = ScreeningService::new(Arc::new(classifier));
        if !service.model_compatible() {
            return Err(ModelError::Format(format!(
                "model at {model_dir:?} does not accept {FEATURE_COUNT}-feature rows"
            ))
            .into());
        }
        Ok(service)
    }

    /// Create the application around a pre-built screening service.
    ///
    /// Lets tests and alternate entry points inject the classifier.
    #[must_use]
    pub fn with_service(service: ScreeningService<ForestClassifier>) -> Self {
        Self {
            screen: Screen::Intake,
            should_quit: false,
            service,
            form_state: IntakeFormState::default(),
            result_state: None,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::Intake => render_intake_form(f, content_area, &self.form_state),
                    Screen::Result => {
                        if let Some(state) = &self.result_state {
                            render_result(f, content_area, state);
                        }
                    }
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            // Short poll to stay responsive
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Intake => self.handle_intake_key(key),
            Screen::Result => self.handle_result_key(key),
        }
    }

    fn handle_intake_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => {
                self.form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form_state.next_field();
            }
            KeyCode::Left => {
                self.form_state.cycle_prev();
            }
            KeyCode::Right => {
                self.form_state.cycle_next();
            }
            KeyCode::F(2) => {
                self.form_state.load_sample_data();
            }
            KeyCode::Char(c) => {
                self.form_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.form_state.delete_char();
            }
            KeyCode::Delete => {
                self.form_state.clear_field();
            }
            KeyCode::Enter => {
                self.submit_intake_form();
            }
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.result_state = None;
                self.form_state = IntakeFormState::default();
                self.screen = Screen::Intake;
            }
            KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn submit_intake_form(&mut self) {
        let report = match self.form_state.to_report() {
            Ok(report) => report,
            Err(message) => {
                self.form_state.error_message = Some(message);
                return;
            }
        };

        match self.service.assess(&report) {
            Ok(assessment) => {
                self.result_state = Some(ResultState::Complete { assessment });
                self.screen = Screen::Result;
                // Drop the plaintext intake immediately.
                self.form_state.clear_sensitive();
            }
            Err(MalascreenError::Intake(_)) => {
                // Retryable: keep the form as entered and warn.
                self.form_state.error_message =
                    Some("Please select all options before confirming.".to_string());
            }
            Err(e) => {
                tracing::error!("Screening failed: {e}");
                self.result_state = Some(ResultState::Error {
                    message: e.to_string(),
                });
                self.screen = Screen::Result;
            }
        }
    }
}
