//! Main TUI application state machine.
//!
//! Handles:
//! - Page navigation
//! - Input event handling
//! - Dataset loading through the cached dataset service

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::{CsvDatasetSource, DatasetError};
use crate::application::{DatasetService, DatasetSummary, ScreeningService};
use crate::{Config, GlycoscopeError};

use super::ui::{
    about::render_about,
    bmi::{render_bmi, BmiState},
    home::render_home,
    insights::render_insights,
    overview::render_overview,
    profile::{render_profile, ProfileState},
    render_caption, render_sidebar,
};

/// Dashboard pages, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    DataOverview,
    BmiCalculator,
    ProfileCheck,
    Insights,
    About,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Self::Home,
        Self::DataOverview,
        Self::BmiCalculator,
        Self::ProfileCheck,
        Self::Insights,
        Self::About,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::DataOverview => "Data Overview",
            Self::BmiCalculator => "BMI Calculator",
            Self::ProfileCheck => "Profile Check",
            Self::Insights => "Analysis & Insights",
            Self::About => "About",
        }
    }

    /// Pages that take keyboard text input.
    #[must_use]
    pub fn is_form(self) -> bool {
        matches!(self, Self::BmiCalculator | Self::ProfileCheck)
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Main application state
pub struct App {
    config: Config,

    /// Current page
    page: Page,

    /// Whether the app should quit
    should_quit: bool,

    /// Path-memoised dataset loader
    datasets: DatasetService<CsvDatasetSource>,

    /// Loaded dataset, or the message to show instead
    dataset: std::result::Result<Arc<DatasetSummary>, String>,

    screening: ScreeningService,

    bmi_state: BmiState,

    profile_state: ProfileState,
}

impl App {
    /// Create the application with the CSV dataset loader.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_dependencies(config, DatasetService::new(CsvDatasetSource::new()))
    }

    /// Create the application with an injected dataset service.
    ///
    /// The dataset is loaded immediately; a load failure is kept as a message
    /// for the data-bound pages rather than aborting startup.
    #[must_use]
    pub fn with_dependencies(config: Config, datasets: DatasetService<CsvDatasetSource>) -> Self {
        let mut app = Self {
            config,
            page: Page::Home,
            should_quit: false,
            datasets,
            dataset: Err(String::new()),
            screening: ScreeningService::new(),
            bmi_state: BmiState::default(),
            profile_state: ProfileState::default(),
        };
        app.load_dataset(false);
        app
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(2)])
                    .split(f.area());

                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Length(28), Constraint::Min(0)])
                    .split(rows[0]);

                render_sidebar(f, columns[0], self.page);

                let content = columns[1];
                let dataset = self.dataset.as_ref().map_err(String::as_str);
                match self.page {
                    Page::Home => render_home(f, content, dataset),
                    Page::DataOverview => {
                        render_overview(f, content, dataset, self.config.preview_rows)
                    }
                    Page::BmiCalculator => render_bmi(f, content, &self.bmi_state),
                    Page::ProfileCheck => {
                        render_profile(f, content, &self.profile_state, self.screening.tally())
                    }
                    Page::Insights => render_insights(f, content, dataset),
                    Page::About => render_about(f, content),
                }

                render_caption(f, rows[1]);
            })?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.page {
            Page::BmiCalculator => self.handle_bmi_key(key),
            Page::ProfileCheck => self.handle_profile_key(key),
            _ => self.handle_navigation_key(key),
        }
    }

    fn handle_navigation_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab | KeyCode::Down => self.page = self.page.next(),
            KeyCode::BackTab | KeyCode::Up => self.page = self.page.prev(),
            KeyCode::Char(c @ '1'..='6') => {
                let index = c as usize - '1' as usize;
                self.page = Page::ALL[index];
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.load_dataset(true),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Esc => self.page = Page::Home,
            _ => {}
        }
    }

    fn handle_bmi_key(&mut self, key: KeyCode) {
        let form = &mut self.bmi_state.form;
        match key {
            KeyCode::Esc => self.page = Page::Home,
            KeyCode::Up | KeyCode::BackTab => form.prev_field(),
            KeyCode::Down | KeyCode::Tab => form.next_field(),
            KeyCode::Char(c) => form.input_char(c),
            KeyCode::Backspace => form.delete_char(),
            KeyCode::Delete => form.clear_field(),
            KeyCode::Enter => self.bmi_state.calculate(),
            _ => {}
        }
    }

    fn handle_profile_key(&mut self, key: KeyCode) {
        let form = &mut self.profile_state.form;
        match key {
            KeyCode::Esc => self.page = Page::Home,
            KeyCode::Up | KeyCode::BackTab => form.prev_field(),
            KeyCode::Down | KeyCode::Tab => form.next_field(),
            KeyCode::Char('s') | KeyCode::Char('S') => self.profile_state.load_sample_data(),
            KeyCode::Char(c) => form.input_char(c),
            KeyCode::Backspace => form.delete_char(),
            KeyCode::Delete => form.clear_field(),
            KeyCode::Enter => self.submit_profile(),
            _ => {}
        }
    }

    fn submit_profile(&mut self) {
        let result = self
            .profile_state
            .to_input()
            .and_then(|input| self.screening.check(&input).map_err(|e| e.to_string()));

        match result {
            Ok(profile) => {
                self.profile_state.outcome = Some(profile);
                self.profile_state.form.error_message = None;
            }
            Err(message) => {
                self.profile_state.outcome = None;
                self.profile_state.form.error_message = Some(message);
            }
        }
    }

    fn load_dataset(&mut self, reload: bool) {
        let path = self.config.data_path.clone();
        let loaded = if reload {
            self.datasets.reload(&path)
        } else {
            self.datasets.open(&path)
        };

        self.dataset = loaded.map_err(|e| {
            tracing::error!("Failed to load dataset: {}", e);
            match e {
                GlycoscopeError::Dataset(DatasetError::NotFound(_)) => format!(
                    "Data file not found. Please ensure '{}' exists or set GLYCOSCOPE_DATA_PATH.",
                    path.display()
                ),
                other => other.to_string(),
            }
        });
    }
}
