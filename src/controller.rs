//! Application controller.
//!
//! This module orchestrates the main application loop:
//! - Terminal initialization and cleanup
//! - Event polling and handling
//! - Running analyses against the prediction service
//! - State updates and rendering
//!
//! Service calls are blocking. While one runs, a frame showing the
//! submitting phase is drawn and input is not read.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};

use crate::client::{self, ClientFactory};
use crate::event::{apply_action, handle_event, poll_event};
use crate::genome::Query;
use crate::i18n::{Language, Msg};
use crate::model::{AppState, Phase};
use crate::outcome::{AnalysisError, AnalysisOutcome, AnalysisRecord};
use crate::request::{PredictionRequest, RequestBuilder};
use crate::ui::{render, Glyphs};
use crate::validate::{validate_api_key, validate_query};

/// Turns validated queries into service calls.
///
/// Without a factory the service capability is absent and every analysis
/// fails with a "not configured" message.
pub struct Analyzer {
    factory: Option<Box<dyn ClientFactory>>,
    builder: RequestBuilder,
}

impl Analyzer {
    pub fn new(factory: Option<Box<dyn ClientFactory>>, builder: RequestBuilder) -> Self {
        Self { factory, builder }
    }

    pub fn is_available(&self) -> bool {
        self.factory.is_some()
    }

    /// Checks the key and the query, then builds the request.
    pub fn prepare(
        &self,
        api_key: &str,
        query: &Query,
    ) -> Result<PredictionRequest, AnalysisError> {
        debug!(kind = query.kind(), "Validating query");
        validate_api_key(api_key)?;
        validate_query(query)?;
        if self.factory.is_none() {
            return Err(AnalysisError::ServiceUnavailable);
        }
        Ok(self.builder.build(query))
    }

    /// Sends a prepared request.
    pub fn submit(
        &self,
        api_key: &str,
        request: &PredictionRequest,
    ) -> Result<AnalysisRecord, AnalysisError> {
        match &self.factory {
            Some(factory) => client::submit(factory.as_ref(), api_key, request),
            None => Err(AnalysisError::ServiceUnavailable),
        }
    }

    /// Sends a prepared request and folds any error into a localized failure.
    pub fn analyze(
        &self,
        api_key: &str,
        request: &PredictionRequest,
        lang: Language,
    ) -> AnalysisOutcome {
        match self.submit(api_key, request) {
            Ok(record) => AnalysisOutcome::Success(record),
            Err(err) => err.into_outcome(lang),
        }
    }
}

/// Runs the analysis of the active tab to completion.
///
/// `on_submitting` is called once the request is built and before the
/// blocking call starts, so the caller can draw the submitting phase.
pub fn run_analysis<F>(
    state: &mut AppState,
    analyzer: &Analyzer,
    mut on_submitting: F,
) -> Result<()>
where
    F: FnMut(&AppState) -> Result<()>,
{
    state.phase = Phase::Validating;
    let lang = state.language;
    let api_key = state.api_key.trim().to_string();

    let prepared = validate_api_key(&api_key)
        .map_err(AnalysisError::from)
        .and_then(|_| state.current_query().map_err(AnalysisError::from))
        .and_then(|query| analyzer.prepare(&api_key, &query));

    let request = match prepared {
        Ok(request) => request,
        Err(err) => {
            debug!("Analysis rejected before submission: {}", err);
            state.display(err.into_outcome(lang));
            return Ok(());
        }
    };

    state.phase = Phase::Submitting;
    state.status_message = Some(state.t(Msg::Analyzing).to_string());
    on_submitting(state)?;

    let outcome = analyzer.analyze(&api_key, &request, lang);
    info!("Analysis finished, success: {}", outcome.is_success());
    state.display(outcome);
    Ok(())
}

/// The main application controller.
pub struct App {
    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state
    state: AppState,
    analyzer: Analyzer,
    glyphs: Glyphs,
    /// Event poll timeout
    tick_rate: Duration,
}

impl App {
    /// Creates a new application with the given state.
    pub fn new(state: AppState, analyzer: Analyzer, glyphs: Glyphs) -> Result<Self> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            state,
            analyzer,
            glyphs,
            tick_rate: Duration::from_millis(50),
        })
    }

    /// Runs the main application loop.
    pub fn run(&mut self) -> Result<()> {
        loop {
            // Render
            let glyphs = &self.glyphs;
            let state = &self.state;
            self.terminal.draw(|frame| {
                render(frame, state, glyphs);
            })?;

            // Handle events
            if let Some(event) = poll_event(self.tick_rate) {
                let focus_is_text = self.state.focused_field().is_text();
                let action =
                    handle_event(event, &self.state.mode, self.state.show_help, focus_is_text);

                apply_action(&mut self.state, action);

                if self.state.take_analysis_request() {
                    self.analyze()?;
                }

                if self.state.should_quit {
                    break;
                }
            }
        }

        Ok(())
    }

    fn analyze(&mut self) -> Result<()> {
        let terminal = &mut self.terminal;
        let glyphs = &self.glyphs;
        run_analysis(&mut self.state, &self.analyzer, |state| {
            terminal.draw(|frame| render(frame, state, glyphs))?;
            Ok(())
        })
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableBracketedPaste,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

/// Convenience function to run the interactive front-end.
pub fn run_app(state: AppState, analyzer: Analyzer, glyphs: Glyphs) -> Result<()> {
    let mut app = App::new(state, analyzer, glyphs)?;
    app.run()
}
