//! Session state for the analysis front-end.
//!
//! This module contains all data structures for representing:
//! - The three analysis forms (sequence, variant, interval)
//! - Field focus and input modes
//! - The analysis phase (idle, validating, submitting, displaying)
//! - Application state for one session
//!
//! State changes are plain methods on [`AppState`]. Talking to the
//! prediction service is left to the controller.

use std::path::{Path, PathBuf};

use crate::fasta::load_sequence_file;
use crate::genome::{
    parse_coordinate, Base, Chromosome, Interval, IntervalQuery, Organism, OutputType, Query,
    SequenceQuery, Target, Tissue, Variant, VariantQuery,
};
use crate::i18n::{Language, Msg};
use crate::outcome::AnalysisOutcome;
use crate::present::{self, group_thousands};
use crate::validate::{clean_sequence, ValidationError};

/// Canned sequence loaded by "load example": 8192 A followed by 2048 TGCA.
pub fn example_sequence() -> String {
    let mut seq = "A".repeat(8192);
    seq.push_str(&"TGCA".repeat(2048));
    seq
}

const EXAMPLE_POSITION: u64 = 36_201_698;
const EXAMPLE_START: u64 = 35_677_410;
const EXAMPLE_END: u64 = 36_725_986;

/// The analysis kinds, one tab each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Sequence,
    Variant,
    Interval,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Sequence, Tab::Variant, Tab::Interval];

    pub fn index(self) -> usize {
        match self {
            Tab::Sequence => 0,
            Tab::Variant => 1,
            Tab::Interval => 2,
        }
    }

    pub fn title(self) -> Msg {
        match self {
            Tab::Sequence => Msg::SequenceAnalysis,
            Tab::Variant => Msg::VariantAnalysis,
            Tab::Interval => Msg::IntervalAnalysis,
        }
    }

    /// Fields in focus order. The settings fields come first on every tab.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Tab::Sequence => &[
                Field::ApiKey,
                Field::Language,
                Field::Sequence,
                Field::Organism,
                Field::Tissue,
                Field::OutputType,
            ],
            Tab::Variant => &[
                Field::ApiKey,
                Field::Language,
                Field::Chromosome,
                Field::Position,
                Field::Reference,
                Field::Alternate,
                Field::Organism,
                Field::Tissue,
                Field::OutputType,
            ],
            Tab::Interval => &[
                Field::ApiKey,
                Field::Language,
                Field::Chromosome,
                Field::Start,
                Field::End,
                Field::Organism,
                Field::Tissue,
                Field::OutputType,
            ],
        }
    }

    fn from_name(name: &str) -> Option<Tab> {
        match name {
            "1" | "seq" | "sequence" => Some(Tab::Sequence),
            "2" | "var" | "variant" => Some(Tab::Variant),
            "3" | "int" | "interval" => Some(Tab::Interval),
            _ => None,
        }
    }
}

/// An input widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ApiKey,
    Language,
    Sequence,
    Organism,
    Tissue,
    OutputType,
    Chromosome,
    Position,
    Reference,
    Alternate,
    Start,
    End,
}

impl Field {
    /// Whether the field takes typed text (as opposed to cycling choices).
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Field::ApiKey | Field::Sequence | Field::Position | Field::Start | Field::End
        )
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Field::Position | Field::Start | Field::End)
    }

    pub fn label(self) -> Msg {
        match self {
            Field::ApiKey => Msg::ApiKey,
            Field::Language => Msg::Language,
            Field::Sequence => Msg::Sequence,
            Field::Organism => Msg::Organism,
            Field::Tissue => Msg::Tissue,
            Field::OutputType => Msg::OutputType,
            Field::Chromosome => Msg::Chromosome,
            Field::Position => Msg::Position,
            Field::Reference => Msg::Reference,
            Field::Alternate => Msg::Alternate,
            Field::Start => Msg::Start,
            Field::End => Msg::End,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SequenceForm {
    /// Raw text as typed or pasted, whitespace included
    pub text: String,
    pub target: Target,
}

impl SequenceForm {
    /// Length once whitespace is stripped.
    pub fn cleaned_length(&self) -> usize {
        self.text.chars().filter(|c| !c.is_whitespace()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantForm {
    pub chromosome: Chromosome,
    pub position: String,
    pub reference: Base,
    pub alternate: Base,
    pub target: Target,
}

impl Default for VariantForm {
    fn default() -> Self {
        Self {
            chromosome: Chromosome::default(),
            position: EXAMPLE_POSITION.to_string(),
            reference: Base::A,
            alternate: Base::T,
            target: Target::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalForm {
    pub chromosome: Chromosome,
    pub start: String,
    pub end: String,
    pub target: Target,
}

impl Default for IntervalForm {
    fn default() -> Self {
        Self {
            chromosome: Chromosome::default(),
            start: EXAMPLE_START.to_string(),
            end: EXAMPLE_END.to_string(),
            target: Target::default(),
        }
    }
}

/// Input mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Field navigation
    #[default]
    Normal,
    /// Typing into the focused text field
    Insert,
    /// Command input mode (after pressing ':')
    Command(String),
}

/// Where the current analyze action stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Displaying(AnalysisOutcome),
}

impl Phase {
    pub fn outcome(&self) -> Option<&AnalysisOutcome> {
        match self {
            Phase::Displaying(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// The complete state of one session.
#[derive(Debug)]
pub struct AppState {
    /// Interface language
    pub language: Language,
    /// API key used for every analysis of this session
    pub api_key: String,
    /// Active tab
    pub tab: Tab,
    /// Index of the focused field in `tab.fields()`
    pub focus: usize,
    pub sequence: SequenceForm,
    pub variant: VariantForm,
    pub interval: IntervalForm,
    /// Current input mode
    pub mode: AppMode,
    /// Analysis phase
    pub phase: Phase,
    /// Whether the prediction service can be reached at all
    pub service_available: bool,
    /// Whether the help overlay is shown
    pub show_help: bool,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Status message to display
    pub status_message: Option<String>,
    /// Set by the analyze action, consumed by the controller
    analysis_requested: bool,
}

impl AppState {
    pub fn new(language: Language, service_available: bool) -> Self {
        Self {
            language,
            api_key: String::new(),
            tab: Tab::default(),
            focus: 0,
            sequence: SequenceForm::default(),
            variant: VariantForm::default(),
            interval: IntervalForm::default(),
            mode: AppMode::Normal,
            phase: Phase::Idle,
            service_available,
            show_help: false,
            should_quit: false,
            status_message: None,
            analysis_requested: false,
        }
    }

    /// Shorthand for a message in the session language.
    pub fn t(&self, msg: Msg) -> &'static str {
        self.language.t(msg)
    }

    pub fn focused_field(&self) -> Field {
        let fields = self.tab.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.tab.fields().len();
    }

    pub fn focus_prev(&mut self) {
        let len = self.tab.fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if tab != self.tab {
            self.tab = tab;
            self.focus = 0;
            self.mode = AppMode::Normal;
            self.phase = Phase::Idle;
        }
    }

    pub fn next_tab(&mut self) {
        self.select_tab(Tab::ALL[(self.tab.index() + 1) % Tab::ALL.len()]);
    }

    pub fn prev_tab(&mut self) {
        self.select_tab(Tab::ALL[(self.tab.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]);
    }

    /// Target (organism, tissue, output) of the active tab.
    pub fn target(&self) -> &Target {
        match self.tab {
            Tab::Sequence => &self.sequence.target,
            Tab::Variant => &self.variant.target,
            Tab::Interval => &self.interval.target,
        }
    }

    fn target_mut(&mut self) -> &mut Target {
        match self.tab {
            Tab::Sequence => &mut self.sequence.target,
            Tab::Variant => &mut self.variant.target,
            Tab::Interval => &mut self.interval.target,
        }
    }

    /// Selects the next (or previous) choice of the focused field.
    pub fn cycle_choice(&mut self, forward: bool) {
        match self.focused_field() {
            Field::Language => self.toggle_language(),
            Field::Organism => {
                let target = self.target_mut();
                target.organism = cycle(&Organism::ALL, target.organism, forward);
            }
            Field::Tissue => {
                let target = self.target_mut();
                target.tissue = cycle(&Tissue::ALL, target.tissue, forward);
            }
            Field::OutputType => {
                let target = self.target_mut();
                target.output = cycle(&OutputType::ALL, target.output, forward);
            }
            Field::Chromosome => {
                let chromosome = match self.tab {
                    Tab::Interval => &mut self.interval.chromosome,
                    _ => &mut self.variant.chromosome,
                };
                let step = if forward { 1 } else { Chromosome::COUNT - 1 };
                let next = (chromosome.index() + step) % Chromosome::COUNT;
                *chromosome = Chromosome::from_index(next).unwrap_or_default();
            }
            Field::Reference => {
                self.variant.reference = cycle(&Base::ALL, self.variant.reference, forward);
            }
            Field::Alternate => {
                self.variant.alternate = cycle(&Base::ALL, self.variant.alternate, forward);
            }
            Field::ApiKey | Field::Sequence | Field::Position | Field::Start | Field::End => {}
        }
    }

    /// Text buffer behind a text field.
    fn text_buffer_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::ApiKey => Some(&mut self.api_key),
            Field::Sequence => Some(&mut self.sequence.text),
            Field::Position => Some(&mut self.variant.position),
            Field::Start => Some(&mut self.interval.start),
            Field::End => Some(&mut self.interval.end),
            _ => None,
        }
    }

    /// Enters insert mode if the focused field takes text.
    pub fn enter_insert_mode(&mut self) {
        if self.focused_field().is_text() {
            self.mode = AppMode::Insert;
        }
    }

    pub fn leave_insert_mode(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Types a character into the focused field.
    pub fn insert_char(&mut self, c: char) {
        let field = self.focused_field();
        if field.is_numeric() && !c.is_ascii_digit() {
            return;
        }
        if c.is_control() {
            return;
        }
        if let Some(buffer) = self.text_buffer_mut(field) {
            buffer.push(c);
        }
    }

    pub fn insert_backspace(&mut self) {
        let field = self.focused_field();
        if let Some(buffer) = self.text_buffer_mut(field) {
            buffer.pop();
        }
    }

    /// Appends pasted text to the command line or the focused text field.
    pub fn paste(&mut self, text: &str) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            cmd.extend(text.chars().filter(|c| !c.is_control()));
            return;
        }
        let field = self.focused_field();
        if let Some(buffer) = self.text_buffer_mut(field) {
            match field {
                // Line breaks are meaningful whitespace in a pasted sequence
                Field::Sequence => buffer.push_str(text),
                f if f.is_numeric() => buffer.extend(text.chars().filter(|c| c.is_ascii_digit())),
                _ => buffer.extend(text.chars().filter(|c| !c.is_control())),
            }
        }
    }

    pub fn toggle_language(&mut self) {
        self.language = self.language.toggled();
    }

    /// Sets the canned input of the active tab.
    pub fn load_example(&mut self) {
        match self.tab {
            Tab::Sequence => self.sequence.text = example_sequence(),
            Tab::Variant => {
                self.variant.chromosome = Chromosome::autosome(22).unwrap_or_default();
                self.variant.position = EXAMPLE_POSITION.to_string();
                self.variant.reference = Base::A;
                self.variant.alternate = Base::C;
                self.variant.target.tissue = Tissue::Colon;
            }
            Tab::Interval => {
                self.interval.chromosome = Chromosome::autosome(22).unwrap_or_default();
                self.interval.start = EXAMPLE_START.to_string();
                self.interval.end = EXAMPLE_END.to_string();
                self.interval.target.tissue = Tissue::Colon;
            }
        }
        self.phase = Phase::Idle;
        self.status_message = Some(self.t(Msg::ExampleLoaded).to_string());
    }

    /// Resets the input of the active tab.
    pub fn clear(&mut self) {
        match self.tab {
            Tab::Sequence => self.sequence.text.clear(),
            Tab::Variant => self.variant = VariantForm::default(),
            Tab::Interval => self.interval = IntervalForm::default(),
        }
        self.phase = Phase::Idle;
        self.status_message = Some(self.t(Msg::Cleared).to_string());
    }

    /// Builds the query described by the active tab.
    pub fn current_query(&self) -> Result<Query, ValidationError> {
        match self.tab {
            Tab::Sequence => Ok(Query::Sequence(SequenceQuery {
                target: self.sequence.target,
                sequence: clean_sequence(&self.sequence.text),
            })),
            Tab::Variant => {
                let form = &self.variant;
                Ok(Query::Variant(VariantQuery {
                    target: form.target,
                    variant: Variant {
                        chromosome: form.chromosome,
                        position: parse_field("position", &form.position)?,
                        reference: form.reference,
                        alternate: form.alternate,
                    },
                }))
            }
            Tab::Interval => {
                let form = &self.interval;
                Ok(Query::Interval(IntervalQuery {
                    target: form.target,
                    interval: Interval::new(
                        form.chromosome,
                        parse_field("start", &form.start)?,
                        parse_field("end", &form.end)?,
                    ),
                }))
            }
        }
    }

    /// Marks that the user asked for an analysis.
    pub fn request_analysis(&mut self) {
        self.mode = AppMode::Normal;
        self.analysis_requested = true;
    }

    /// Returns and clears the pending analysis request.
    pub fn take_analysis_request(&mut self) -> bool {
        std::mem::take(&mut self.analysis_requested)
    }

    /// Records the outcome of an analysis.
    pub fn display(&mut self, outcome: AnalysisOutcome) {
        self.status_message = Some(match &outcome {
            AnalysisOutcome::Success(_) => self.t(Msg::Success).to_string(),
            AnalysisOutcome::Failure { message } => format!("{}: {}", self.t(Msg::Error), message),
        });
        self.phase = Phase::Displaying(outcome);
    }

    /// Writes the last successful result as JSON.
    ///
    /// Without a path the file is named after the analysis kind.
    pub fn save_result(&mut self, path: Option<&str>) {
        let message = match self.phase.outcome() {
            Some(outcome) => {
                let target = match (path, outcome.record()) {
                    (Some(p), _) => PathBuf::from(p),
                    (None, Some(record)) => PathBuf::from(present::download_filename(record)),
                    (None, None) => PathBuf::new(),
                };
                match present::save(outcome, &target) {
                    Ok(bytes) => format!(
                        "{}: {} ({} {})",
                        self.t(Msg::Saved),
                        target.display(),
                        group_thousands(bytes),
                        self.t(Msg::Bytes)
                    ),
                    Err(err) => err.localized(self.language),
                }
            }
            None => self.t(Msg::NoResults).to_string(),
        };
        self.status_message = Some(message);
    }

    /// Replaces the sequence text with the content of a FASTA or text file.
    ///
    /// Only the first record of a multi-record FASTA is used; the status
    /// shows `[1/N]` in that case.
    pub fn load_sequence(&mut self, path: &Path) {
        match load_sequence_file(path) {
            Ok(loaded) => {
                let length = loaded.data.len();
                self.sequence.text = loaded.data;
                self.select_tab(Tab::Sequence);
                self.phase = Phase::Idle;
                let name = loaded.id.unwrap_or_else(|| path.display().to_string());
                let mut message =
                    format!("{}: {} ({} bp)", self.t(Msg::Loaded), name, group_thousands(length));
                if loaded.record_count > 1 {
                    message.push_str(&format!(" [1/{}]", loaded.record_count));
                }
                self.status_message = Some(message);
            }
            Err(err) => self.status_message = Some(format!("{}: {}", self.t(Msg::Error), err)),
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn dismiss_help(&mut self) {
        self.show_help = false;
    }

    /// Enters command mode.
    pub fn enter_command_mode(&mut self) {
        self.mode = AppMode::Command(String::new());
    }

    /// Handles a character input in command mode.
    pub fn command_input(&mut self, c: char) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            cmd.push(c);
        }
    }

    /// Handles backspace in command mode.
    pub fn command_backspace(&mut self) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            cmd.pop();
            if cmd.is_empty() {
                self.mode = AppMode::Normal;
            }
        }
    }

    /// Executes the current command.
    pub fn execute_command(&mut self) {
        let cmd = match &self.mode {
            AppMode::Command(cmd) => cmd.trim().to_string(),
            _ => return,
        };
        self.mode = AppMode::Normal;

        let (name, arg) = match cmd.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
            None => (cmd.as_str(), None),
        };

        match (name, arg) {
            ("q" | "quit", _) => self.should_quit = true,
            ("h" | "help", _) => self.show_help = true,
            ("run" | "analyze", _) => self.request_analysis(),
            ("example", _) => self.load_example(),
            ("clear", _) => self.clear(),
            ("lang", None) => self.toggle_language(),
            ("lang", Some(code)) => match Language::from_code(code) {
                Some(lang) => self.language = lang,
                None => {
                    self.status_message =
                        Some(format!("{}: {}", self.t(Msg::UnknownLanguage), code))
                }
            },
            ("key", Some(key)) => {
                self.api_key = key.to_string();
                self.status_message = Some(format!("{}: ********", self.t(Msg::ApiKey)));
            }
            ("tab", Some(tab)) => match Tab::from_name(tab) {
                Some(tab) => self.select_tab(tab),
                None => {
                    self.status_message = Some(format!("{}: {}", self.t(Msg::UnknownTab), tab))
                }
            },
            ("w" | "write", path) => self.save_result(path),
            ("e" | "edit", Some(path)) => self.load_sequence(Path::new(path)),
            _ => {
                self.status_message = Some(format!("{}: {}", self.t(Msg::UnknownCommand), cmd))
            }
        }
    }

    /// Cancels command mode and returns to normal mode.
    pub fn cancel_command(&mut self) {
        self.mode = AppMode::Normal;
    }
}

fn parse_field(field: &'static str, value: &str) -> Result<u64, ValidationError> {
    parse_coordinate(value).map_err(|_| ValidationError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Returns the element after (or before) `current` in `all`, wrapping around.
fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let len = all.len();
    let index = all.iter().position(|x| *x == current).unwrap_or(0);
    let next = if forward { (index + 1) % len } else { (index + len - 1) % len };
    all[next]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::MIN_SEQUENCE_LENGTH;

    fn state() -> AppState {
        AppState::new(Language::En, true)
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::new(Language::Tr, false);
        assert_eq!(state.tab, Tab::Sequence);
        assert_eq!(state.focused_field(), Field::ApiKey);
        assert_eq!(state.phase, Phase::Idle);
        assert!(!state.service_available);
        assert!(state.sequence.text.is_empty());
    }

    #[test]
    fn test_example_sequence() {
        let seq = example_sequence();
        assert_eq!(seq.len(), MIN_SEQUENCE_LENGTH);
        assert!(seq.starts_with(&"A".repeat(8192)));
        assert!(seq.ends_with("TGCATGCA"));
    }

    #[test]
    fn test_focus_wraps() {
        let mut state = state();
        let len = Tab::Sequence.fields().len();
        state.focus_prev();
        assert_eq!(state.focus, len - 1);
        state.focus_next();
        assert_eq!(state.focus, 0);
    }

    #[test]
    fn test_tab_switch_resets_phase() {
        let mut state = state();
        state.display(AnalysisOutcome::failure("boom"));
        state.focus = 3;
        state.next_tab();
        assert_eq!(state.tab, Tab::Variant);
        assert_eq!(state.focus, 0);
        assert_eq!(state.phase, Phase::Idle);
        state.prev_tab();
        state.prev_tab();
        assert_eq!(state.tab, Tab::Interval);
    }

    #[test]
    fn test_cycle_choices() {
        let mut state = state();
        state.select_tab(Tab::Variant);
        state.focus = 2; // chromosome
        state.cycle_choice(false);
        assert_eq!(state.variant.chromosome, Chromosome::Y);
        state.cycle_choice(true);
        assert_eq!(state.variant.chromosome.to_string(), "chr1");

        state.focus = 5; // alternate
        state.cycle_choice(true);
        assert_eq!(state.variant.alternate, Base::G);

        state.focus = 7; // tissue
        state.cycle_choice(false);
        assert_eq!(state.variant.target.tissue, Tissue::Colon);
        // Other tabs keep their own target
        assert_eq!(state.sequence.target.tissue, Tissue::Lung);
    }

    #[test]
    fn test_language_field_toggles() {
        let mut state = state();
        state.focus = 1;
        state.cycle_choice(true);
        assert_eq!(state.language, Language::Tr);
    }

    #[test]
    fn test_insert_mode_editing() {
        let mut state = state();
        state.select_tab(Tab::Variant);
        state.focus = 3; // position
        state.enter_insert_mode();
        assert_eq!(state.mode, AppMode::Insert);

        state.variant.position.clear();
        for c in "12a3".chars() {
            state.insert_char(c);
        }
        assert_eq!(state.variant.position, "123");
        state.insert_backspace();
        assert_eq!(state.variant.position, "12");

        state.focus = 4; // reference is a choice
        state.leave_insert_mode();
        state.enter_insert_mode();
        assert_eq!(state.mode, AppMode::Normal);
    }

    #[test]
    fn test_paste_sequence_keeps_text() {
        let mut state = state();
        state.focus = 2;
        state.paste("ACGT\nACGT\n");
        assert_eq!(state.sequence.text, "ACGT\nACGT\n");
        assert_eq!(state.sequence.cleaned_length(), 8);
    }

    #[test]
    fn test_load_example_and_clear() {
        let mut state = state();
        state.load_example();
        assert_eq!(state.sequence.text, example_sequence());
        state.clear();
        assert!(state.sequence.text.is_empty());

        state.select_tab(Tab::Variant);
        state.load_example();
        let query = state.current_query().unwrap();
        match query {
            Query::Variant(q) => {
                assert_eq!(q.variant.to_string(), "chr22:36201698 A>C");
                assert_eq!(q.target.tissue, Tissue::Colon);
            }
            other => panic!("expected a variant query, got {:?}", other),
        }
        state.clear();
        assert_eq!(state.variant, VariantForm::default());
    }

    #[test]
    fn test_interval_example_query() {
        let mut state = state();
        state.select_tab(Tab::Interval);
        state.load_example();
        match state.current_query().unwrap() {
            Query::Interval(q) => assert_eq!(q.interval.to_string(), "chr22:35677410-36725986"),
            other => panic!("expected an interval query, got {:?}", other),
        }
    }

    #[test]
    fn test_current_query_rejects_bad_numbers() {
        let mut state = state();
        state.select_tab(Tab::Interval);
        state.interval.start = String::new();
        assert!(matches!(
            state.current_query(),
            Err(ValidationError::InvalidNumber { field: "start", .. })
        ));
    }

    #[test]
    fn test_sequence_query_is_cleaned() {
        let mut state = state();
        state.sequence.text = "AC GT\nNN".to_string();
        match state.current_query().unwrap() {
            Query::Sequence(q) => assert_eq!(q.sequence, "ACGTNN"),
            other => panic!("expected a sequence query, got {:?}", other),
        }
    }

    #[test]
    fn test_commands() {
        let mut state = state();
        for (cmd, check) in [
            ("lang tr", Language::Tr),
            ("lang", Language::En),
        ] {
            state.enter_command_mode();
            for c in cmd.chars() {
                state.command_input(c);
            }
            state.execute_command();
            assert_eq!(state.language, check);
        }

        state.mode = AppMode::Command("key secret-123".to_string());
        state.execute_command();
        assert_eq!(state.api_key, "secret-123");
        assert!(!state.status_message.as_deref().unwrap_or("").contains("secret"));

        state.mode = AppMode::Command("tab var".to_string());
        state.execute_command();
        assert_eq!(state.tab, Tab::Variant);

        state.mode = AppMode::Command("run".to_string());
        state.execute_command();
        assert!(state.take_analysis_request());
        assert!(!state.take_analysis_request());

        state.mode = AppMode::Command("frobnicate".to_string());
        state.execute_command();
        assert_eq!(state.status_message.as_deref(), Some("Unknown command: frobnicate"));

        state.language = Language::Tr;
        state.mode = AppMode::Command("tab genes".to_string());
        state.execute_command();
        assert_eq!(state.status_message.as_deref(), Some("Bilinmeyen sekme: genes"));
        state.language = Language::En;

        state.mode = AppMode::Command("q".to_string());
        state.execute_command();
        assert!(state.should_quit);
    }

    #[test]
    fn test_save_without_result() {
        let mut state = state();
        state.save_result(None);
        assert_eq!(state.status_message.as_deref(), Some("No results yet"));

        state.display(AnalysisOutcome::failure("boom"));
        state.save_result(Some("ignored.json"));
        assert!(state
            .status_message
            .as_deref()
            .unwrap_or("")
            .starts_with("Nothing to export"));
    }

    #[test]
    fn test_load_sequence_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.fa");
        std::fs::write(&path, ">region\nACGT\nACGT\n").unwrap();

        let mut state = state();
        state.select_tab(Tab::Interval);
        state.load_sequence(&path);
        assert_eq!(state.tab, Tab::Sequence);
        assert_eq!(state.sequence.text, "ACGTACGT");
        assert_eq!(state.status_message.as_deref(), Some("Loaded: region (8 bp)"));

        let multi = dir.path().join("multi.fa");
        std::fs::write(&multi, ">first\nACGT\n>second\nTTTT\n").unwrap();
        state.load_sequence(&multi);
        assert_eq!(state.sequence.text, "ACGT");
        assert_eq!(state.status_message.as_deref(), Some("Loaded: first (4 bp) [1/2]"));

        state.load_sequence(&dir.path().join("missing.fa"));
        assert!(state.status_message.as_deref().unwrap_or("").starts_with("Error"));
        assert_eq!(state.sequence.text, "ACGT");
    }
}
