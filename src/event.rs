//! Keyboard event handling.
//!
//! Normal mode:
//! - `j`/`k` (or arrows): focus next/previous field
//! - `h`/`l` (or arrows): previous/next choice of the focused field
//! - `i` or `Enter`: edit the focused text field (`Enter` on a choice cycles it)
//! - `1`/`2`/`3`, `Tab`/`Shift-Tab`: switch analysis tab
//! - `r`: analyze
//! - `e`: load example, `c`: clear
//! - `w`: save the last result as JSON
//! - `L`: toggle language
//! - `?`: help
//! - `:`: enter command mode
//!   - `:q` or `:quit`: quit the application
//!   - `:run`, `:example`, `:clear`, `:lang [tr|en]`, `:key <KEY>`
//!   - `:tab seq|var|int`, `:w [file]`, `:e <file>`
//!
//! Insert mode: typed characters go to the focused field, `Esc`/`Enter` leave.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::model::{AppMode, AppState, Tab};

/// Actions that can be triggered by user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action (key not recognized)
    None,
    /// Quit the application
    Quit,
    /// Focus the next field
    FocusNext,
    /// Focus the previous field
    FocusPrev,
    /// Select the next choice of the focused field
    ChoiceNext,
    /// Select the previous choice of the focused field
    ChoicePrev,
    /// Start editing the focused text field
    EnterInsert,
    /// Type a character into the focused field
    InsertChar(char),
    /// Delete the last character of the focused field
    InsertBackspace,
    /// Stop editing
    LeaveInsert,
    /// Bracketed paste
    Paste(String),
    /// Switch to a tab
    SelectTab(Tab),
    NextTab,
    PrevTab,
    /// Run the analysis of the active tab
    Analyze,
    /// Load the canned input of the active tab
    LoadExample,
    /// Reset the input of the active tab
    Clear,
    /// Save the last result as JSON
    SaveResult,
    /// Switch between Turkish and English
    ToggleLanguage,
    /// Show or hide the help overlay
    ToggleHelp,
    /// Dismiss the help overlay
    DismissHelp,
    /// Enter command mode
    EnterCommandMode,
    /// Add character to command buffer
    CommandChar(char),
    /// Execute current command
    ExecuteCommand,
    /// Cancel command mode
    CancelCommand,
    /// Backspace in command mode
    CommandBackspace,
    /// Resize event (terminal resized)
    Resize(u16, u16),
}

/// Polls for terminal events with a timeout.
///
/// Returns `None` if no event occurred within the timeout.
pub fn poll_event(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).ok()? {
        event::read().ok()
    } else {
        None
    }
}

/// Converts a crossterm event to an Action based on current app mode.
pub fn handle_event(event: Event, mode: &AppMode, show_help: bool, focus_is_text: bool) -> Action {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, mode, show_help, focus_is_text),
        Event::Paste(text) if !show_help => Action::Paste(text),
        Event::Resize(width, height) => Action::Resize(width, height),
        _ => Action::None,
    }
}

/// Handles a key event based on the current application mode.
fn handle_key_event(key: KeyEvent, mode: &AppMode, show_help: bool, focus_is_text: bool) -> Action {
    // Key release/repeat events are reported on some platforms
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    // If help is shown, any key dismisses it
    if show_help {
        return Action::DismissHelp;
    }

    match mode {
        AppMode::Normal => handle_normal_mode(key, focus_is_text),
        AppMode::Insert => handle_insert_mode(key),
        AppMode::Command(_) => handle_command_mode(key),
    }
}

/// Handles key events in normal mode.
fn handle_normal_mode(key: KeyEvent, focus_is_text: bool) -> Action {
    // Handle Ctrl+C for emergency quit
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Action::FocusNext,
        KeyCode::Char('k') | KeyCode::Up => Action::FocusPrev,
        KeyCode::Char('l') | KeyCode::Right => Action::ChoiceNext,
        KeyCode::Char('h') | KeyCode::Left => Action::ChoicePrev,

        KeyCode::Char('i') if focus_is_text => Action::EnterInsert,
        KeyCode::Enter if focus_is_text => Action::EnterInsert,
        KeyCode::Enter => Action::ChoiceNext,

        KeyCode::Char('1') => Action::SelectTab(Tab::Sequence),
        KeyCode::Char('2') => Action::SelectTab(Tab::Variant),
        KeyCode::Char('3') => Action::SelectTab(Tab::Interval),
        KeyCode::Tab => Action::NextTab,
        KeyCode::BackTab => Action::PrevTab,

        KeyCode::Char('r') => Action::Analyze,
        KeyCode::Char('e') => Action::LoadExample,
        KeyCode::Char('c') => Action::Clear,
        KeyCode::Char('w') => Action::SaveResult,
        KeyCode::Char('L') => Action::ToggleLanguage,
        KeyCode::Char('?') => Action::ToggleHelp,

        // Command mode
        KeyCode::Char(':') => Action::EnterCommandMode,

        _ => Action::None,
    }
}

/// Handles key events while editing a text field.
fn handle_insert_mode(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::LeaveInsert;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Enter => Action::LeaveInsert,
        KeyCode::Backspace => Action::InsertBackspace,
        KeyCode::Char(c) => Action::InsertChar(c),
        _ => Action::None,
    }
}

/// Handles key events in command mode.
fn handle_command_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::ExecuteCommand,
        KeyCode::Esc => Action::CancelCommand,
        KeyCode::Backspace => Action::CommandBackspace,
        KeyCode::Char(c) => Action::CommandChar(c),
        _ => Action::None,
    }
}

/// Applies an action to the application state.
///
/// Returns `true` if the application should continue, `false` if it should quit.
pub fn apply_action(state: &mut AppState, action: Action) -> bool {
    match action {
        Action::None => {}
        Action::Quit => {
            state.should_quit = true;
        }
        Action::FocusNext => {
            state.focus_next();
        }
        Action::FocusPrev => {
            state.focus_prev();
        }
        Action::ChoiceNext => {
            state.cycle_choice(true);
        }
        Action::ChoicePrev => {
            state.cycle_choice(false);
        }
        Action::EnterInsert => {
            state.enter_insert_mode();
        }
        Action::InsertChar(c) => {
            state.insert_char(c);
        }
        Action::InsertBackspace => {
            state.insert_backspace();
        }
        Action::LeaveInsert => {
            state.leave_insert_mode();
        }
        Action::Paste(text) => {
            state.paste(&text);
        }
        Action::SelectTab(tab) => {
            state.select_tab(tab);
        }
        Action::NextTab => {
            state.next_tab();
        }
        Action::PrevTab => {
            state.prev_tab();
        }
        Action::Analyze => {
            state.request_analysis();
        }
        Action::LoadExample => {
            state.load_example();
        }
        Action::Clear => {
            state.clear();
        }
        Action::SaveResult => {
            state.save_result(None);
        }
        Action::ToggleLanguage => {
            state.toggle_language();
        }
        Action::ToggleHelp => {
            state.toggle_help();
        }
        Action::DismissHelp => {
            state.dismiss_help();
        }
        Action::EnterCommandMode => {
            state.enter_command_mode();
        }
        Action::CommandChar(c) => {
            state.command_input(c);
        }
        Action::ExecuteCommand => {
            state.execute_command();
        }
        Action::CancelCommand => {
            state.cancel_command();
        }
        Action::CommandBackspace => {
            state.command_backspace();
        }
        Action::Resize(_, _) => {
            // Layout is recomputed on every draw
        }
    }

    !state.should_quit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(code: KeyCode, mode: &AppMode, show_help: bool, focus_is_text: bool) -> Action {
        handle_key_event(key(code), mode, show_help, focus_is_text)
    }

    #[test]
    fn test_normal_mode_navigation() {
        let mode = AppMode::Normal;
        assert_eq!(press(KeyCode::Char('j'), &mode, false, false), Action::FocusNext);
        assert_eq!(press(KeyCode::Char('k'), &mode, false, false), Action::FocusPrev);
        assert_eq!(press(KeyCode::Char('l'), &mode, false, false), Action::ChoiceNext);
        assert_eq!(press(KeyCode::Char('h'), &mode, false, false), Action::ChoicePrev);
        assert_eq!(press(KeyCode::Down, &mode, false, false), Action::FocusNext);
    }

    #[test]
    fn test_enter_depends_on_focus() {
        let mode = AppMode::Normal;
        assert_eq!(press(KeyCode::Enter, &mode, false, true), Action::EnterInsert);
        assert_eq!(press(KeyCode::Enter, &mode, false, false), Action::ChoiceNext);
        assert_eq!(press(KeyCode::Char('i'), &mode, false, false), Action::None);
    }

    #[test]
    fn test_user_actions() {
        let mode = AppMode::Normal;
        assert_eq!(press(KeyCode::Char('r'), &mode, false, false), Action::Analyze);
        assert_eq!(press(KeyCode::Char('e'), &mode, false, false), Action::LoadExample);
        assert_eq!(press(KeyCode::Char('c'), &mode, false, false), Action::Clear);
        assert_eq!(press(KeyCode::Char('2'), &mode, false, false), Action::SelectTab(Tab::Variant));
        assert_eq!(press(KeyCode::Char('L'), &mode, false, false), Action::ToggleLanguage);
    }

    #[test]
    fn test_insert_mode_input() {
        let mode = AppMode::Insert;
        // Keys that are commands in normal mode are plain text here
        assert_eq!(press(KeyCode::Char('r'), &mode, false, true), Action::InsertChar('r'));
        assert_eq!(press(KeyCode::Backspace, &mode, false, true), Action::InsertBackspace);
        assert_eq!(press(KeyCode::Esc, &mode, false, true), Action::LeaveInsert);
    }

    #[test]
    fn test_command_mode_input() {
        let mode = AppMode::Command(String::new());
        assert_eq!(press(KeyCode::Char('q'), &mode, false, false), Action::CommandChar('q'));
        assert_eq!(press(KeyCode::Enter, &mode, false, false), Action::ExecuteCommand);
        assert_eq!(press(KeyCode::Esc, &mode, false, false), Action::CancelCommand);
    }

    #[test]
    fn test_ctrl_c_quit() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c, &AppMode::Normal, false, false), Action::Quit);
        assert_eq!(handle_key_event(ctrl_c, &AppMode::Insert, false, true), Action::LeaveInsert);
    }

    #[test]
    fn test_dismiss_help() {
        let mode = AppMode::Normal;
        assert_eq!(press(KeyCode::Char('x'), &mode, true, false), Action::DismissHelp);
        assert_eq!(press(KeyCode::Esc, &mode, true, false), Action::DismissHelp);
    }

    #[test]
    fn test_paste_event() {
        let event = Event::Paste("ACGT".to_string());
        let action = handle_event(event, &AppMode::Insert, false, true);
        assert_eq!(action, Action::Paste("ACGT".to_string()));
    }

    #[test]
    fn test_apply_typing_sequence() {
        let mut state = AppState::new(Language::En, true);
        state.focus = 2;
        apply_action(&mut state, Action::EnterInsert);
        for c in "ACGT".chars() {
            apply_action(&mut state, Action::InsertChar(c));
        }
        apply_action(&mut state, Action::LeaveInsert);
        assert_eq!(state.sequence.text, "ACGT");
        assert_eq!(state.mode, AppMode::Normal);

        assert!(!apply_action(&mut state, Action::Quit));
    }
}
