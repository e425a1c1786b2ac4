//! TUI rendering module.
//!
//! This module handles all visual rendering using ratatui:
//! - Localized header and analysis tabs
//! - Sidebar with the API key, language and service status
//! - The form of the active tab, with a colored sequence preview
//! - Results panel and status bar
//! - Help overlay

mod glyphs;

pub use glyphs::{select as select_glyphs, Glyphs};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::i18n::Msg;
use crate::model::{AppMode, AppState, Field, Phase, Tab};
use crate::present::{group_thousands, to_display};
use crate::validate::{clean_sequence, MIN_SEQUENCE_LENGTH};

/// Height of the title header.
const HEADER_HEIGHT: u16 = 2;
/// Height of the tab bar (including borders).
const TABS_HEIGHT: u16 = 3;
/// Width of the settings sidebar (including borders).
const SIDEBAR_WIDTH: u16 = 32;
/// Height of the status bar.
const STATUS_BAR_HEIGHT: u16 = 1;
/// Maximum number of masked characters shown for the API key.
const MASK_WIDTH: usize = 12;

/// Foreground colors for bases in the sequence preview.
pub trait ColorScheme {
    fn get_color(&self, c: char) -> Color;
}

/// DNA nucleotide color scheme.
pub struct DnaColorScheme;

impl ColorScheme for DnaColorScheme {
    fn get_color(&self, c: char) -> Color {
        match c.to_ascii_uppercase() {
            'A' => Color::Red,
            'C' => Color::Green,
            'G' => Color::Yellow,
            'T' => Color::Blue,
            _ => Color::DarkGray,
        }
    }
}

/// Renders the complete UI.
pub fn render(frame: &mut Frame, state: &AppState, glyphs: &Glyphs) {
    let area = frame.area();

    // Main layout: header + tabs + body + status bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(TABS_HEIGHT),
            Constraint::Min(5),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    // Split body: sidebar (left) + form and results (right)
    let body_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(main_layout[2]);

    let form_height = form_height(state.tab);
    let work_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(form_height), Constraint::Min(3)])
        .split(body_layout[1]);

    render_header(frame, state, main_layout[0]);
    render_tabs(frame, state, glyphs, main_layout[1]);
    render_sidebar(frame, state, glyphs, body_layout[0]);
    render_form(frame, state, glyphs, work_layout[0]);
    render_results(frame, state, glyphs, work_layout[1]);
    render_status_bar(frame, state, main_layout[3]);

    if state.show_help {
        render_help(frame, state, area);
    }
}

/// Rows needed by the form of a tab (including borders).
///
/// The settings fields live in the sidebar, the sequence field takes two
/// rows (preview and length indicator).
pub fn form_height(tab: Tab) -> u16 {
    let fields = tab.fields().iter().filter(|f| !is_setting(**f)).count() as u16;
    let extra = if tab == Tab::Sequence { 1 } else { 0 };
    fields + extra + 2
}

fn is_setting(field: Field) -> bool {
    matches!(field, Field::ApiKey | Field::Language)
}

fn render_header(frame: &mut Frame, state: &AppState, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            state.t(Msg::Title),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(state.t(Msg::Subtitle), Style::default().fg(Color::Gray))),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_tabs(frame: &mut Frame, state: &AppState, glyphs: &Glyphs, area: Rect) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| {
            let icon = match tab {
                Tab::Sequence => glyphs.sequence_tab,
                Tab::Variant => glyphs.variant_tab,
                Tab::Interval => glyphs.interval_tab,
            };
            Line::from(format!("{}: {}{}", tab.index() + 1, icon, state.t(tab.title())))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(state.tab.index())
        .highlight_style(
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

/// Style of a field label, highlighted when focused.
fn label_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Black).bg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

fn focus_prefix(focused: bool, glyphs: &Glyphs) -> String {
    if focused {
        format!("{} ", glyphs.focus)
    } else {
        " ".repeat(glyphs.focus.chars().count() + 1)
    }
}

fn render_sidebar(frame: &mut Frame, state: &AppState, glyphs: &Glyphs, area: Rect) {
    let inner_width = area.width.saturating_sub(2).max(1) as usize;
    let focused = state.focused_field();
    let editing = state.mode == AppMode::Insert;
    let mut lines: Vec<Line> = Vec::new();

    // API key
    let key_focused = focused == Field::ApiKey;
    lines.push(Line::from(vec![
        Span::raw(focus_prefix(key_focused, glyphs)),
        Span::styled(state.t(Msg::ApiKey), label_style(key_focused)),
    ]));
    let mut masked = mask_key(&state.api_key);
    if key_focused && editing {
        masked.push_str(glyphs.cursor);
    }
    lines.push(Line::from(format!("  {}", masked)));

    // Language
    let lang_focused = focused == Field::Language;
    lines.push(Line::from(vec![
        Span::raw(focus_prefix(lang_focused, glyphs)),
        Span::styled(state.t(Msg::Language), label_style(lang_focused)),
    ]));
    lines.push(Line::from(format!(
        "  {} {} {}",
        glyphs.choice_left,
        state.language.native_name(),
        glyphs.choice_right
    )));

    lines.push(Line::from(glyphs.h_separator.repeat(inner_width)));

    // Service status
    let (status, color) = if state.service_available {
        (format!("{} {}", glyphs.ok, state.t(Msg::ServiceReady)), Color::Green)
    } else {
        (format!("{} {}", glyphs.err, state.t(Msg::ClientNotConfigured)), Color::Red)
    };
    lines.push(Line::from(Span::styled(
        state.t(Msg::ServiceStatus),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for row in textwrap::wrap(&status, inner_width) {
        lines.push(Line::from(Span::styled(row.into_owned(), Style::default().fg(color))));
    }

    lines.push(Line::from(glyphs.h_separator.repeat(inner_width)));

    for row in textwrap::wrap(state.t(Msg::NonCommercial), inner_width) {
        lines.push(Line::from(Span::styled(row.into_owned(), Style::default().fg(Color::Yellow))));
    }

    if state.api_key.trim().is_empty() {
        lines.push(Line::from(""));
        for row in textwrap::wrap(state.t(Msg::ApiKeyHelp), inner_width) {
            let style = Style::default().fg(Color::DarkGray);
            lines.push(Line::from(Span::styled(row.into_owned(), style)));
        }
    }

    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_form(frame: &mut Frame, state: &AppState, glyphs: &Glyphs, area: Rect) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let focused = state.focused_field();
    let editing = state.mode == AppMode::Insert;
    let mut lines: Vec<Line> = Vec::new();

    for field in state.tab.fields().iter().copied().filter(|f| !is_setting(*f)) {
        let is_focused = field == focused;
        let label = format!("{}: ", state.t(field.label()));
        let mut spans = vec![
            Span::raw(focus_prefix(is_focused, glyphs)),
            Span::styled(label, label_style(is_focused)),
        ];

        if field == Field::Sequence {
            let used = spans_width(&spans);
            let room = inner_width.saturating_sub(used + glyphs.cursor.chars().count());
            spans.extend(sequence_preview(state, room));
            if is_focused && editing {
                spans.push(Span::raw(glyphs.cursor));
            }
            lines.push(Line::from(spans));
            lines.push(length_indicator(state, state.sequence.cleaned_length(), glyphs));
            continue;
        }

        let mut value = field_value(state, field);
        if field.is_text() {
            if is_focused && editing {
                value.push_str(glyphs.cursor);
            }
        } else {
            value = format!("{} {} {}", glyphs.choice_left, value, glyphs.choice_right);
        }
        spans.push(Span::raw(value));
        lines.push(Line::from(spans));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(state.t(state.tab.title()));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn spans_width(spans: &[Span]) -> usize {
    spans.iter().map(|s| s.content.chars().count()).sum()
}

/// Displayed value of a non-sequence form field.
fn field_value(state: &AppState, field: Field) -> String {
    let lang = state.language;
    let target = state.target();
    match field {
        Field::ApiKey => mask_key(&state.api_key),
        Field::Language => lang.native_name().to_string(),
        Field::Sequence => clean_sequence(&state.sequence.text),
        Field::Organism => lang.organism(target.organism).to_string(),
        Field::Tissue => {
            format!("{} ({})", lang.tissue(target.tissue), target.tissue.ontology_term())
        }
        Field::OutputType => lang.output_type(target.output).to_string(),
        Field::Chromosome => match state.tab {
            Tab::Interval => state.interval.chromosome.to_string(),
            _ => state.variant.chromosome.to_string(),
        },
        Field::Position => state.variant.position.clone(),
        Field::Reference => state.variant.reference.to_string(),
        Field::Alternate => state.variant.alternate.to_string(),
        Field::Start => state.interval.start.clone(),
        Field::End => state.interval.end.clone(),
    }
}

/// Colored preview of the start of the sequence, fitted to `width` columns.
fn sequence_preview(state: &AppState, width: usize) -> Vec<Span<'static>> {
    let cleaned = clean_sequence(&state.sequence.text);
    if cleaned.is_empty() {
        return vec![Span::styled(
            state.t(Msg::SequencePlaceholder),
            Style::default().fg(Color::DarkGray),
        )];
    }

    let scheme = DnaColorScheme;
    let (shown, truncated) = truncate_preview(&cleaned, width);
    let mut spans: Vec<Span> = shown
        .chars()
        .map(|c| Span::styled(c.to_string(), Style::default().fg(scheme.get_color(c))))
        .collect();
    if truncated {
        spans.push(Span::styled("...", Style::default().fg(Color::DarkGray)));
    }
    spans
}

/// Cuts `text` to fit `width` columns, leaving room for an ellipsis.
pub fn truncate_preview(text: &str, width: usize) -> (&str, bool) {
    let count = text.chars().count();
    if count <= width {
        return (text, false);
    }
    let keep = width.saturating_sub(3);
    let end = text.char_indices().nth(keep).map(|(i, _)| i).unwrap_or(text.len());
    (&text[..end], true)
}

/// `Sequence Length: 16,384 bp ✓` when long enough, followed by the
/// minimum length warning otherwise.
fn length_indicator(state: &AppState, length: usize, glyphs: &Glyphs) -> Line<'static> {
    let ok = length >= MIN_SEQUENCE_LENGTH;
    let (mark, color) = if ok { (glyphs.ok, Color::Green) } else { (glyphs.err, Color::Yellow) };
    let mut text = format!(
        "    {}: {} bp {}",
        state.t(Msg::SequenceLength),
        group_thousands(length),
        mark
    );
    if !ok {
        text.push_str(&format!(" - {}", state.t(Msg::MinLengthWarning)));
    }
    Line::from(Span::styled(text, Style::default().fg(color)))
}

/// Shows at most [`MASK_WIDTH`] asterisks, never the key itself.
pub fn mask_key(key: &str) -> String {
    "*".repeat(key.trim().chars().count().min(MASK_WIDTH))
}

fn render_results(frame: &mut Frame, state: &AppState, glyphs: &Glyphs, area: Rect) {
    let lines: Vec<Line> = match &state.phase {
        Phase::Idle => vec![Line::from(Span::styled(
            state.t(Msg::NoResults),
            Style::default().fg(Color::DarkGray),
        ))],
        Phase::Validating | Phase::Submitting => vec![Line::from(Span::styled(
            state.t(Msg::Analyzing),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))],
        Phase::Displaying(outcome) => {
            let rendered = to_display(outcome, state.language);
            if rendered.success {
                let mut lines = vec![Line::from(Span::styled(
                    format!("{} {}", glyphs.ok, rendered.headline),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ))];
                lines.extend(rendered.body.lines().map(|l| Line::from(l.to_string())));
                lines
            } else {
                vec![Line::from(Span::styled(
                    format!("{} {}", glyphs.err, rendered.headline),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ))]
            }
        }
    };

    let block = Block::default().borders(Borders::ALL).title(state.t(Msg::Results));
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Renders the status bar at the bottom.
fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let (mode_str, command_str) = match &state.mode {
        AppMode::Normal => ("NORMAL", String::new()),
        AppMode::Insert => ("INSERT", String::new()),
        AppMode::Command(cmd) => ("COMMAND", format!(":{}", cmd)),
    };

    let tab_info = format!("{} | {} ", state.t(state.tab.title()), state.language.code());

    // Show status message if present
    let message = state.status_message.as_deref().unwrap_or("");

    let left_content = if command_str.is_empty() {
        format!(" {} | {} ", mode_str, message)
    } else {
        format!(" {} | {} ", mode_str, command_str)
    };

    let left_len = left_content.chars().count();
    let right_len = tab_info.chars().count();
    let status_line = Line::from(vec![
        Span::styled(left_content, Style::default().fg(Color::Black).bg(Color::Cyan)),
        Span::styled(
            " ".repeat((area.width as usize).saturating_sub(left_len + right_len)),
            Style::default().bg(Color::Cyan),
        ),
        Span::styled(
            tab_info,
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(Paragraph::new(status_line), area);
}

const HELP_LINES: &[(&str, Msg)] = &[
    ("j/k", Msg::HelpFields),
    ("h/l", Msg::HelpChoices),
    ("i, Enter", Msg::HelpEdit),
    ("1/2/3, Tab", Msg::HelpTabs),
    ("r", Msg::HelpAnalyze),
    ("e", Msg::HelpExample),
    ("c", Msg::HelpClear),
    ("w", Msg::HelpSave),
    ("L", Msg::HelpLanguage),
    (":key KEY", Msg::HelpKey),
    (":w [file]", Msg::HelpSaveAs),
    (":e file", Msg::HelpLoad),
    (":lang tr|en", Msg::HelpSetLanguage),
    (":q", Msg::HelpQuit),
];

fn render_help(frame: &mut Frame, state: &AppState, area: Rect) {
    let popup = centered_rect(60, 70, area);
    let lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|&(keys, what)| {
            let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
            Line::from(vec![
                Span::styled(format!("{:<14}", keys), key_style),
                Span::raw(state.t(what)),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} - {}", state.t(Msg::Title), state.t(Msg::Help)));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// A rectangle of the given percentage size centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::i18n::Language;
    use crate::model::example_sequence;
    use crate::outcome::AnalysisOutcome;

    fn draw(state: &AppState) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let glyphs = select_glyphs(false);
        terminal.draw(|frame| render(frame, state, &glyphs)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_dna_colors() {
        let scheme = DnaColorScheme;
        assert_eq!(scheme.get_color('A'), Color::Red);
        assert_eq!(scheme.get_color('a'), Color::Red); // Case insensitive
        assert_eq!(scheme.get_color('T'), Color::Blue);
        assert_eq!(scheme.get_color('N'), Color::DarkGray);
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key(""), "");
        assert_eq!(mask_key("abc"), "***");
        assert_eq!(mask_key("a-very-long-secret-key"), "*".repeat(MASK_WIDTH));
    }

    #[test]
    fn test_truncate_preview() {
        assert_eq!(truncate_preview("ACGT", 10), ("ACGT", false));
        assert_eq!(truncate_preview("ACGTACGTACGT", 8), ("ACGTA", true));
    }

    #[test]
    fn test_form_height() {
        // 4 fields + length indicator + borders
        assert_eq!(form_height(Tab::Sequence), 7);
        assert_eq!(form_height(Tab::Variant), 9);
        assert_eq!(form_height(Tab::Interval), 8);
    }

    #[test]
    fn test_render_never_shows_key() {
        let mut state = AppState::new(Language::En, false);
        state.api_key = "super-secret".to_string();
        let screen = draw(&state);
        assert!(!screen.contains("super-secret"));
        assert!(screen.contains("Sequence Analysis"));
    }

    #[test]
    fn test_render_length_indicator() {
        let mut state = AppState::new(Language::En, true);
        state.sequence.text = example_sequence();
        let screen = draw(&state);
        assert!(screen.contains("Sequence Length: 16,384 bp [ok]"));
        assert!(!screen.contains("Minimum 16,384"));

        state.sequence.text = "ACGT".to_string();
        let screen = draw(&state);
        assert!(screen.contains("Sequence Length: 4 bp"));
        assert!(screen.contains("Minimum 16,384 base pairs required"));
    }

    #[test]
    fn test_render_help_in_turkish() {
        let mut state = AppState::new(Language::Tr, true);
        state.show_help = true;
        let screen = draw(&state);
        assert!(screen.contains("Yardım"));
        assert!(screen.contains("analiz et"));
        assert!(!screen.contains("toggle language"));
    }

    #[test]
    fn test_render_failure() {
        let mut state = AppState::new(Language::En, true);
        state.display(AnalysisOutcome::failure("quota exceeded"));
        let screen = draw(&state);
        assert!(screen.contains("Error: quota exceeded"));
    }
}
