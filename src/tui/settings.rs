//! Settings screen. Edits a draft copy of the settings; saving hands the
//! draft back to the app, cancelling drops it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::app::Transition;
use super::route::Route;
use super::ui::card;
use crate::models::{MeetingSettings, SettingKey, SettingValue, SettingsSection};

/// Width of the volume gauge in cells.
const GAUGE_WIDTH: usize = 20;

pub struct SettingsState {
    draft: MeetingSettings,
    selected: usize,
}

impl SettingsState {
    pub const HINTS: &'static str =
        "Up/Down: select | Space/Enter: toggle | Left/Right: adjust | C-s: save | Esc: cancel";

    pub fn new(settings: MeetingSettings) -> Self {
        Self {
            draft: settings,
            selected: 0,
        }
    }

    fn selected_key(&self) -> SettingKey {
        SettingKey::ALL[self.selected]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Transition> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => {
                return Some(Transition::ApplySettings(Box::new(self.draft.clone())));
            }
            KeyCode::Esc => {
                tracing::debug!("Settings changes discarded");
                return Some(Transition::Goto(Route::Dashboard));
            }
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < SettingKey::ALL.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = SettingKey::ALL.len() - 1,
            KeyCode::Char(' ') | KeyCode::Enter => self.draft.activate(self.selected_key()),
            KeyCode::Left => self.draft.adjust(self.selected_key(), -1),
            KeyCode::Right => self.draft.adjust(self.selected_key(), 1),
            _ => {}
        }
        None
    }
}

fn gauge(level: u8) -> String {
    let filled = ((level as usize * GAUGE_WIDTH + 50) / 100).min(GAUGE_WIDTH);
    format!(
        "[{}{}] {:>3}",
        "#".repeat(filled),
        "-".repeat(GAUGE_WIDTH - filled),
        level
    )
}

fn value_span(value: SettingValue) -> Span<'static> {
    match value {
        SettingValue::Switch(true) => Span::styled("[on] ", Style::default().fg(Color::Green)),
        SettingValue::Switch(false) => {
            Span::styled("[off]", Style::default().fg(Color::DarkGray))
        }
        SettingValue::Level(level) => Span::styled(gauge(level), Style::default().fg(Color::Cyan)),
        SettingValue::Choice(label) => {
            Span::styled(format!("< {} >", label), Style::default().fg(Color::White))
        }
    }
}

/// All rows with section headings. Returns the lines and the line index of
/// the selected setting.
fn build_lines(state: &SettingsState) -> (Vec<Line<'static>>, usize) {
    let mut lines = Vec::new();
    let mut selected_line = 0;
    let mut section: Option<SettingsSection> = None;

    for (i, key) in SettingKey::ALL.iter().enumerate() {
        if section != Some(key.section()) {
            if section.is_some() {
                lines.push(Line::from(""));
            }
            section = Some(key.section());
            lines.push(Line::from(Span::styled(
                format!(" {}", key.section().title()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )));
        }

        let selected = i == state.selected;
        if selected {
            selected_line = lines.len();
        }
        let label_style = if selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(vec![
            Span::styled(if selected { " > " } else { "   " }, label_style),
            Span::styled(format!("{:<38}", key.label()), label_style),
            value_span(state.draft.value(*key)),
        ]));
    }
    (lines, selected_line)
}

pub fn render(area: Rect, frame: &mut Frame, state: &SettingsState) {
    let block = card("Meeting Settings");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (lines, selected_line) = build_lines(state);
    let height = inner.height as usize;
    // Keep the selection on screen.
    let scroll = (selected_line + 1).saturating_sub(height);
    frame.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), inner);
}
