//! Join screen: meeting id, display name and a camera preview.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::app::{MeetingEntry, Transition};
use super::input::{self, TextInput, FIELD_HEIGHT};
use super::route::Route;
use super::tiles;
use super::ui::card;
use crate::models::JoinRequest;
use crate::session::{JoinPreferences, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    MeetingId,
    DisplayName,
    RememberName,
    Preview,
}

impl Field {
    const ORDER: [Field; 4] = [
        Field::MeetingId,
        Field::DisplayName,
        Field::RememberName,
        Field::Preview,
    ];

    fn step(self, forward: bool) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let len = Self::ORDER.len();
        let next = if forward { idx + 1 } else { idx + len - 1 };
        Self::ORDER[next % len]
    }
}

pub struct JoinState {
    meeting_id: TextInput,
    display_name: TextInput,
    remember_name: bool,
    focus: Field,
    /// Backs the preview's microphone and camera buttons.
    pub session: SessionState,
}

impl JoinState {
    pub const HINTS: &'static str =
        "Tab: next field | Enter: join | Space: remember name | m/v: mic/camera (preview) | Esc: back";

    pub fn new(display_name: &str, preferences: JoinPreferences) -> Self {
        Self {
            meeting_id: TextInput::default(),
            display_name: TextInput::with_value(display_name),
            remember_name: true,
            focus: Field::MeetingId,
            session: SessionState::with_preferences(preferences),
        }
    }

    pub fn captures_text(&self) -> bool {
        matches!(self.focus, Field::MeetingId | Field::DisplayName)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Transition> {
        match key.code {
            KeyCode::Esc => return Some(Transition::Goto(Route::Dashboard)),
            KeyCode::Enter => return Some(self.submit()),
            KeyCode::Tab => {
                self.focus = self.focus.step(true);
                return None;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.step(false);
                return None;
            }
            _ => {}
        }

        match self.focus {
            Field::MeetingId => {
                self.meeting_id.handle_key(key);
            }
            Field::DisplayName => {
                self.display_name.handle_key(key);
            }
            Field::RememberName => {
                if key.code == KeyCode::Char(' ') {
                    self.remember_name = !self.remember_name;
                }
            }
            Field::Preview => match key.code {
                KeyCode::Char('m') => self.session.toggle_microphone(),
                KeyCode::Char('v') => self.session.toggle_camera(),
                _ => {}
            },
        }
        None
    }

    /// Validate the form and decide between the waiting room and the meeting.
    fn submit(&self) -> Transition {
        match JoinRequest::new(self.meeting_id.value(), self.display_name.value()) {
            Ok(req) => {
                let waiting = req.meeting_id.requires_waiting_room();
                let entry = MeetingEntry {
                    meeting_id: req.meeting_id,
                    display_name: req.display_name,
                    preferences: self.session.preferences(),
                    remember_name: self.remember_name,
                };
                if waiting {
                    Transition::EnterWaitingRoom(entry)
                } else {
                    Transition::EnterMeeting(entry)
                }
            }
            Err(e) => Transition::Error(e.to_string()),
        }
    }
}

pub fn render(area: Rect, frame: &mut Frame, state: &JoinState) {
    let [form_area, preview_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);

    let block = card("Join a Meeting");
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let [id_area, name_area, remember_area, _, tip_area] = Layout::vertical([
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    input::render_field(
        id_area,
        frame,
        &state.meeting_id,
        "Meeting ID",
        "Enter meeting ID or personal link name",
        state.focus == Field::MeetingId,
    );
    input::render_field(
        name_area,
        frame,
        &state.display_name,
        "Display Name",
        "Enter your name",
        state.focus == Field::DisplayName,
    );

    let check = if state.remember_name { "[x]" } else { "[ ]" };
    let remember_style = if state.focus == Field::RememberName {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {} Remember my name for future meetings", check),
            remember_style,
        ))),
        remember_area,
    );

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                " Try \"secure-meeting\" or \"wait-room\" to see the waiting room.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                " By joining you agree to the Terms of Service and Privacy Policy.",
                Style::default().fg(Color::DarkGray),
            )),
        ]),
        tip_area,
    );

    let preview_title = if state.focus == Field::Preview {
        "Preview (m/v active)"
    } else {
        "Preview"
    };
    let block = card(preview_title);
    let inner = block.inner(preview_area);
    frame.render_widget(block, preview_area);
    tiles::render_preview(
        inner,
        frame.buffer_mut(),
        state.display_name.value(),
        &state.session,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FormError, MeetingId};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(state: &mut JoinState, text: &str) {
        for c in text.chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn focus(state: &mut JoinState, field: Field) {
        while state.focus != field {
            state.handle_key(key(KeyCode::Tab));
        }
    }

    #[test]
    fn test_requires_meeting_id() {
        let mut state = JoinState::new("John Doe", JoinPreferences::default());
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            Some(Transition::Error(FormError::MissingMeetingId.to_string()))
        );
    }

    #[test]
    fn test_requires_display_name() {
        let mut state = JoinState::new("John Doe", JoinPreferences::default());
        type_str(&mut state, "123");
        focus(&mut state, Field::DisplayName);
        state.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            Some(Transition::Error(FormError::MissingDisplayName.to_string()))
        );
    }

    #[test]
    fn test_regular_id_goes_to_meeting() {
        let mut state = JoinState::new("John Doe", JoinPreferences::default());
        type_str(&mut state, "123-456");
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            Some(Transition::EnterMeeting(MeetingEntry {
                meeting_id: MeetingId::parse("123-456").unwrap(),
                display_name: "John Doe".to_string(),
                preferences: JoinPreferences::default(),
                remember_name: true,
            }))
        );
    }

    #[test]
    fn test_secure_id_goes_to_waiting_room() {
        let mut state = JoinState::new("John Doe", JoinPreferences::default());
        type_str(&mut state, "wait-room");
        assert!(matches!(
            state.handle_key(key(KeyCode::Enter)),
            Some(Transition::EnterWaitingRoom(_))
        ));
    }

    #[test]
    fn test_preview_toggles_only_when_focused() {
        let mut state = JoinState::new("John Doe", JoinPreferences::default());
        // Typed into the meeting id field instead.
        type_str(&mut state, "mv");
        assert!(!state.session.microphone_muted);
        assert_eq!(state.meeting_id.value(), "mv");

        focus(&mut state, Field::Preview);
        state.handle_key(key(KeyCode::Char('m')));
        state.handle_key(key(KeyCode::Char('v')));
        assert!(state.session.microphone_muted);
        assert!(!state.session.camera_enabled);

        focus(&mut state, Field::RememberName);
        state.handle_key(key(KeyCode::Char(' ')));
        match state.handle_key(key(KeyCode::Enter)) {
            Some(Transition::EnterMeeting(entry)) => {
                assert!(!entry.remember_name);
                assert_eq!(
                    entry.preferences,
                    JoinPreferences {
                        microphone_muted: true,
                        camera_enabled: false,
                    }
                );
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_field_cycle() {
        assert_eq!(Field::Preview.step(true), Field::MeetingId);
        assert_eq!(Field::MeetingId.step(false), Field::Preview);
        assert_eq!(Field::DisplayName.step(true), Field::RememberName);
    }
}
