//! Waiting room shown for protected meetings until the host admits the user.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::app::{MeetingEntry, Transition};
use super::route::Route;
use super::tiles;
use super::ui::card;
use crate::session::SessionState;

/// Seconds until the simulated host admits the user.
const ADMIT_AFTER_SECS: u64 = 10;

const HOST_MESSAGE: &str = "Please wait while the host admits you to the meeting.";
const PARTICIPANTS_WAITING: u32 = 3;

const TIPS: [&str; 4] = [
    "Test your audio and video settings",
    "Check your internet connection",
    "Prepare any materials you need",
    "The host will admit you shortly",
];

pub struct WaitingRoomState {
    entry: MeetingEntry,
    pub session: SessionState,
    waited_secs: u64,
}

impl WaitingRoomState {
    pub const HINTS: &'static str = "m: mic | v: camera | Enter: join once admitted | Esc: leave";

    pub fn new(entry: MeetingEntry) -> Self {
        Self {
            session: SessionState::with_preferences(entry.preferences),
            entry,
            waited_secs: 0,
        }
    }

    /// Called once per second.
    pub fn tick(&mut self) {
        self.waited_secs += 1;
        if self.waited_secs == ADMIT_AFTER_SECS {
            tracing::info!("Admitted to {}", self.entry.meeting_id);
        }
    }

    pub fn admitted(&self) -> bool {
        self.waited_secs >= ADMIT_AFTER_SECS
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Transition> {
        match key.code {
            KeyCode::Char('m') => self.session.toggle_microphone(),
            KeyCode::Char('v') => self.session.toggle_camera(),
            KeyCode::Enter if self.admitted() => {
                return Some(Transition::EnterMeeting(MeetingEntry {
                    preferences: self.session.preferences(),
                    ..self.entry.clone()
                }));
            }
            KeyCode::Esc => return Some(Transition::Goto(Route::Dashboard)),
            _ => {}
        }
        None
    }
}

/// "m:ss"
pub fn format_wait(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn render(area: Rect, frame: &mut Frame, state: &WaitingRoomState) {
    let [left, right] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);

    let [preview_area, switches_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(4)]).areas(left);

    let block = card("Preview");
    let inner = block.inner(preview_area);
    frame.render_widget(block, preview_area);
    tiles::render_preview(
        inner,
        frame.buffer_mut(),
        &state.entry.display_name,
        &state.session,
    );

    let block = card("Audio & Video Settings");
    let inner = block.inner(switches_area);
    frame.render_widget(block, switches_area);
    let switch = |label: &str, on: bool| {
        Line::from(vec![
            Span::styled(format!(" {:<28}", label), Style::default().fg(Color::Gray)),
            Span::styled(
                if on { "on" } else { "off" },
                Style::default().fg(if on { Color::Green } else { Color::DarkGray }),
            ),
        ])
    };
    frame.render_widget(
        Paragraph::new(vec![
            switch("Join with microphone muted", state.session.microphone_muted),
            switch("Join with camera off", !state.session.camera_enabled),
        ]),
        inner,
    );

    let admitted_height = if state.admitted() { 4 } else { 0 };
    let [status_area, info_area, tips_area, admitted_area] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(admitted_height),
    ])
    .areas(right);

    let block = card("Waiting Room");
    let inner = block.inner(status_area);
    frame.render_widget(block, status_area);
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                "Please wait",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from(Span::styled(HOST_MESSAGE, Style::default().fg(Color::Gray))).centered(),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "Waiting: {}    {} waiting",
                    format_wait(state.waited_secs),
                    PARTICIPANTS_WAITING
                ),
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
        ]),
        inner,
    );

    let block = card("Meeting Information");
    let inner = block.inner(info_area);
    frame.render_widget(block, info_area);
    let info = |label: &str, value: Span<'static>| {
        Line::from(vec![
            Span::styled(format!(" {:<12}", label), Style::default().fg(Color::Gray)),
            value,
        ])
    };
    frame.render_widget(
        Paragraph::new(vec![
            info(
                "Meeting ID:",
                Span::styled(
                    state.entry.meeting_id.to_string(),
                    Style::default().fg(Color::White),
                ),
            ),
            info(
                "Status:",
                Span::styled("Waiting for host", Style::default().fg(Color::Yellow)),
            ),
            info(
                "Security:",
                Span::styled("Protected", Style::default().fg(Color::Green)),
            ),
        ]),
        inner,
    );

    let block = card("While You Wait");
    let inner = block.inner(tips_area);
    frame.render_widget(block, tips_area);
    let tips: Vec<Line> = TIPS
        .iter()
        .map(|tip| {
            Line::from(vec![
                Span::styled(" * ", Style::default().fg(Color::Blue)),
                Span::styled(*tip, Style::default().fg(Color::Gray)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(tips), inner);

    if state.admitted() {
        let block = card("Admitted").border_style(Style::default().fg(Color::Green));
        let inner = block.inner(admitted_area);
        frame.render_widget(block, admitted_area);
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(
                    "The host has admitted you to the meeting!",
                    Style::default().fg(Color::Green),
                ))
                .centered(),
                Line::from(Span::styled(
                    "Press Enter to join now",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
                .centered(),
            ]),
            inner,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MeetingId;
    use crate::session::JoinPreferences;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn entry(preferences: JoinPreferences) -> MeetingEntry {
        MeetingEntry {
            meeting_id: MeetingId::parse("secure-meeting").unwrap(),
            display_name: "John Doe".to_string(),
            preferences,
            remember_name: true,
        }
    }

    #[test]
    fn test_format_wait() {
        assert_eq!(format_wait(0), "0:00");
        assert_eq!(format_wait(9), "0:09");
        assert_eq!(format_wait(75), "1:15");
        assert_eq!(format_wait(600), "10:00");
    }

    #[test]
    fn test_seeded_from_join_preferences() {
        let prefs = JoinPreferences {
            microphone_muted: true,
            camera_enabled: false,
        };
        let state = WaitingRoomState::new(entry(prefs));
        assert_eq!(state.session.preferences(), prefs);
    }

    #[test]
    fn test_enter_only_after_admission() {
        let mut state = WaitingRoomState::new(entry(JoinPreferences::default()));
        for _ in 0..9 {
            state.tick();
        }
        assert!(!state.admitted());
        assert_eq!(state.handle_key(key(KeyCode::Enter)), None);

        state.tick();
        assert!(state.admitted());
        state.handle_key(key(KeyCode::Char('v')));

        match state.handle_key(key(KeyCode::Enter)) {
            Some(Transition::EnterMeeting(e)) => {
                assert_eq!(e.meeting_id.as_str(), "secure-meeting");
                assert!(!e.preferences.camera_enabled);
                assert!(!e.preferences.microphone_muted);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_escape_leaves() {
        let mut state = WaitingRoomState::new(entry(JoinPreferences::default()));
        assert_eq!(
            state.handle_key(key(KeyCode::Esc)),
            Some(Transition::Goto(Route::Dashboard))
        );
    }
}
