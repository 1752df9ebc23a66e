//! Meeting room: video layout, side panels and the control bar.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};

use super::app::Transition;
use super::chat::{self, ChatPanel};
use super::controls;
use super::participants;
use super::route::Route;
use super::tiles;
use crate::models::{mock_roster, roster_with_session, MeetingId, Participant};
use crate::session::{JoinPreferences, SessionState, ViewMode};

const GALLERY_COLUMNS: usize = 3;
const CHAT_WIDTH: u16 = 38;
const PARTICIPANTS_WIDTH: u16 = 36;
const THUMBNAIL_HEIGHT: u16 = 5;
const BAR_HEIGHT: u16 = 3;

/// Roster index of the participant shown large in speaker view.
const ACTIVE_SPEAKER: usize = 1;

pub struct MeetingRoomState {
    pub meeting_id: MeetingId,
    display_name: String,
    pub session: SessionState,
    roster: Vec<Participant>,
    chat: ChatPanel,
    chat_focused: bool,
    show_advanced: bool,
    show_names: bool,
}

impl MeetingRoomState {
    pub fn new(
        meeting_id: MeetingId,
        display_name: String,
        preferences: JoinPreferences,
        show_names: bool,
    ) -> Self {
        Self {
            meeting_id,
            display_name,
            session: SessionState::with_preferences(preferences),
            roster: mock_roster(),
            chat: ChatPanel::default(),
            chat_focused: false,
            show_advanced: false,
            show_names,
        }
    }

    pub fn captures_text(&self) -> bool {
        self.chat_focused
    }

    pub fn hints(&self) -> &'static str {
        if self.chat_focused {
            "Enter: send | Esc: back to controls | C-u: clear"
        } else {
            "m v s p c g h a: controls | .: more | i: chat | x: leave | ?: help"
        }
    }

    /// Roster with the local entry reflecting the current session flags.
    pub fn roster(&self) -> Vec<Participant> {
        roster_with_session(&self.roster, &self.session)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Transition> {
        if self.chat_focused {
            match key.code {
                KeyCode::Esc => self.chat_focused = false,
                KeyCode::Enter => {
                    self.chat.send(Local::now());
                }
                _ => {
                    self.chat.input.handle_key(key);
                }
            }
            return None;
        }

        let s = &mut self.session;
        match key.code {
            KeyCode::Char('m') => s.toggle_microphone(),
            KeyCode::Char('v') => s.toggle_camera(),
            KeyCode::Char('s') => s.toggle_screen_share(),
            KeyCode::Char('p') => s.toggle_participants_panel(),
            KeyCode::Char('c') => s.toggle_chat_panel(),
            KeyCode::Char('g') => s.toggle_view_mode(),
            KeyCode::Char('h') => s.toggle_hand_raise(),
            KeyCode::Char('a') => s.toggle_speaker_mute(),
            KeyCode::Char('r') if self.show_advanced => s.toggle_recording(),
            KeyCode::Char('.') => self.show_advanced = !self.show_advanced,
            KeyCode::Char('i') | KeyCode::Tab => {
                if !s.chat_panel_open {
                    s.toggle_chat_panel();
                }
                self.chat_focused = true;
            }
            KeyCode::Char('x') => {
                tracing::info!("Left meeting {}", self.meeting_id);
                return Some(Transition::Goto(Route::Dashboard));
            }
            _ => {}
        }

        // Closing the chat panel drops input focus with it.
        if !self.session.chat_panel_open {
            self.chat_focused = false;
        }
        None
    }
}

pub fn render(area: Rect, frame: &mut Frame, state: &MeetingRoomState) {
    let bars = if state.show_advanced { 2 } else { 1 };
    let [header_area, body_area, bar_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(BAR_HEIGHT * bars),
    ])
    .areas(area);

    let roster = state.roster();
    render_header(header_area, frame.buffer_mut(), state, roster.len());

    let chat_w = if state.session.chat_panel_open {
        CHAT_WIDTH
    } else {
        0
    };
    let people_w = if state.session.participants_panel_open {
        PARTICIPANTS_WIDTH
    } else {
        0
    };
    let [video_area, people_area, chat_area] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(people_w),
        Constraint::Length(chat_w),
    ])
    .areas(body_area);

    match state.session.view_mode {
        ViewMode::Gallery => render_gallery(video_area, frame.buffer_mut(), &roster, state),
        ViewMode::Speaker => render_speaker(video_area, frame.buffer_mut(), &roster, state),
    }
    if state.session.participants_panel_open {
        participants::render(people_area, frame.buffer_mut(), &roster);
    }
    if state.session.chat_panel_open {
        chat::render(chat_area, frame, &state.chat, state.chat_focused);
    }

    let [primary_area, advanced_area] = Layout::vertical([
        Constraint::Length(BAR_HEIGHT),
        Constraint::Length(BAR_HEIGHT * (bars - 1)),
    ])
    .areas(bar_area);
    controls::render_bar(
        primary_area,
        frame.buffer_mut(),
        "Controls",
        &controls::primary_controls(&state.session),
    );
    if state.show_advanced {
        controls::render_bar(
            advanced_area,
            frame.buffer_mut(),
            "More",
            &controls::advanced_controls(&state.session),
        );
    }
}

fn badge(text: &str, fg: Color, bg: Color) -> Span<'static> {
    Span::styled(
        format!(" {} ", text),
        Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
    )
}

fn render_header(area: Rect, buf: &mut Buffer, state: &MeetingRoomState, count: usize) {
    let mut spans = vec![
        Span::styled(
            format!(" Meeting ID: {} ", state.meeting_id),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        badge("Live", Color::Black, Color::Green),
    ];
    if state.session.screen_sharing {
        spans.push(Span::raw(" "));
        spans.push(badge("Sharing", Color::Black, Color::Cyan));
    }
    if state.session.recording {
        spans.push(Span::raw(" "));
        spans.push(badge("REC", Color::White, Color::Red));
    }
    spans.push(Span::styled(
        format!(
            "  {} view | {} participants | joined as {}",
            state.session.view_mode.as_str(),
            count,
            state.display_name
        ),
        Style::default().fg(Color::Gray),
    ));
    Paragraph::new(Line::from(spans)).render(area, buf);
}

fn render_gallery(area: Rect, buf: &mut Buffer, roster: &[Participant], state: &MeetingRoomState) {
    if roster.is_empty() {
        return;
    }
    let rows = roster.len().div_ceil(GALLERY_COLUMNS);
    let row_areas = Layout::vertical(vec![Constraint::Fill(1); rows]).split(area);

    for (row_area, chunk) in row_areas.iter().zip(roster.chunks(GALLERY_COLUMNS)) {
        let cols = Layout::horizontal(vec![Constraint::Fill(1); GALLERY_COLUMNS]).split(*row_area);
        for (col_area, p) in cols.iter().zip(chunk) {
            tiles::render_tile(*col_area, buf, p, state.show_names, false);
        }
    }
}

fn render_speaker(area: Rect, buf: &mut Buffer, roster: &[Participant], state: &MeetingRoomState) {
    let [main_area, strip_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(THUMBNAIL_HEIGHT)]).areas(area);

    if let Some(speaker) = roster.get(ACTIVE_SPEAKER) {
        tiles::render_tile(main_area, buf, speaker, state.show_names, true);
    }

    if roster.is_empty() {
        return;
    }
    let thumbs = Layout::horizontal(vec![Constraint::Fill(1); roster.len()]).split(strip_area);
    for (thumb_area, p) in thumbs.iter().zip(roster) {
        tiles::render_tile(*thumb_area, buf, p, state.show_names, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn room() -> MeetingRoomState {
        MeetingRoomState::new(
            MeetingId::parse("123-456-789").unwrap(),
            "John Doe".to_string(),
            JoinPreferences::default(),
            true,
        )
    }

    fn screen_text(state: &MeetingRoomState) -> String {
        let backend = TestBackend::new(160, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame.area(), frame, state))
            .unwrap();
        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .flat_map(|y| (0..buf.area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_record_needs_advanced_row() {
        let mut state = room();
        state.handle_key(key(KeyCode::Char('r')));
        assert!(!state.session.recording);

        state.handle_key(key(KeyCode::Char('.')));
        state.handle_key(key(KeyCode::Char('r')));
        assert!(state.session.recording);
    }

    #[test]
    fn test_both_panels_open() {
        let mut state = room();
        state.handle_key(key(KeyCode::Char('c')));
        state.handle_key(key(KeyCode::Char('p')));
        assert!(state.session.chat_panel_open);
        assert!(state.session.participants_panel_open);

        let text = screen_text(&state);
        assert!(text.contains("Chat"));
        assert!(text.contains("Participants (6)"));
    }

    #[test]
    fn test_chat_focus_and_send() {
        let mut state = room();
        state.handle_key(key(KeyCode::Char('i')));
        assert!(state.session.chat_panel_open);
        assert!(state.captures_text());

        // Control keys are typed while chat has focus.
        for c in "mic ok".chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
        assert!(!state.session.microphone_muted);
        state.handle_key(key(KeyCode::Enter));
        assert_eq!(state.chat.messages.last().unwrap().message, "mic ok");

        state.handle_key(key(KeyCode::Esc));
        assert!(!state.captures_text());
        state.handle_key(key(KeyCode::Char('m')));
        assert!(state.session.microphone_muted);
    }

    #[test]
    fn test_closing_chat_drops_focus() {
        let mut state = room();
        state.handle_key(key(KeyCode::Char('i')));
        state.handle_key(key(KeyCode::Esc));
        state.handle_key(key(KeyCode::Char('c')));
        assert!(!state.session.chat_panel_open);
        assert!(!state.captures_text());
    }

    #[test]
    fn test_leave() {
        let mut state = room();
        assert_eq!(
            state.handle_key(key(KeyCode::Char('x'))),
            Some(Transition::Goto(Route::Dashboard))
        );
    }

    #[test]
    fn test_local_tile_mirrors_session() {
        let mut state = room();
        state.handle_key(key(KeyCode::Char('m')));
        state.handle_key(key(KeyCode::Char('h')));
        let me = &state.roster()[0];
        assert!(me.is_muted);
        assert!(me.is_hand_raised);
    }

    #[test]
    fn test_header_badges() {
        let mut state = room();
        let text = screen_text(&state);
        assert!(text.contains("Meeting ID: 123-456-789"));
        assert!(text.contains("Live"));
        assert!(!text.contains("REC"));

        state.handle_key(key(KeyCode::Char('s')));
        state.handle_key(key(KeyCode::Char('.')));
        state.handle_key(key(KeyCode::Char('r')));
        let text = screen_text(&state);
        assert!(text.contains("Sharing"));
        assert!(text.contains("REC"));
        assert!(text.contains("Stop Recording"));
    }

    #[test]
    fn test_speaker_view_renders_active_speaker() {
        let mut state = room();
        state.handle_key(key(KeyCode::Char('g')));
        let text = screen_text(&state);
        assert!(text.contains("speaker view"));
        assert!(text.contains("Alice Johnson"));
    }
}
