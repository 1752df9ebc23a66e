//! Dashboard: quick actions, recent meetings, weekly stats and the live
//! notification feed.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::app::Transition;
use super::input::{self, TextInput, FIELD_HEIGHT};
use super::notifications::{self, NotificationFeed};
use super::route::Route;
use super::ui::card;
use crate::models::{
    mock_recent_meetings, MeetingId, MeetingIdError, MeetingStatus, RecentMeeting, WeeklyStats,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    MeetingId,
    Recent,
}

pub struct DashboardState {
    meeting_id: TextInput,
    focus: Focus,
    recent: Vec<RecentMeeting>,
    selected: usize,
    stats: WeeklyStats,
    pub feed: NotificationFeed,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            meeting_id: TextInput::default(),
            focus: Focus::Recent,
            recent: mock_recent_meetings(),
            selected: 0,
            stats: WeeklyStats::default(),
            feed: NotificationFeed::default(),
        }
    }
}

impl DashboardState {
    pub fn captures_text(&self) -> bool {
        self.focus == Focus::MeetingId
    }

    pub fn hints(&self) -> &'static str {
        match self.focus {
            Focus::MeetingId => "Enter: join | Esc/Tab: back to list | C-u: clear",
            Focus::Recent => {
                "i: meeting id | n: new | s: schedule | j: join | r: personal room | ,: settings | q: quit"
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Transition> {
        match self.focus {
            Focus::MeetingId => self.handle_input_key(key),
            Focus::Recent => self.handle_list_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Option<Transition> {
        match key.code {
            KeyCode::Enter => Some(self.join_typed()),
            KeyCode::Esc | KeyCode::Tab => {
                self.focus = Focus::Recent;
                None
            }
            _ => {
                self.meeting_id.handle_key(key);
                None
            }
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Transition> {
        match key.code {
            KeyCode::Char('i') | KeyCode::Tab => {
                self.focus = Focus::MeetingId;
                None
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                if self.selected + 1 < self.recent.len() {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Enter => self
                .recent
                .get(self.selected)
                .map(|m| Transition::Goto(Route::Meeting(m.id.clone()))),
            KeyCode::Char('n') => Some(new_meeting()),
            KeyCode::Char('s') => Some(Transition::Goto(Route::Schedule)),
            KeyCode::Char('j') => Some(Transition::Goto(Route::Join)),
            KeyCode::Char('r') => Some(Transition::Goto(Route::Meeting(
                MeetingId::personal_room(),
            ))),
            KeyCode::Char(',') => Some(Transition::Goto(Route::Settings)),
            KeyCode::Char('q') => Some(Transition::Quit),
            _ => None,
        }
    }

    /// Join the id typed in the input. The join button is disabled while the
    /// field is blank, so a blank submit only reports why.
    fn join_typed(&mut self) -> Transition {
        match MeetingId::parse(self.meeting_id.value()) {
            Ok(id) => Transition::Goto(Route::Meeting(id)),
            Err(MeetingIdError::Empty) => {
                Transition::Error("Enter a meeting ID to join".to_string())
            }
            Err(e) => Transition::Error(format!("Invalid meeting ID: {}", e)),
        }
    }
}

fn new_meeting() -> Transition {
    match MeetingId::generate() {
        Ok(id) => {
            tracing::info!("Starting instant meeting {}", id);
            Transition::Goto(Route::Meeting(id))
        }
        Err(e) => Transition::Error(format!("Could not create meeting: {}", e)),
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn render(area: Rect, frame: &mut Frame, state: &DashboardState) {
    let [main, side] =
        Layout::horizontal([Constraint::Fill(2), Constraint::Fill(1)]).areas(area);

    let [actions_area, recent_area] =
        Layout::vertical([Constraint::Length(FIELD_HEIGHT + 4), Constraint::Fill(1)]).areas(main);
    render_actions(actions_area, frame, state);
    render_recent(recent_area, frame, state);

    let [stats_area, feed_area] =
        Layout::vertical([Constraint::Length(6), Constraint::Fill(1)]).areas(side);
    render_stats(stats_area, frame, &state.stats);
    render_feed(feed_area, frame, &state.feed);

    notifications::render_toasts(frame, &state.feed);
}

fn render_actions(area: Rect, frame: &mut Frame, state: &DashboardState) {
    let block = card("Start or Join a Meeting");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < FIELD_HEIGHT + 1 {
        return;
    }

    let [buttons, field] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(FIELD_HEIGHT)]).areas(inner);

    let key = Style::default().fg(Color::Yellow);
    let label = Style::default().fg(Color::White);
    let line = Line::from(vec![
        Span::styled(" n", key),
        Span::styled(" New Meeting  ", label),
        Span::styled("s", key),
        Span::styled(" Schedule  ", label),
        Span::styled("j", key),
        Span::styled(" Join  ", label),
        Span::styled("r", key),
        Span::styled(" Personal Room", label),
    ]);
    frame.render_widget(Paragraph::new(line), buttons);

    let join_label = if state.meeting_id.is_blank() {
        "Meeting ID"
    } else {
        "Meeting ID (Enter to join)"
    };
    input::render_field(
        field,
        frame,
        &state.meeting_id,
        join_label,
        "Enter Meeting ID",
        state.focus == Focus::MeetingId,
    );
}

fn status_style(status: MeetingStatus) -> Style {
    match status {
        MeetingStatus::Upcoming => Style::default().fg(Color::Green),
        MeetingStatus::Completed => Style::default().fg(Color::DarkGray),
    }
}

fn render_recent(area: Rect, frame: &mut Frame, state: &DashboardState) {
    let block = card("Recent Meetings");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::with_capacity(state.recent.len() * 2);
    for (i, m) in state.recent.iter().enumerate() {
        let selected = i == state.selected && state.focus == Focus::Recent;
        let marker = if selected { "> " } else { "  " };
        let title_style = if selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Yellow)),
            Span::styled(m.title.clone(), title_style),
            Span::styled(
                format!("  [{}]", m.status.as_str()),
                status_style(m.status),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "    {} {}  |  {} participants  |  ID: {}",
                m.date, m.time, m.participants, m.id
            ),
            Style::default().fg(Color::Gray),
        )));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_stats(area: Rect, frame: &mut Frame, stats: &WeeklyStats) {
    let block = card("This Week");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!(" {:<16}", label), Style::default().fg(Color::Gray)),
            Span::styled(
                value,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    };
    let lines = vec![
        row("Meeting time", stats.meeting_time_label()),
        row("Meetings", stats.meetings.to_string()),
        row("Screen shares", stats.screen_shares.to_string()),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_feed(area: Rect, frame: &mut Frame, feed: &NotificationFeed) {
    let block = card(&format!("Notifications ({})", feed.len()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = if feed.is_empty() {
        vec![Line::from(Span::styled(
            " No notifications yet",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        feed.items().map(notifications::feed_line).collect()
    };
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_blank_join_is_an_error() {
        let mut state = DashboardState::default();
        assert_eq!(state.handle_key(key(KeyCode::Char('i'))), None);
        assert!(state.captures_text());
        type_spaces(&mut state);
        assert!(matches!(
            state.handle_key(key(KeyCode::Enter)),
            Some(Transition::Error(_))
        ));
    }

    fn type_spaces(state: &mut DashboardState) {
        state.handle_key(key(KeyCode::Char(' ')));
        state.handle_key(key(KeyCode::Char(' ')));
    }

    #[test]
    fn test_join_typed_id() {
        let mut state = DashboardState::default();
        state.handle_key(key(KeyCode::Tab));
        for c in " 42-x ".chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            Some(Transition::Goto(Route::Meeting(MeetingId::parse("42-x").unwrap())))
        );
    }

    #[test]
    fn test_typed_id_with_slash_is_rejected() {
        let mut state = DashboardState::default();
        state.handle_key(key(KeyCode::Tab));
        for c in "a/b".chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
        let transition = state.handle_key(key(KeyCode::Enter));
        assert_eq!(
            transition,
            Some(Transition::Error(
                "Invalid meeting ID: meeting id must not contain '/'".to_string()
            ))
        );
        // Every accepted id survives the route round trip.
        let route = Route::Meeting(MeetingId::parse(" 42-x ").unwrap());
        assert_eq!(route.to_string().parse::<Route>(), Ok(route));
    }

    #[test]
    fn test_letters_go_to_input_when_focused() {
        let mut state = DashboardState::default();
        state.handle_key(key(KeyCode::Char('i')));
        assert_eq!(state.handle_key(key(KeyCode::Char('q'))), None);
        assert_eq!(state.meeting_id.value(), "q");
        state.handle_key(key(KeyCode::Esc));
        assert_eq!(state.handle_key(key(KeyCode::Char('q'))), Some(Transition::Quit));
    }

    #[test]
    fn test_shortcuts() {
        let mut state = DashboardState::default();
        assert_eq!(
            state.handle_key(key(KeyCode::Char('s'))),
            Some(Transition::Goto(Route::Schedule))
        );
        assert_eq!(
            state.handle_key(key(KeyCode::Char('j'))),
            Some(Transition::Goto(Route::Join))
        );
        assert_eq!(
            state.handle_key(key(KeyCode::Char(','))),
            Some(Transition::Goto(Route::Settings))
        );
        assert_eq!(
            state.handle_key(key(KeyCode::Char('r'))),
            Some(Transition::Goto(Route::Meeting(MeetingId::personal_room())))
        );
        match state.handle_key(key(KeyCode::Char('n'))) {
            Some(Transition::Goto(Route::Meeting(id))) => assert_eq!(id.as_str().len(), 10),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_recent_selection() {
        let mut state = DashboardState::default();
        state.handle_key(key(KeyCode::Down));
        state.handle_key(key(KeyCode::Down));
        state.handle_key(key(KeyCode::Down));
        assert_eq!(state.selected, 2);
        state.handle_key(key(KeyCode::Up));
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            Some(Transition::Goto(Route::Meeting(
                MeetingId::parse("987-654-321").unwrap()
            )))
        );
    }

    #[test]
    fn test_render_lists_recent_meetings() {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let state = DashboardState::default();
        terminal
            .draw(|frame| render(frame.area(), frame, &state))
            .unwrap();

        let buf = terminal.backend().buffer();
        let text: String = (0..buf.area.height)
            .flat_map(|y| (0..buf.area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(text.contains("Team Standup"));
        assert!(text.contains("4h 32m"));
        assert!(text.contains("No notifications yet"));
    }
}
