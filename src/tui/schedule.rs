//! Schedule screen: the meeting form and the confirmation view.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::app::Transition;
use super::input::{self, TextInput};
use super::route::Route;
use super::ui::card;
use crate::models::{
    duration_label, timezone_label, ScheduleForm, ScheduledMeeting, DEFAULT_DURATION_MINUTES,
    DEFAULT_TIMEZONE, DURATION_OPTIONS, TIMEZONES, TIME_SLOTS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Description,
    Date,
    StartTime,
    Duration,
    Timezone,
    RequirePassword,
    Password,
    WaitingRoom,
    MuteParticipants,
    AllowRecording,
    Invites,
}

impl Field {
    const ORDER: [Field; 12] = [
        Field::Title,
        Field::Description,
        Field::Date,
        Field::StartTime,
        Field::Duration,
        Field::Timezone,
        Field::RequirePassword,
        Field::Password,
        Field::WaitingRoom,
        Field::MuteParticipants,
        Field::AllowRecording,
        Field::Invites,
    ];

    fn is_text(self) -> bool {
        matches!(
            self,
            Field::Title | Field::Description | Field::Date | Field::Password | Field::Invites
        )
    }

    fn label(self) -> &'static str {
        match self {
            Field::Title => "Meeting Title *",
            Field::Description => "Description",
            Field::Date => "Date * (YYYY-MM-DD)",
            Field::StartTime => "Start Time *",
            Field::Duration => "Duration",
            Field::Timezone => "Timezone",
            Field::RequirePassword => "Require meeting password",
            Field::Password => "Password",
            Field::WaitingRoom => "Enable waiting room",
            Field::MuteParticipants => "Mute participants on entry",
            Field::AllowRecording => "Allow participants to record",
            Field::Invites => "Invite (comma separated emails)",
        }
    }
}

/// Neighbouring index in `0..len`, wrapping at both ends.
fn cycle_index(current: usize, len: usize, forward: bool) -> usize {
    if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}

pub struct ScheduleState {
    title: TextInput,
    description: TextInput,
    date: TextInput,
    password: TextInput,
    invites: TextInput,
    /// Index into `TIME_SLOTS`; unset until chosen.
    start_time: Option<usize>,
    duration: usize,
    timezone: usize,
    require_password: bool,
    waiting_room: bool,
    mute_participants: bool,
    allow_recording: bool,
    focus: Field,
    /// Set once the form was submitted successfully.
    scheduled: Option<ScheduledMeeting>,
}

impl Default for ScheduleState {
    fn default() -> Self {
        let defaults = ScheduleForm::default();
        Self {
            title: TextInput::default(),
            description: TextInput::default(),
            date: TextInput::default(),
            password: TextInput::default(),
            invites: TextInput::default(),
            start_time: None,
            duration: DURATION_OPTIONS
                .iter()
                .position(|(m, _)| *m == DEFAULT_DURATION_MINUTES)
                .unwrap_or(0),
            timezone: TIMEZONES
                .iter()
                .position(|(tz, _)| *tz == DEFAULT_TIMEZONE)
                .unwrap_or(0),
            require_password: defaults.require_password,
            waiting_room: defaults.waiting_room,
            mute_participants: defaults.mute_participants,
            allow_recording: defaults.allow_recording,
            focus: Field::Title,
            scheduled: None,
        }
    }
}

impl ScheduleState {
    pub fn captures_text(&self) -> bool {
        self.scheduled.is_none() && self.focus.is_text()
    }

    pub fn hints(&self) -> &'static str {
        if self.scheduled.is_some() {
            "Enter: start meeting now | Esc: back to dashboard"
        } else {
            "Tab/Up/Down: field | Left/Right: choose | Space: switch | Enter/C-s: schedule | Esc: cancel"
        }
    }

    /// Snapshot of the inputs as a form value.
    pub fn form(&self) -> ScheduleForm {
        ScheduleForm {
            title: self.title.value().to_string(),
            description: self.description.value().to_string(),
            date: self.date.value().to_string(),
            start_time: self
                .start_time
                .map(|i| TIME_SLOTS[i].to_string())
                .unwrap_or_default(),
            duration_minutes: DURATION_OPTIONS[self.duration].0,
            timezone: TIMEZONES[self.timezone].0.to_string(),
            require_password: self.require_password,
            password: self.password.value().to_string(),
            waiting_room: self.waiting_room,
            mute_participants: self.mute_participants,
            allow_recording: self.allow_recording,
            invite_emails: self.invites.value().to_string(),
        }
    }

    fn visible_fields(&self) -> Vec<Field> {
        Field::ORDER
            .iter()
            .copied()
            .filter(|f| *f != Field::Password || self.require_password)
            .collect()
    }

    fn move_focus(&mut self, forward: bool) {
        let fields = self.visible_fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[cycle_index(idx, fields.len(), forward)];
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut TextInput> {
        match field {
            Field::Title => Some(&mut self.title),
            Field::Description => Some(&mut self.description),
            Field::Date => Some(&mut self.date),
            Field::Password => Some(&mut self.password),
            Field::Invites => Some(&mut self.invites),
            _ => None,
        }
    }

    fn switch_mut(&mut self, field: Field) -> Option<&mut bool> {
        match field {
            Field::RequirePassword => Some(&mut self.require_password),
            Field::WaitingRoom => Some(&mut self.waiting_room),
            Field::MuteParticipants => Some(&mut self.mute_participants),
            Field::AllowRecording => Some(&mut self.allow_recording),
            _ => None,
        }
    }

    fn cycle_choice(&mut self, forward: bool) {
        match self.focus {
            Field::StartTime => {
                self.start_time = Some(match self.start_time {
                    None if forward => 0,
                    None => TIME_SLOTS.len() - 1,
                    Some(i) => cycle_index(i, TIME_SLOTS.len(), forward),
                });
            }
            Field::Duration => {
                self.duration = cycle_index(self.duration, DURATION_OPTIONS.len(), forward)
            }
            Field::Timezone => {
                self.timezone = cycle_index(self.timezone, TIMEZONES.len(), forward)
            }
            _ => {}
        }
    }

    fn submit(&mut self, base_url: &str) -> Option<Transition> {
        match self.form().submit(base_url) {
            Ok(meeting) => {
                tracing::info!("Scheduled \"{}\" as {}", meeting.title, meeting.id);
                self.scheduled = Some(meeting);
                Some(Transition::Status("Meeting scheduled".to_string()))
            }
            Err(e) => Some(Transition::Error(e.to_string())),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, base_url: &str) -> Option<Transition> {
        if let Some(meeting) = &self.scheduled {
            return match key.code {
                KeyCode::Enter => Some(Transition::Goto(Route::Meeting(meeting.id.clone()))),
                KeyCode::Esc => Some(Transition::Goto(Route::Dashboard)),
                _ => None,
            };
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Some(Transition::Goto(Route::Dashboard)),
            KeyCode::Char('s') if ctrl => return self.submit(base_url),
            KeyCode::Enter => return self.submit(base_url),
            KeyCode::Tab | KeyCode::Down => {
                self.move_focus(true);
                return None;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_focus(false);
                return None;
            }
            _ => {}
        }

        let focus = self.focus;
        if let Some(text) = self.text_mut(focus) {
            text.handle_key(key);
        } else if let Some(flag) = self.switch_mut(focus) {
            if matches!(key.code, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) {
                *flag = !*flag;
            }
        } else {
            match key.code {
                KeyCode::Right | KeyCode::Char(' ') => self.cycle_choice(true),
                KeyCode::Left => self.cycle_choice(false),
                _ => {}
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn render(area: Rect, frame: &mut Frame, state: &ScheduleState) {
    match &state.scheduled {
        Some(meeting) => render_success(area, frame, meeting),
        None => render_form(area, frame, state),
    }
}

fn field_style(focused: bool) -> (Style, &'static str) {
    if focused {
        (
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            "> ",
        )
    } else {
        (Style::default().fg(Color::Gray), "  ")
    }
}

fn render_form(area: Rect, frame: &mut Frame, state: &ScheduleState) {
    let [details_area, options_area] =
        Layout::horizontal([Constraint::Fill(3), Constraint::Fill(2)]).areas(area);

    let block = card("Meeting Details");
    let inner = block.inner(details_area);
    frame.render_widget(block, details_area);

    let text_fields = [
        (Field::Title, &state.title, "Enter meeting title"),
        (Field::Description, &state.description, "Add a description"),
        (Field::Date, &state.date, "2024-03-01"),
    ];
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(inner);

    for (i, (field, input, placeholder)) in text_fields.into_iter().enumerate() {
        input::render_field(
            rows[i],
            frame,
            input,
            field.label(),
            placeholder,
            state.focus == field,
        );
    }

    let start = state
        .start_time
        .map(|i| TIME_SLOTS[i])
        .unwrap_or("Select time");
    let choices = [
        (Field::StartTime, start.to_string()),
        (
            Field::Duration,
            duration_label(DURATION_OPTIONS[state.duration].0),
        ),
        (
            Field::Timezone,
            timezone_label(TIMEZONES[state.timezone].0).to_string(),
        ),
    ];
    for (i, (field, value)) in choices.into_iter().enumerate() {
        let (style, marker) = field_style(state.focus == field);
        let line = Line::from(vec![
            Span::styled(marker, style),
            Span::styled(format!("{:<16}", field.label()), style),
            Span::styled(
                format!("< {} >", value),
                Style::default().fg(Color::White),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), rows[3 + i]);
    }

    let block = card("Meeting Options");
    let inner = block.inner(options_area);
    frame.render_widget(block, options_area);

    let mut constraints = vec![Constraint::Length(1)];
    if state.require_password {
        constraints.push(Constraint::Length(3));
    }
    constraints.extend([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ]);
    let rows = Layout::vertical(constraints).split(inner);
    let mut row = rows.iter().copied();

    let switch_line = |field: Field, on: bool| {
        let (style, marker) = field_style(state.focus == field);
        Line::from(vec![
            Span::styled(marker, style),
            Span::styled(
                if on { "[x] " } else { "[ ] " },
                Style::default().fg(if on { Color::Green } else { Color::DarkGray }),
            ),
            Span::styled(field.label(), style),
        ])
    };

    if let Some(r) = row.next() {
        frame.render_widget(
            Paragraph::new(switch_line(Field::RequirePassword, state.require_password)),
            r,
        );
    }
    if state.require_password {
        if let Some(r) = row.next() {
            input::render_field(
                r,
                frame,
                &state.password,
                Field::Password.label(),
                "Enter password",
                state.focus == Field::Password,
            );
        }
    }
    for (field, on) in [
        (Field::WaitingRoom, state.waiting_room),
        (Field::MuteParticipants, state.mute_participants),
        (Field::AllowRecording, state.allow_recording),
    ] {
        if let Some(r) = row.next() {
            frame.render_widget(Paragraph::new(switch_line(field, on)), r);
        }
    }
    // Spacer.
    row.next();
    if let Some(r) = row.next() {
        input::render_field(
            r,
            frame,
            &state.invites,
            Field::Invites.label(),
            "alice@example.com, bob@example.com",
            state.focus == Field::Invites,
        );
    }
}

fn render_success(area: Rect, frame: &mut Frame, meeting: &ScheduledMeeting) {
    let block = card("Meeting Scheduled").border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White);
    let row = |l: &str, v: String| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", l), label),
            Span::styled(v, value),
        ])
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Your meeting has been scheduled successfully.",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        row("Title:", meeting.title.clone()),
        row("When:", meeting.when_label()),
        row("Duration:", duration_label(meeting.duration_minutes)),
        row("Meeting ID:", meeting.id.to_string()),
        row("Link:", meeting.link.clone()),
    ];
    if let Some(password) = &meeting.password {
        lines.push(row("Password:", password.clone()));
    }
    if !meeting.invitees.is_empty() {
        lines.push(row("Invited:", meeting.invitees.join(", ")));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Enter", Style::default().fg(Color::Yellow)),
        Span::styled(" Start Meeting Now   ", value),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" Back to Dashboard", value),
    ]));
    frame.render_widget(Paragraph::new(lines), inner);
}
