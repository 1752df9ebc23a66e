//! TUI application state and main event loop

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::DefaultTerminal;

use super::dashboard::DashboardState;
use super::debug_log::DebugLogState;
use super::join::JoinState;
use super::log_capture::LogBuffer;
use super::meeting_room::MeetingRoomState;
use super::route::Route;
use super::schedule::ScheduleState;
use super::settings::SettingsState;
use super::ui;
use super::waiting_room::WaitingRoomState;
use crate::config::Config;
use crate::models::{MeetingId, MeetingSettings, Notification};
use crate::notifier::Notifier;
use crate::session::JoinPreferences;

/// Period of the clock tick driving wait timers and toast expiry.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Everything needed to mount a meeting or waiting-room screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingEntry {
    pub meeting_id: MeetingId,
    pub display_name: String,
    pub preferences: JoinPreferences,
    /// Keep `display_name` as the default for later joins in this run.
    pub remember_name: bool,
}

/// What a screen asks the app to do after handling a key.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Goto(Route),
    EnterMeeting(MeetingEntry),
    EnterWaitingRoom(MeetingEntry),
    ApplySettings(Box<MeetingSettings>),
    Status(String),
    Error(String),
    Quit,
}

/// The screen currently mounted. Each owns its own state and is dropped on
/// navigation.
pub enum Screen {
    Dashboard(DashboardState),
    Join(JoinState),
    WaitingRoom(WaitingRoomState),
    Meeting(MeetingRoomState),
    Schedule(ScheduleState),
    Settings(SettingsState),
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Dashboard(_) => "Dashboard",
            Screen::Join(_) => "Join a Meeting",
            Screen::WaitingRoom(_) => "Waiting Room",
            Screen::Meeting(_) => "Meeting",
            Screen::Schedule(_) => "Schedule Meeting",
            Screen::Settings(_) => "Settings",
        }
    }

    /// True while a text field has focus, so printable keys must reach it.
    pub fn captures_text(&self) -> bool {
        match self {
            Screen::Dashboard(s) => s.captures_text(),
            Screen::Join(s) => s.captures_text(),
            Screen::Meeting(s) => s.captures_text(),
            Screen::Schedule(s) => s.captures_text(),
            Screen::WaitingRoom(_) | Screen::Settings(_) => false,
        }
    }

    /// Key hints for the status bar.
    pub fn hints(&self) -> &'static str {
        match self {
            Screen::Dashboard(s) => s.hints(),
            Screen::Join(_) => JoinState::HINTS,
            Screen::WaitingRoom(_) => WaitingRoomState::HINTS,
            Screen::Meeting(s) => s.hints(),
            Screen::Schedule(s) => s.hints(),
            Screen::Settings(_) => SettingsState::HINTS,
        }
    }
}

/// Application state
pub struct App {
    /// Whether the app should exit
    pub should_exit: bool,
    pub config: Config,
    /// In-memory settings, seeded from the config file
    pub settings: MeetingSettings,
    /// Default display name for joins (updated by "remember my name")
    pub display_name: String,
    pub screen: Screen,
    /// Runs only while the dashboard is mounted
    notifier: Option<Notifier>,
    pub show_help: bool,
    pub debug_log: DebugLogState,
    /// Transient message for the status bar
    pub status_message: Option<String>,
    pub status_is_error: bool,
}

impl App {
    pub fn new(config: Config, log_buffer: LogBuffer) -> Self {
        Self {
            should_exit: false,
            settings: config.settings.clone(),
            display_name: config.profile.display_name.clone(),
            config,
            screen: Screen::Dashboard(DashboardState::default()),
            notifier: None,
            show_help: false,
            debug_log: DebugLogState::new(log_buffer),
            status_message: None,
            status_is_error: false,
        }
    }

    /// Mount the screen for `route`.
    pub fn navigate(&mut self, route: Route) {
        tracing::info!("Navigating to {}", route);
        let screen = match route {
            Route::Dashboard => Screen::Dashboard(DashboardState::default()),
            Route::Join => Screen::Join(JoinState::new(
                &self.display_name,
                self.settings.join_preferences(),
            )),
            Route::Schedule => Screen::Schedule(ScheduleState::default()),
            Route::Settings => Screen::Settings(SettingsState::new(self.settings.clone())),
            Route::Meeting(meeting_id) => {
                let entry = MeetingEntry {
                    meeting_id,
                    display_name: self.display_name.clone(),
                    preferences: self.settings.join_preferences(),
                    remember_name: false,
                };
                self.meeting_screen(entry)
            }
        };
        self.mount(screen);
    }

    fn meeting_screen(&self, entry: MeetingEntry) -> Screen {
        Screen::Meeting(MeetingRoomState::new(
            entry.meeting_id,
            entry.display_name,
            entry.preferences,
            self.settings.show_participant_names,
        ))
    }

    /// Replace the current screen. The notification simulator lives exactly
    /// as long as the dashboard is mounted.
    fn mount(&mut self, screen: Screen) {
        self.notifier = None;
        let is_dashboard = matches!(screen, Screen::Dashboard(_));
        self.screen = screen;

        if is_dashboard && self.config.notifications.enabled {
            let (min, max) = self.config.notifications.interval_bounds();
            self.notifier = Some(Notifier::start(min, max));
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>, is_error: bool) {
        self.status_message = Some(message.into());
        self.status_is_error = is_error;
    }

    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Goto(route) => self.navigate(route),
            Transition::EnterMeeting(entry) => {
                tracing::info!("Joining meeting {}", entry.meeting_id);
                self.remember(&entry);
                let screen = self.meeting_screen(entry);
                self.mount(screen);
            }
            Transition::EnterWaitingRoom(entry) => {
                tracing::info!("Waiting to be admitted to {}", entry.meeting_id);
                self.remember(&entry);
                self.mount(Screen::WaitingRoom(WaitingRoomState::new(entry)));
            }
            Transition::ApplySettings(settings) => {
                tracing::info!("Settings applied");
                self.settings = *settings;
                self.navigate(Route::Dashboard);
                self.set_status("Settings saved", false);
            }
            Transition::Status(msg) => self.set_status(msg, false),
            Transition::Error(msg) => self.set_status(msg, true),
            Transition::Quit => self.should_exit = true,
        }
    }

    fn remember(&mut self, entry: &MeetingEntry) {
        if entry.remember_name && self.display_name != entry.display_name {
            tracing::debug!("Remembering display name {:?}", entry.display_name);
            self.display_name = entry.display_name.clone();
        }
    }

    /// Handle a terminal event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(_, _) => {
                // Terminal resized - will be handled on next draw
            }
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            self.should_exit = true;
            return;
        }

        // Any key closes the help popup.
        if self.show_help {
            self.show_help = false;
            return;
        }

        if ctrl && key.code == KeyCode::Char('d') {
            self.debug_log.toggle();
            return;
        }

        if self.debug_log.visible {
            match key.code {
                KeyCode::PageUp => {
                    self.debug_log.scroll_up(10);
                    return;
                }
                KeyCode::PageDown => {
                    self.debug_log.scroll_down(10);
                    return;
                }
                _ => {}
            }
        }

        if key.code == KeyCode::Char('?') && !self.screen.captures_text() {
            self.show_help = true;
            return;
        }

        self.status_message = None;

        let transition = match &mut self.screen {
            Screen::Dashboard(s) => s.handle_key(key),
            Screen::Join(s) => s.handle_key(key),
            Screen::WaitingRoom(s) => s.handle_key(key),
            Screen::Meeting(s) => s.handle_key(key),
            Screen::Schedule(s) => s.handle_key(key, &self.config.base_url),
            Screen::Settings(s) => s.handle_key(key),
        };

        if let Some(t) = transition {
            self.apply(t);
        }
    }

    /// Deliver a simulated notification to the dashboard.
    pub fn push_notification(&mut self, notification: Notification, now: Instant) {
        if let Screen::Dashboard(s) = &mut self.screen {
            s.feed.push(notification, now);
        }
    }

    /// Advance clocks: waiting-room timer and toast expiry.
    pub fn on_tick(&mut self, now: Instant) {
        match &mut self.screen {
            Screen::WaitingRoom(s) => s.tick(),
            Screen::Dashboard(s) => s.feed.expire_toasts(now),
            _ => {}
        }
    }

    /// Render the UI
    pub fn render(&self, frame: &mut ratatui::Frame) {
        ui::render(frame, self);
    }
}

/// Wait for the next simulated notification, or forever if none is running.
async fn next_notification(notifier: &mut Option<Notifier>) -> Option<Notification> {
    match notifier {
        Some(n) => n.recv().await,
        None => std::future::pending().await,
    }
}

/// Run the TUI, applying `start` before the first frame.
///
/// `ratatui::init` installs a panic hook that restores the terminal, so a
/// panic inside the loop still leaves the shell usable.
pub async fn run(config: Config, start: Transition, log_buffer: LogBuffer) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, config, start, log_buffer).await;
    ratatui::restore();
    result
}

async fn run_app(
    terminal: &mut DefaultTerminal,
    config: Config,
    start: Transition,
    log_buffer: LogBuffer,
) -> Result<()> {
    let mut app = App::new(config, log_buffer);
    app.apply(start);

    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_INTERVAL);

    while !app.should_exit {
        app.debug_log.refresh();
        terminal
            .draw(|frame| app.render(frame))
            .context("Failed to draw frame")?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(event)) => app.handle_event(event),
                Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                None => break,
            },
            Some(notification) = next_notification(&mut app.notifier) => {
                app.push_notification(notification, Instant::now());
            }
            _ = ticker.tick() => app.on_tick(Instant::now()),
        }
    }

    tracing::info!("Exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOTIFICATION_TEMPLATES;
    use crate::session::ViewMode;
    use chrono::Local;

    fn test_app() -> App {
        let mut config = Config::default();
        // No runtime in plain #[test]; keep the simulator off.
        config.notifications.enabled = false;
        App::new(config, LogBuffer::new())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn meeting(app: &App) -> &MeetingRoomState {
        match &app.screen {
            Screen::Meeting(s) => s,
            other => panic!("expected meeting screen, got {}", other.title()),
        }
    }

    #[test]
    fn test_starts_on_dashboard() {
        let app = test_app();
        assert_eq!(app.screen.title(), "Dashboard");
        assert!(!app.should_exit);
    }

    #[test]
    fn test_navigate_routes() {
        let mut app = test_app();
        for (route, title) in [
            (Route::Join, "Join a Meeting"),
            (Route::Schedule, "Schedule Meeting"),
            (Route::Settings, "Settings"),
            (Route::Dashboard, "Dashboard"),
        ] {
            app.navigate(route);
            assert_eq!(app.screen.title(), title);
        }
        app.navigate("/meeting/abc".parse().unwrap());
        assert_eq!(meeting(&app).meeting_id.as_str(), "abc");
    }

    #[test]
    fn test_meeting_route_uses_settings_defaults() {
        let mut app = test_app();
        app.settings.join_with_mic_muted = true;
        app.navigate("/meeting/abc".parse().unwrap());
        assert!(meeting(&app).session.microphone_muted);
        assert!(meeting(&app).session.camera_enabled);
    }

    #[test]
    fn test_meeting_keys_toggle_session() {
        let mut app = test_app();
        app.navigate("/meeting/abc".parse().unwrap());

        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('g'));

        let s = &meeting(&app).session;
        assert!(s.microphone_muted);
        assert!(s.camera_enabled);
        assert!(s.chat_panel_open);
        assert!(s.participants_panel_open);
        assert_eq!(s.view_mode, ViewMode::Speaker);

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.screen.title(), "Dashboard");
    }

    #[test]
    fn test_join_flow_carries_preferences() {
        let mut app = test_app();
        app.navigate(Route::Join);
        type_str(&mut app, "123-456");
        // Leave the text fields and toggle the preview.
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Char('v'));
        press(&mut app, KeyCode::Enter);

        let m = meeting(&app);
        assert_eq!(m.meeting_id.as_str(), "123-456");
        assert!(m.session.microphone_muted);
        assert!(!m.session.camera_enabled);
    }

    #[test]
    fn test_join_through_waiting_room() {
        let mut app = test_app();
        app.navigate(Route::Join);
        type_str(&mut app, "secure-room");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen.title(), "Waiting Room");

        press(&mut app, KeyCode::Char('m'));
        // Not admitted yet.
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen.title(), "Waiting Room");

        for _ in 0..10 {
            app.on_tick(Instant::now());
        }
        press(&mut app, KeyCode::Enter);
        let m = meeting(&app);
        assert_eq!(m.meeting_id.as_str(), "secure-room");
        assert!(m.session.microphone_muted);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(!app.should_exit);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_exit);
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut app = test_app();
        app.navigate(Route::Join);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_exit);
    }

    #[test]
    fn test_apply_settings() {
        let mut app = test_app();
        let mut settings = MeetingSettings::default();
        settings.join_with_camera_off = true;
        app.apply(Transition::ApplySettings(Box::new(settings)));
        assert!(app.settings.join_with_camera_off);
        assert_eq!(app.screen.title(), "Dashboard");
        assert_eq!(app.status_message.as_deref(), Some("Settings saved"));
    }

    #[test]
    fn test_remember_name() {
        let mut app = test_app();
        let entry = MeetingEntry {
            meeting_id: MeetingId::parse("abc").unwrap(),
            display_name: "Grace Hopper".to_string(),
            preferences: JoinPreferences::default(),
            remember_name: true,
        };
        app.apply(Transition::EnterMeeting(entry.clone()));
        assert_eq!(app.display_name, "Grace Hopper");

        app.apply(Transition::EnterMeeting(MeetingEntry {
            display_name: "Someone Else".to_string(),
            remember_name: false,
            ..entry
        }));
        assert_eq!(app.display_name, "Grace Hopper");
    }

    #[test]
    fn test_notifications_only_reach_dashboard() {
        let mut app = test_app();
        let now = Instant::now();
        let n = NOTIFICATION_TEMPLATES[0].instantiate(Local::now());
        app.push_notification(n.clone(), now);
        match &app.screen {
            Screen::Dashboard(s) => assert_eq!(s.feed.len(), 1),
            _ => unreachable!(),
        }

        app.navigate(Route::Join);
        app.push_notification(n, now);
        app.navigate(Route::Dashboard);
        match &app.screen {
            Screen::Dashboard(s) => assert!(s.feed.is_empty()),
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_dashboard_starts_and_stops_notifier() {
        let mut app = App::new(Config::default(), LogBuffer::new());
        app.navigate(Route::Dashboard);
        assert!(app.notifier.is_some());
        app.navigate(Route::Join);
        assert!(app.notifier.is_none());
    }
}
