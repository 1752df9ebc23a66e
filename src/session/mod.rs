//! Local meeting-session state: the media and interaction flags of the
//! current user.
//!
//! Every screen that shows a control bar or a camera preview (join, waiting
//! room, meeting room) owns one `SessionState`. The flags are independent:
//! no toggle reads or writes any field other than its own.

use serde::{Deserialize, Serialize};

/// Layout of the participant tiles in the meeting room.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Gallery,
    Speaker,
}

impl ViewMode {
    /// The other layout.
    pub fn flipped(self) -> Self {
        match self {
            ViewMode::Gallery => ViewMode::Speaker,
            ViewMode::Speaker => ViewMode::Gallery,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Gallery => "gallery",
            ViewMode::Speaker => "speaker",
        }
    }
}

/// Media choices made before entering a meeting.
///
/// Carried from the join screen through the waiting room into the meeting
/// room so the user does not have to set them twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinPreferences {
    pub microphone_muted: bool,
    pub camera_enabled: bool,
}

impl Default for JoinPreferences {
    fn default() -> Self {
        Self {
            microphone_muted: false,
            camera_enabled: true,
        }
    }
}

/// Client-local flags for one meeting screen lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub microphone_muted: bool,
    pub camera_enabled: bool,
    pub screen_sharing: bool,
    pub hand_raised: bool,
    pub speaker_muted: bool,
    pub recording: bool,
    pub chat_panel_open: bool,
    pub participants_panel_open: bool,
    pub view_mode: ViewMode,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            microphone_muted: false,
            camera_enabled: true,
            screen_sharing: false,
            hand_raised: false,
            speaker_muted: false,
            recording: false,
            chat_panel_open: false,
            participants_panel_open: false,
            view_mode: ViewMode::default(),
        }
    }
}

impl SessionState {
    /// Fresh state with the media flags taken from `prefs`.
    pub fn with_preferences(prefs: JoinPreferences) -> Self {
        Self {
            microphone_muted: prefs.microphone_muted,
            camera_enabled: prefs.camera_enabled,
            ..Self::default()
        }
    }

    /// The media flags worth carrying to the next screen.
    pub fn preferences(&self) -> JoinPreferences {
        JoinPreferences {
            microphone_muted: self.microphone_muted,
            camera_enabled: self.camera_enabled,
        }
    }

    pub fn toggle_microphone(&mut self) {
        self.microphone_muted = !self.microphone_muted;
        tracing::debug!(muted = self.microphone_muted, "microphone toggled");
    }

    pub fn toggle_camera(&mut self) {
        self.camera_enabled = !self.camera_enabled;
        tracing::debug!(enabled = self.camera_enabled, "camera toggled");
    }

    /// Screen sharing does not touch the camera; both may be on.
    pub fn toggle_screen_share(&mut self) {
        self.screen_sharing = !self.screen_sharing;
        tracing::debug!(sharing = self.screen_sharing, "screen share toggled");
    }

    pub fn toggle_hand_raise(&mut self) {
        self.hand_raised = !self.hand_raised;
        tracing::debug!(raised = self.hand_raised, "hand toggled");
    }

    pub fn toggle_speaker_mute(&mut self) {
        self.speaker_muted = !self.speaker_muted;
        tracing::debug!(muted = self.speaker_muted, "speaker toggled");
    }

    /// No consent prompt: the flag flips immediately.
    pub fn toggle_recording(&mut self) {
        self.recording = !self.recording;
        tracing::debug!(recording = self.recording, "recording toggled");
    }

    /// Independent of the participants panel; both can be open.
    pub fn toggle_chat_panel(&mut self) {
        self.chat_panel_open = !self.chat_panel_open;
        tracing::debug!(open = self.chat_panel_open, "chat panel toggled");
    }

    pub fn toggle_participants_panel(&mut self) {
        self.participants_panel_open = !self.participants_panel_open;
        tracing::debug!(
            open = self.participants_panel_open,
            "participants panel toggled"
        );
    }

    pub fn toggle_view_mode(&mut self) {
        self.view_mode = self.view_mode.flipped();
        tracing::debug!(mode = self.view_mode.as_str(), "view mode toggled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Toggle = fn(&mut SessionState);

    const TOGGLES: [(&str, Toggle); 9] = [
        ("microphone", SessionState::toggle_microphone),
        ("camera", SessionState::toggle_camera),
        ("screen_share", SessionState::toggle_screen_share),
        ("hand_raise", SessionState::toggle_hand_raise),
        ("speaker_mute", SessionState::toggle_speaker_mute),
        ("recording", SessionState::toggle_recording),
        ("chat_panel", SessionState::toggle_chat_panel),
        ("participants_panel", SessionState::toggle_participants_panel),
        ("view_mode", SessionState::toggle_view_mode),
    ];

    /// Count how many fields differ between two states.
    fn changed_fields(a: &SessionState, b: &SessionState) -> usize {
        [
            a.microphone_muted != b.microphone_muted,
            a.camera_enabled != b.camera_enabled,
            a.screen_sharing != b.screen_sharing,
            a.hand_raised != b.hand_raised,
            a.speaker_muted != b.speaker_muted,
            a.recording != b.recording,
            a.chat_panel_open != b.chat_panel_open,
            a.participants_panel_open != b.participants_panel_open,
            a.view_mode != b.view_mode,
        ]
        .iter()
        .filter(|changed| **changed)
        .count()
    }

    #[test]
    fn test_defaults() {
        let s = SessionState::default();
        assert!(!s.microphone_muted);
        assert!(s.camera_enabled);
        assert!(!s.screen_sharing);
        assert!(!s.hand_raised);
        assert!(!s.speaker_muted);
        assert!(!s.recording);
        assert!(!s.chat_panel_open);
        assert!(!s.participants_panel_open);
        assert_eq!(s.view_mode, ViewMode::Gallery);
    }

    #[test]
    fn test_microphone_parity() {
        for initial in [false, true] {
            let mut s = SessionState {
                microphone_muted: initial,
                ..SessionState::default()
            };
            for count in 1..=7 {
                s.toggle_microphone();
                assert_eq!(s.microphone_muted, initial ^ (count % 2 == 1));
            }
        }
    }

    #[test]
    fn test_toggle_twice_restores() {
        for (name, toggle) in TOGGLES {
            let original = SessionState::default();
            let mut s = original.clone();
            toggle(&mut s);
            assert_ne!(s, original, "{} did not change state", name);
            toggle(&mut s);
            assert_eq!(s, original, "{} twice did not restore", name);
        }
    }

    #[test]
    fn test_toggles_are_independent() {
        // Start from a mixed state so both directions are exercised.
        let start = SessionState {
            microphone_muted: true,
            screen_sharing: true,
            chat_panel_open: true,
            view_mode: ViewMode::Speaker,
            ..SessionState::default()
        };
        for (name, toggle) in TOGGLES {
            let mut s = start.clone();
            toggle(&mut s);
            assert_eq!(changed_fields(&start, &s), 1, "{} touched other fields", name);
        }
    }

    #[test]
    fn test_mute_leaves_camera_alone() {
        let mut s = SessionState::default();
        s.toggle_microphone();
        assert!(s.microphone_muted);
        assert!(s.camera_enabled);
    }

    #[test]
    fn test_both_panels_open() {
        let mut s = SessionState::default();
        s.toggle_chat_panel();
        s.toggle_participants_panel();
        assert!(s.chat_panel_open);
        assert!(s.participants_panel_open);
    }

    #[test]
    fn test_share_with_camera_on() {
        let mut s = SessionState::default();
        s.toggle_screen_share();
        assert!(s.screen_sharing);
        assert!(s.camera_enabled);
    }

    #[test]
    fn test_view_mode_cycle() {
        let mut s = SessionState::default();
        assert_eq!(s.view_mode, ViewMode::Gallery);
        s.toggle_view_mode();
        assert_eq!(s.view_mode, ViewMode::Speaker);
        s.toggle_view_mode();
        assert_eq!(s.view_mode, ViewMode::Gallery);
    }

    #[test]
    fn test_preferences_round_trip() {
        let prefs = JoinPreferences {
            microphone_muted: true,
            camera_enabled: false,
        };
        let s = SessionState::with_preferences(prefs);
        assert_eq!(s.preferences(), prefs);
        assert!(!s.chat_panel_open);
        assert_eq!(s.view_mode, ViewMode::Gallery);
    }
}
