//! In-memory meeting settings (audio, video, general, privacy, notifications)
//!
//! The values are never written back to disk. The config file may seed them
//! through its `[settings]` table.

use serde::{Deserialize, Deserializer, Serialize};

use crate::session::JoinPreferences;

/// Step used when adjusting a volume level.
pub const LEVEL_STEP: i16 = 5;

/// Upper bound of a volume level.
pub const MAX_LEVEL: u8 = 100;

/// Volume levels from the config file are clamped to `0..=MAX_LEVEL`.
fn deserialize_level<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(u8::deserialize(deserializer)?.min(MAX_LEVEL))
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoQuality {
    Sd,
    #[default]
    Hd,
    Fhd,
}

impl VideoQuality {
    const ALL: [VideoQuality; 3] = [VideoQuality::Sd, VideoQuality::Hd, VideoQuality::Fhd];

    pub fn label(&self) -> &'static str {
        match self {
            VideoQuality::Sd => "Standard Definition (480p)",
            VideoQuality::Hd => "High Definition (720p)",
            VideoQuality::Fhd => "Full HD (1080p)",
        }
    }

    fn next(self) -> Self {
        cycle(&Self::ALL, self)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VirtualBackground {
    #[default]
    None,
    Blur,
    Office,
    Home,
    Nature,
}

impl VirtualBackground {
    const ALL: [VirtualBackground; 5] = [
        VirtualBackground::None,
        VirtualBackground::Blur,
        VirtualBackground::Office,
        VirtualBackground::Home,
        VirtualBackground::Nature,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VirtualBackground::None => "None",
            VirtualBackground::Blur => "Blur Background",
            VirtualBackground::Office => "Office",
            VirtualBackground::Home => "Home Office",
            VirtualBackground::Nature => "Nature",
        }
    }

    fn next(self) -> Self {
        cycle(&Self::ALL, self)
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(idx + 1) % all.len()]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeetingSettings {
    // Audio
    pub microphone_enabled: bool,
    #[serde(deserialize_with = "deserialize_level")]
    pub microphone_volume: u8,
    #[serde(deserialize_with = "deserialize_level")]
    pub speaker_volume: u8,
    pub noise_cancellation: bool,
    pub echo_cancellation: bool,

    // Video
    pub camera_enabled: bool,
    pub video_quality: VideoQuality,
    pub virtual_background: VirtualBackground,
    pub mirror_video: bool,

    // General
    pub join_with_mic_muted: bool,
    pub join_with_camera_off: bool,
    pub show_participant_names: bool,
    pub enable_reactions: bool,

    // Privacy
    pub waiting_room: bool,
    pub require_password: bool,
    pub allow_screen_share: bool,
    pub recording_consent: bool,

    // Notifications
    pub sound_notifications: bool,
    pub chat_notifications: bool,
    pub participant_notifications: bool,
}

impl Default for MeetingSettings {
    fn default() -> Self {
        Self {
            microphone_enabled: true,
            microphone_volume: 75,
            speaker_volume: 75,
            noise_cancellation: true,
            echo_cancellation: true,
            camera_enabled: true,
            video_quality: VideoQuality::default(),
            virtual_background: VirtualBackground::default(),
            mirror_video: true,
            join_with_mic_muted: false,
            join_with_camera_off: false,
            show_participant_names: true,
            enable_reactions: true,
            waiting_room: true,
            require_password: false,
            allow_screen_share: true,
            recording_consent: true,
            sound_notifications: true,
            chat_notifications: true,
            participant_notifications: false,
        }
    }
}

/// Settings section headings, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSection {
    Audio,
    Video,
    General,
    Privacy,
    Notifications,
}

impl SettingsSection {
    pub fn title(&self) -> &'static str {
        match self {
            SettingsSection::Audio => "Audio",
            SettingsSection::Video => "Video",
            SettingsSection::General => "General",
            SettingsSection::Privacy => "Privacy & Security",
            SettingsSection::Notifications => "Notifications",
        }
    }
}

/// Addressable setting, used by the settings screen to read and edit values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    MicrophoneEnabled,
    MicrophoneVolume,
    SpeakerVolume,
    NoiseCancellation,
    EchoCancellation,
    CameraEnabled,
    Quality,
    Background,
    MirrorVideo,
    JoinWithMicMuted,
    JoinWithCameraOff,
    ShowParticipantNames,
    EnableReactions,
    WaitingRoom,
    RequirePassword,
    AllowScreenShare,
    RecordingConsent,
    SoundNotifications,
    ChatNotifications,
    ParticipantNotifications,
}

impl SettingKey {
    pub const ALL: [SettingKey; 20] = [
        SettingKey::MicrophoneEnabled,
        SettingKey::MicrophoneVolume,
        SettingKey::SpeakerVolume,
        SettingKey::NoiseCancellation,
        SettingKey::EchoCancellation,
        SettingKey::CameraEnabled,
        SettingKey::Quality,
        SettingKey::Background,
        SettingKey::MirrorVideo,
        SettingKey::JoinWithMicMuted,
        SettingKey::JoinWithCameraOff,
        SettingKey::ShowParticipantNames,
        SettingKey::EnableReactions,
        SettingKey::WaitingRoom,
        SettingKey::RequirePassword,
        SettingKey::AllowScreenShare,
        SettingKey::RecordingConsent,
        SettingKey::SoundNotifications,
        SettingKey::ChatNotifications,
        SettingKey::ParticipantNotifications,
    ];

    pub fn section(&self) -> SettingsSection {
        use SettingKey::*;
        match self {
            MicrophoneEnabled | MicrophoneVolume | SpeakerVolume | NoiseCancellation
            | EchoCancellation => SettingsSection::Audio,
            CameraEnabled | Quality | Background | MirrorVideo => SettingsSection::Video,
            JoinWithMicMuted | JoinWithCameraOff | ShowParticipantNames | EnableReactions => {
                SettingsSection::General
            }
            WaitingRoom | RequirePassword | AllowScreenShare | RecordingConsent => {
                SettingsSection::Privacy
            }
            SoundNotifications | ChatNotifications | ParticipantNotifications => {
                SettingsSection::Notifications
            }
        }
    }

    pub fn label(&self) -> &'static str {
        use SettingKey::*;
        match self {
            MicrophoneEnabled => "Microphone",
            MicrophoneVolume => "Microphone Volume",
            SpeakerVolume => "Speaker Volume",
            NoiseCancellation => "Noise Cancellation",
            EchoCancellation => "Echo Cancellation",
            CameraEnabled => "Camera",
            Quality => "Video Quality",
            Background => "Virtual Background",
            MirrorVideo => "Mirror My Video",
            JoinWithMicMuted => "Join with microphone muted",
            JoinWithCameraOff => "Join with camera off",
            ShowParticipantNames => "Show participant names",
            EnableReactions => "Enable reactions",
            WaitingRoom => "Enable waiting room",
            RequirePassword => "Require meeting password",
            AllowScreenShare => "Allow screen sharing",
            RecordingConsent => "Require recording consent",
            SoundNotifications => "Sound notifications",
            ChatNotifications => "Chat notifications",
            ParticipantNotifications => "Participant join/leave notifications",
        }
    }
}

/// Current value of a setting, as the settings screen displays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingValue {
    Switch(bool),
    Level(u8),
    Choice(&'static str),
}

impl MeetingSettings {
    fn switch_mut(&mut self, key: SettingKey) -> Option<&mut bool> {
        use SettingKey::*;
        let flag = match key {
            MicrophoneEnabled => &mut self.microphone_enabled,
            NoiseCancellation => &mut self.noise_cancellation,
            EchoCancellation => &mut self.echo_cancellation,
            CameraEnabled => &mut self.camera_enabled,
            MirrorVideo => &mut self.mirror_video,
            JoinWithMicMuted => &mut self.join_with_mic_muted,
            JoinWithCameraOff => &mut self.join_with_camera_off,
            ShowParticipantNames => &mut self.show_participant_names,
            EnableReactions => &mut self.enable_reactions,
            WaitingRoom => &mut self.waiting_room,
            RequirePassword => &mut self.require_password,
            AllowScreenShare => &mut self.allow_screen_share,
            RecordingConsent => &mut self.recording_consent,
            SoundNotifications => &mut self.sound_notifications,
            ChatNotifications => &mut self.chat_notifications,
            ParticipantNotifications => &mut self.participant_notifications,
            MicrophoneVolume | SpeakerVolume | Quality | Background => return None,
        };
        Some(flag)
    }

    fn level_mut(&mut self, key: SettingKey) -> Option<&mut u8> {
        match key {
            SettingKey::MicrophoneVolume => Some(&mut self.microphone_volume),
            SettingKey::SpeakerVolume => Some(&mut self.speaker_volume),
            _ => None,
        }
    }

    pub fn value(&self, key: SettingKey) -> SettingValue {
        use SettingKey::*;
        match key {
            MicrophoneVolume => SettingValue::Level(self.microphone_volume),
            SpeakerVolume => SettingValue::Level(self.speaker_volume),
            Quality => SettingValue::Choice(self.video_quality.label()),
            Background => SettingValue::Choice(self.virtual_background.label()),
            MicrophoneEnabled => SettingValue::Switch(self.microphone_enabled),
            NoiseCancellation => SettingValue::Switch(self.noise_cancellation),
            EchoCancellation => SettingValue::Switch(self.echo_cancellation),
            CameraEnabled => SettingValue::Switch(self.camera_enabled),
            MirrorVideo => SettingValue::Switch(self.mirror_video),
            JoinWithMicMuted => SettingValue::Switch(self.join_with_mic_muted),
            JoinWithCameraOff => SettingValue::Switch(self.join_with_camera_off),
            ShowParticipantNames => SettingValue::Switch(self.show_participant_names),
            EnableReactions => SettingValue::Switch(self.enable_reactions),
            WaitingRoom => SettingValue::Switch(self.waiting_room),
            RequirePassword => SettingValue::Switch(self.require_password),
            AllowScreenShare => SettingValue::Switch(self.allow_screen_share),
            RecordingConsent => SettingValue::Switch(self.recording_consent),
            SoundNotifications => SettingValue::Switch(self.sound_notifications),
            ChatNotifications => SettingValue::Switch(self.chat_notifications),
            ParticipantNotifications => SettingValue::Switch(self.participant_notifications),
        }
    }

    /// Flip a switch or advance a choice. Levels are left alone.
    pub fn activate(&mut self, key: SettingKey) {
        if let Some(flag) = self.switch_mut(key) {
            *flag = !*flag;
            return;
        }
        match key {
            SettingKey::Quality => self.video_quality = self.video_quality.next(),
            SettingKey::Background => {
                self.virtual_background = self.virtual_background.next()
            }
            _ => {}
        }
    }

    /// Move a level by `steps * LEVEL_STEP`, clamped to 0..=100. Other kinds
    /// treat any non-zero step as `activate`.
    pub fn adjust(&mut self, key: SettingKey, steps: i16) {
        if let Some(level) = self.level_mut(key) {
            let next = (*level as i16 + steps * LEVEL_STEP).clamp(0, MAX_LEVEL as i16);
            *level = next as u8;
        } else if steps != 0 {
            self.activate(key);
        }
    }

    /// Media flags a newly mounted meeting screen starts with.
    pub fn join_preferences(&self) -> JoinPreferences {
        JoinPreferences {
            microphone_muted: self.join_with_mic_muted,
            camera_enabled: !self.join_with_camera_off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = MeetingSettings::default();
        assert_eq!(s.speaker_volume, 75);
        assert_eq!(s.video_quality, VideoQuality::Hd);
        assert_eq!(s.virtual_background, VirtualBackground::None);
        assert!(s.waiting_room);
        assert!(s.recording_consent);
        assert!(!s.participant_notifications);
        assert_eq!(s.join_preferences(), JoinPreferences::default());
    }

    #[test]
    fn test_activate_switch() {
        let mut s = MeetingSettings::default();
        s.activate(SettingKey::JoinWithMicMuted);
        assert_eq!(s.value(SettingKey::JoinWithMicMuted), SettingValue::Switch(true));
        s.activate(SettingKey::JoinWithCameraOff);
        let prefs = s.join_preferences();
        assert!(prefs.microphone_muted);
        assert!(!prefs.camera_enabled);
    }

    #[test]
    fn test_choice_cycles() {
        let mut s = MeetingSettings::default();
        s.activate(SettingKey::Quality);
        assert_eq!(s.video_quality, VideoQuality::Fhd);
        s.activate(SettingKey::Quality);
        assert_eq!(s.video_quality, VideoQuality::Sd);

        for _ in 0..VirtualBackground::ALL.len() {
            s.activate(SettingKey::Background);
        }
        assert_eq!(s.virtual_background, VirtualBackground::None);
    }

    #[test]
    fn test_level_clamps() {
        let mut s = MeetingSettings::default();
        s.adjust(SettingKey::SpeakerVolume, 1);
        assert_eq!(s.value(SettingKey::SpeakerVolume), SettingValue::Level(80));
        s.adjust(SettingKey::SpeakerVolume, 100);
        assert_eq!(s.speaker_volume, 100);
        s.adjust(SettingKey::SpeakerVolume, -100);
        assert_eq!(s.speaker_volume, 0);

        // activate leaves levels alone
        s.activate(SettingKey::MicrophoneVolume);
        assert_eq!(s.microphone_volume, 75);
    }

    #[test]
    fn test_every_key_has_a_value() {
        let s = MeetingSettings::default();
        for key in SettingKey::ALL {
            assert!(!key.label().is_empty());
            // Must not panic.
            let _ = s.value(key);
            let _ = key.section();
        }
    }

    #[test]
    fn test_partial_toml() {
        let s: MeetingSettings = toml::from_str("join_with_mic_muted = true\nvideo_quality = \"fhd\"").unwrap();
        assert!(s.join_with_mic_muted);
        assert_eq!(s.video_quality, VideoQuality::Fhd);
        assert_eq!(s.speaker_volume, 75);
    }

    #[test]
    fn test_toml_levels_clamped() {
        let s: MeetingSettings =
            toml::from_str("microphone_volume = 200
speaker_volume = 100").unwrap();
        assert_eq!(s.microphone_volume, MAX_LEVEL);
        assert_eq!(s.speaker_volume, 100);
        assert!(toml::from_str::<MeetingSettings>("speaker_volume = 300").is_err());
    }
}
