//! Meeting activity notifications (simulated)

use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    UserJoined,
    UserLeft,
    HandRaised,
    MuteChanged,
    RecordingStarted,
}

impl NotificationKind {
    /// Short ASCII-safe icon for toasts and the feed.
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::UserJoined => "+",
            NotificationKind::UserLeft => "-",
            NotificationKind::HandRaised => "o/",
            NotificationKind::MuteChanged => "~",
            NotificationKind::RecordingStarted => "REC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub user: Option<String>,
}

/// A canned notification the simulator picks from.
pub struct NotificationTemplate {
    pub kind: NotificationKind,
    pub message: &'static str,
    pub user: &'static str,
}

pub const NOTIFICATION_TEMPLATES: [NotificationTemplate; 5] = [
    NotificationTemplate {
        kind: NotificationKind::UserJoined,
        message: "Alice Johnson joined the meeting",
        user: "Alice Johnson",
    },
    NotificationTemplate {
        kind: NotificationKind::UserLeft,
        message: "Bob Smith left the meeting",
        user: "Bob Smith",
    },
    NotificationTemplate {
        kind: NotificationKind::HandRaised,
        message: "Carol Davis raised their hand",
        user: "Carol Davis",
    },
    NotificationTemplate {
        kind: NotificationKind::MuteChanged,
        message: "David Wilson muted their microphone",
        user: "David Wilson",
    },
    NotificationTemplate {
        kind: NotificationKind::RecordingStarted,
        message: "Recording started",
        user: "Host",
    },
];

impl NotificationTemplate {
    pub fn instantiate(&self, at: DateTime<Local>) -> Notification {
        Notification {
            id: uuid::Uuid::new_v4().to_string(),
            kind: self.kind,
            message: self.message.to_string(),
            timestamp: at,
            user: Some(self.user.to_string()),
        }
    }
}
