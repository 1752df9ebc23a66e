//! In-meeting chat models

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::participant::LOCAL_PARTICIPANT_NAME;

/// One line of meeting chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: String,
    pub message: String,
    /// Wall-clock label, e.g. "10:31 AM".
    pub timestamp: String,
}

impl ChatMessage {
    /// A message typed by the local user at `at`.
    pub fn local(message: &str, at: DateTime<Local>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender: LOCAL_PARTICIPANT_NAME.to_string(),
            message: message.to_string(),
            timestamp: format_timestamp(at),
        }
    }

    pub fn is_local(&self) -> bool {
        self.sender == LOCAL_PARTICIPANT_NAME
    }
}

/// 12-hour clock label without a leading zero ("9:05 AM").
pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format("%-I:%M %p").to_string()
}

/// Chat history shown when the meeting room opens.
pub fn mock_chat_messages() -> Vec<ChatMessage> {
    [
        ("1", "Alice Johnson", "Hello everyone!", "10:30 AM"),
        ("2", "Bob Smith", "Can you hear me clearly?", "10:31 AM"),
        ("3", LOCAL_PARTICIPANT_NAME, "Yes, audio is good", "10:31 AM"),
        ("4", "Carol Davis", "Great presentation so far", "10:35 AM"),
    ]
    .into_iter()
    .map(|(id, sender, message, timestamp)| ChatMessage {
        id: id.to_string(),
        sender: sender.to_string(),
        message: message.to_string(),
        timestamp: timestamp.to_string(),
    })
    .collect()
}
