//! Meeting identifiers and the dashboard's meeting list

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of a generated meeting id.
const GENERATED_ID_LEN: usize = 10;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Id of the always-available personal meeting room.
pub const PERSONAL_ROOM_ID: &str = "personal-room";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeetingIdError {
    #[error("meeting id must not be empty")]
    Empty,
    #[error("meeting id must not contain '/'")]
    ContainsSlash,
    #[error("could not read random bytes: {0}")]
    Entropy(String),
}

/// Opaque meeting identifier: non-empty, trimmed and free of `/` so it
/// always fits one path segment of `/meeting/<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MeetingId(String);

impl MeetingId {
    pub fn parse(raw: &str) -> Result<Self, MeetingIdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MeetingIdError::Empty);
        }
        if trimmed.contains('/') {
            return Err(MeetingIdError::ContainsSlash);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// A fresh random id of ten base-36 characters.
    pub fn generate() -> Result<Self, MeetingIdError> {
        let mut buf = [0u8; GENERATED_ID_LEN];
        getrandom::getrandom(&mut buf).map_err(|e| MeetingIdError::Entropy(e.to_string()))?;
        let id = buf
            .iter()
            .map(|b| BASE36[(*b as usize) % BASE36.len()] as char)
            .collect();
        Ok(Self(id))
    }

    pub fn personal_room() -> Self {
        Self(PERSONAL_ROOM_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Meetings whose id mentions "wait" or "secure" put joiners in the
    /// waiting room until the host admits them.
    pub fn requires_waiting_room(&self) -> bool {
        self.0.contains("wait") || self.0.contains("secure")
    }

    /// Shareable link under `base_url`.
    pub fn link(&self, base_url: &str) -> String {
        format!("{}/meeting/{}", base_url.trim_end_matches('/'), self.0)
    }
}

impl fmt::Display for MeetingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for MeetingId {
    type Error = MeetingIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MeetingId> for String {
    fn from(id: MeetingId) -> Self {
        id.0
    }
}

/// Whether a listed meeting is still ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    Upcoming,
    Completed,
}

impl MeetingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Upcoming => "upcoming",
            MeetingStatus::Completed => "completed",
        }
    }
}

/// Entry in the dashboard's "Recent Meetings" list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentMeeting {
    pub id: MeetingId,
    pub title: String,
    pub time: String,
    pub date: String,
    pub participants: u32,
    pub status: MeetingStatus,
}

pub fn mock_recent_meetings() -> Vec<RecentMeeting> {
    [
        ("123-456-789", "Team Standup", "10:00 AM", "Today", 8, MeetingStatus::Upcoming),
        ("987-654-321", "Client Presentation", "2:00 PM", "Today", 12, MeetingStatus::Upcoming),
        ("456-789-123", "Project Review", "9:00 AM", "Yesterday", 6, MeetingStatus::Completed),
    ]
    .into_iter()
    .map(|(id, title, time, date, participants, status)| RecentMeeting {
        id: MeetingId(id.to_string()),
        title: title.to_string(),
        time: time.to_string(),
        date: date.to_string(),
        participants,
        status,
    })
    .collect()
}

/// Figures for the dashboard's "This Week" card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyStats {
    pub meeting_minutes: u32,
    pub meetings: u32,
    pub screen_shares: u32,
}

impl WeeklyStats {
    /// "4h 32m" style duration.
    pub fn meeting_time_label(&self) -> String {
        format!("{}h {}m", self.meeting_minutes / 60, self.meeting_minutes % 60)
    }
}

impl Default for WeeklyStats {
    fn default() -> Self {
        Self {
            meeting_minutes: 4 * 60 + 32,
            meetings: 12,
            screen_shares: 8,
        }
    }
}
