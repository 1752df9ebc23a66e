//! Meeting scheduling form and its validation

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use super::meeting::{MeetingId, MeetingIdError};

/// Start times offered by the form, every 30 minutes.
pub const TIME_SLOTS: [&str; 24] = [
    "08:00", "08:30", "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "12:00", "12:30",
    "13:00", "13:30", "14:00", "14:30", "15:00", "15:30", "16:00", "16:30", "17:00", "17:30",
    "18:00", "18:30", "19:00", "19:30",
];

/// (minutes, label)
pub const DURATION_OPTIONS: [(u32, &str); 7] = [
    (15, "15 minutes"),
    (30, "30 minutes"),
    (45, "45 minutes"),
    (60, "1 hour"),
    (90, "1.5 hours"),
    (120, "2 hours"),
    (180, "3 hours"),
];

/// (IANA name, label)
pub const TIMEZONES: [(&str, &str); 7] = [
    ("America/New_York", "Eastern Time (ET)"),
    ("America/Chicago", "Central Time (CT)"),
    ("America/Denver", "Mountain Time (MT)"),
    ("America/Los_Angeles", "Pacific Time (PT)"),
    ("Europe/London", "London (GMT)"),
    ("Europe/Paris", "Paris (CET)"),
    ("Asia/Tokyo", "Tokyo (JST)"),
];

pub const DEFAULT_DURATION_MINUTES: u32 = 60;
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Reasons a join or schedule form cannot be submitted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Meeting ID is required")]
    MissingMeetingId,
    #[error("Display name is required")]
    MissingDisplayName,
    #[error("Meeting title is required")]
    MissingTitle,
    #[error("Date is required")]
    MissingDate,
    #[error("Invalid date {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("Start time is required")]
    MissingStartTime,
    #[error("Unknown start time {0:?}")]
    UnknownStartTime(String),
    #[error("Unsupported duration: {0} minutes")]
    UnknownDuration(u32),
    #[error("Unknown timezone {0:?}")]
    UnknownTimezone(String),
    #[error(transparent)]
    MeetingId(#[from] MeetingIdError),
}

/// Validated input of the join screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRequest {
    pub meeting_id: MeetingId,
    pub display_name: String,
}

impl JoinRequest {
    pub fn new(meeting_id: &str, display_name: &str) -> Result<Self, FormError> {
        let meeting_id = MeetingId::parse(meeting_id).map_err(|e| match e {
            MeetingIdError::Empty => FormError::MissingMeetingId,
            other => FormError::MeetingId(other),
        })?;
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(FormError::MissingDisplayName);
        }
        Ok(Self {
            meeting_id,
            display_name: display_name.to_string(),
        })
    }
}

/// Raw values of the scheduling form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleForm {
    pub title: String,
    pub description: String,
    /// YYYY-MM-DD
    pub date: String,
    /// One of `TIME_SLOTS`; empty until chosen.
    pub start_time: String,
    pub duration_minutes: u32,
    pub timezone: String,
    pub require_password: bool,
    pub password: String,
    pub waiting_room: bool,
    pub mute_participants: bool,
    pub allow_recording: bool,
    /// Comma or newline separated addresses.
    pub invite_emails: String,
}

impl Default for ScheduleForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            date: String::new(),
            start_time: String::new(),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            timezone: DEFAULT_TIMEZONE.to_string(),
            require_password: false,
            password: String::new(),
            waiting_room: true,
            mute_participants: true,
            allow_recording: false,
            invite_emails: String::new(),
        }
    }
}

/// A meeting that passed validation and got an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledMeeting {
    pub id: MeetingId,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub duration_minutes: u32,
    pub timezone: String,
    pub password: Option<String>,
    pub waiting_room: bool,
    pub mute_participants: bool,
    pub allow_recording: bool,
    pub invitees: Vec<String>,
    pub link: String,
}

impl ScheduledMeeting {
    /// "Friday, March 1, 2024 at 10:00 (America/New_York)"
    pub fn when_label(&self) -> String {
        format!(
            "{} at {} ({})",
            self.date.format("%A, %B %-d, %Y"),
            self.start_time,
            self.timezone
        )
    }
}

impl ScheduleForm {
    /// Check the required fields (title, date, start time) and the choices.
    pub fn validate(&self) -> Result<NaiveDate, FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::MissingTitle);
        }
        let date_raw = self.date.trim();
        if date_raw.is_empty() {
            return Err(FormError::MissingDate);
        }
        let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate(date_raw.to_string()))?;
        if self.start_time.is_empty() {
            return Err(FormError::MissingStartTime);
        }
        if !TIME_SLOTS.contains(&self.start_time.as_str()) {
            return Err(FormError::UnknownStartTime(self.start_time.clone()));
        }
        if !DURATION_OPTIONS
            .iter()
            .any(|(minutes, _)| *minutes == self.duration_minutes)
        {
            return Err(FormError::UnknownDuration(self.duration_minutes));
        }
        if !TIMEZONES.iter().any(|(tz, _)| *tz == self.timezone) {
            return Err(FormError::UnknownTimezone(self.timezone.clone()));
        }
        Ok(date)
    }

    /// Validate, then mint a meeting id and link under `base_url`.
    pub fn submit(&self, base_url: &str) -> Result<ScheduledMeeting, FormError> {
        let date = self.validate()?;
        let id = MeetingId::generate()?;
        let link = id.link(base_url);
        let password = if self.require_password && !self.password.trim().is_empty() {
            Some(self.password.trim().to_string())
        } else {
            None
        };

        Ok(ScheduledMeeting {
            id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            date,
            start_time: self.start_time.clone(),
            duration_minutes: self.duration_minutes,
            timezone: self.timezone.clone(),
            password,
            waiting_room: self.waiting_room,
            mute_participants: self.mute_participants,
            allow_recording: self.allow_recording,
            invitees: parse_invitees(&self.invite_emails),
            link,
        })
    }
}

/// Split the invite field on commas, semicolons and newlines.
pub fn parse_invitees(raw: &str) -> Vec<String> {
    raw.split([',', ';', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Label for a duration in minutes, falling back to "N minutes".
pub fn duration_label(minutes: u32) -> String {
    DURATION_OPTIONS
        .iter()
        .find(|(m, _)| *m == minutes)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| format!("{} minutes", minutes))
}

/// Label for a timezone name, falling back to the name itself.
pub fn timezone_label(tz: &str) -> &str {
    TIMEZONES
        .iter()
        .find(|(name, _)| *name == tz)
        .map(|(_, label)| *label)
        .unwrap_or(tz)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ScheduleForm {
        ScheduleForm {
            title: "Quarterly Review".to_string(),
            date: "2024-03-01".to_string(),
            start_time: "10:00".to_string(),
            ..ScheduleForm::default()
        }
    }

    #[test]
    fn test_join_request() {
        let req = JoinRequest::new(" 123 ", " John Doe ").unwrap();
        assert_eq!(req.meeting_id.as_str(), "123");
        assert_eq!(req.display_name, "John Doe");

        assert_eq!(JoinRequest::new("", "John"), Err(FormError::MissingMeetingId));
        assert_eq!(JoinRequest::new("123", "  "), Err(FormError::MissingDisplayName));
        assert_eq!(
            JoinRequest::new("a/b", "John"),
            Err(FormError::MeetingId(MeetingIdError::ContainsSlash))
        );
    }

    #[test]
    fn test_form_defaults() {
        let form = ScheduleForm::default();
        assert_eq!(form.duration_minutes, 60);
        assert_eq!(form.timezone, "America/New_York");
        assert!(form.waiting_room);
        assert!(form.mute_participants);
        assert!(!form.allow_recording);
        assert!(!form.require_password);
    }

    #[test]
    fn test_required_fields() {
        let mut form = filled_form();
        form.title = "   ".to_string();
        assert_eq!(form.validate(), Err(FormError::MissingTitle));

        let mut form = filled_form();
        form.date.clear();
        assert_eq!(form.validate(), Err(FormError::MissingDate));

        let mut form = filled_form();
        form.date = "03/01/2024".to_string();
        assert_eq!(
            form.validate(),
            Err(FormError::InvalidDate("03/01/2024".to_string()))
        );

        let mut form = filled_form();
        form.start_time.clear();
        assert_eq!(form.validate(), Err(FormError::MissingStartTime));
    }

    #[test]
    fn test_rejects_unknown_choices() {
        let mut form = filled_form();
        form.start_time = "07:15".to_string();
        assert!(matches!(form.validate(), Err(FormError::UnknownStartTime(_))));

        let mut form = filled_form();
        form.duration_minutes = 50;
        assert_eq!(form.validate(), Err(FormError::UnknownDuration(50)));

        let mut form = filled_form();
        form.timezone = "Mars/Olympus".to_string();
        assert!(matches!(form.validate(), Err(FormError::UnknownTimezone(_))));
    }

    #[test]
    fn test_submit() {
        let mut form = filled_form();
        form.require_password = true;
        form.password = " hunter2 ".to_string();
        form.invite_emails = "a@example.com, b@example.com\nc@example.com;".to_string();

        let meeting = form.submit("https://meet.example.com").unwrap();
        assert_eq!(meeting.title, "Quarterly Review");
        assert_eq!(meeting.password.as_deref(), Some("hunter2"));
        assert_eq!(meeting.invitees.len(), 3);
        assert_eq!(
            meeting.link,
            format!("https://meet.example.com/meeting/{}", meeting.id)
        );
        assert_eq!(
            meeting.when_label(),
            "Friday, March 1, 2024 at 10:00 (America/New_York)"
        );
    }

    #[test]
    fn test_password_ignored_when_not_required() {
        let mut form = filled_form();
        form.password = "secret".to_string();
        let meeting = form.submit("https://meet.example.com").unwrap();
        assert_eq!(meeting.password, None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(duration_label(90), "1.5 hours");
        assert_eq!(duration_label(5), "5 minutes");
        assert_eq!(timezone_label("Asia/Tokyo"), "Tokyo (JST)");
        assert_eq!(timezone_label("UTC"), "UTC");
    }
}
