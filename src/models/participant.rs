//! Participant models

use serde::{Deserialize, Serialize};

use crate::session::SessionState;

/// Display name of the local user in rosters and chat.
pub const LOCAL_PARTICIPANT_NAME: &str = "You";

/// A meeting participant as shown in tiles and the participants panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub is_host: bool,
    pub is_muted: bool,
    pub has_video: bool,
    pub is_hand_raised: bool,
}

impl Participant {
    fn new(id: &str, name: &str, is_host: bool, is_muted: bool, has_video: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            is_host,
            is_muted,
            has_video,
            is_hand_raised: false,
        }
    }

    /// First letter of each word in the name ("Alice Johnson" -> "AJ").
    pub fn initials(&self) -> String {
        initials(&self.name)
    }

    pub fn is_local(&self) -> bool {
        self.name == LOCAL_PARTICIPANT_NAME
    }
}

/// First letter of each whitespace-separated word, uppercased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Fixed roster for the simulated meeting room. The local user is first.
pub fn mock_roster() -> Vec<Participant> {
    let mut bob = Participant::new("3", "Bob Smith", false, true, false);
    bob.is_hand_raised = true;

    vec![
        Participant::new("1", LOCAL_PARTICIPANT_NAME, true, false, true),
        Participant::new("2", "Alice Johnson", false, false, true),
        bob,
        Participant::new("4", "Carol Davis", false, false, true),
        Participant::new("5", "David Wilson", false, true, true),
        Participant::new("6", "Emma Brown", false, false, false),
    ]
}

/// Copy of `roster` where the local entry reflects the current session flags.
pub fn roster_with_session(roster: &[Participant], session: &SessionState) -> Vec<Participant> {
    roster
        .iter()
        .map(|p| {
            if p.is_local() {
                Participant {
                    is_muted: session.microphone_muted,
                    has_video: session.camera_enabled,
                    is_hand_raised: session.hand_raised,
                    ..p.clone()
                }
            } else {
                p.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Alice Johnson"), "AJ");
        assert_eq!(initials("John Doe"), "JD");
        assert_eq!(initials("  carol   davis "), "CD");
        assert_eq!(initials("You"), "Y");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_mock_roster() {
        let roster = mock_roster();
        assert_eq!(roster.len(), 6);
        assert!(roster[0].is_local());
        assert!(roster[0].is_host);
        assert_eq!(roster.iter().filter(|p| p.is_host).count(), 1);

        let bob = roster.iter().find(|p| p.name == "Bob Smith").unwrap();
        assert!(bob.is_muted);
        assert!(!bob.has_video);
        assert!(bob.is_hand_raised);
    }

    #[test]
    fn test_roster_reflects_session() {
        let roster = mock_roster();
        let mut session = SessionState::default();
        session.toggle_microphone();
        session.toggle_camera();
        session.toggle_hand_raise();

        let view = roster_with_session(&roster, &session);
        let me = &view[0];
        assert!(me.is_muted);
        assert!(!me.has_video);
        assert!(me.is_hand_raised);

        // Remote participants are untouched.
        assert_eq!(&view[1..], &roster[1..]);
    }
}
