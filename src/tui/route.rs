//! Navigation targets, written the same way as web paths.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::models::MeetingId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("meeting route needs a meeting id")]
    EmptyMeetingId,
    #[error("no such page: {0}")]
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Join,
    Schedule,
    Settings,
    Meeting(MeetingId),
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => return Ok(Route::Dashboard),
            "/join" => return Ok(Route::Join),
            "/schedule" => return Ok(Route::Schedule),
            "/settings" => return Ok(Route::Settings),
            _ => {}
        }

        if let Some(id) = trimmed.strip_prefix("/meeting") {
            if id.is_empty() {
                return Err(RouteError::EmptyMeetingId);
            }
            if let Some(id) = id.strip_prefix('/') {
                if id.contains('/') {
                    return Err(RouteError::NotFound(path.to_string()));
                }
                let id = MeetingId::parse(id).map_err(|_| RouteError::EmptyMeetingId)?;
                return Ok(Route::Meeting(id));
            }
        }

        Err(RouteError::NotFound(path.to_string()))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Dashboard => f.write_str("/"),
            Route::Join => f.write_str("/join"),
            Route::Schedule => f.write_str("/schedule"),
            Route::Settings => f.write_str("/settings"),
            Route::Meeting(id) => write!(f, "/meeting/{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_static_routes() {
        assert_eq!("/".parse(), Ok(Route::Dashboard));
        assert_eq!("".parse(), Ok(Route::Dashboard));
        assert_eq!("/join".parse(), Ok(Route::Join));
        assert_eq!("/schedule/".parse(), Ok(Route::Schedule));
        assert_eq!("/settings".parse(), Ok(Route::Settings));
    }

    #[test]
    fn test_parse_meeting() {
        let route: Route = "/meeting/123-456-789".parse().unwrap();
        assert_eq!(route, Route::Meeting(MeetingId::parse("123-456-789").unwrap()));
        assert_eq!(route.to_string(), "/meeting/123-456-789");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("/meeting".parse::<Route>(), Err(RouteError::EmptyMeetingId));
        assert_eq!("/meeting/".parse::<Route>(), Err(RouteError::EmptyMeetingId));
        assert_eq!(
            "/meetingroom".parse::<Route>(),
            Err(RouteError::NotFound("/meetingroom".to_string()))
        );
        assert!(matches!("/meeting/a/b".parse::<Route>(), Err(RouteError::NotFound(_))));
        assert!(matches!("/nope".parse::<Route>(), Err(RouteError::NotFound(_))));
    }

    #[test]
    fn test_display_round_trip() {
        for path in ["/", "/join", "/schedule", "/settings", "/meeting/personal-room"] {
            let route: Route = path.parse().unwrap();
            assert_eq!(route.to_string(), path);
        }
    }
}
