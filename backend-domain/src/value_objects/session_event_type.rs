// Session event type value object

use serde::{Deserialize, Serialize};

use crate::value_objects::InvalidArgument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionEventType {
    Join,
    Quit,
    AbnormalQuit,
}

impl SessionEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionEventType::Join => "JOIN",
            SessionEventType::Quit => "QUIT",
            SessionEventType::AbnormalQuit => "ABNORMAL_QUIT",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, InvalidArgument> {
        match raw.trim().to_uppercase().as_str() {
            "JOIN" => Ok(SessionEventType::Join),
            "QUIT" => Ok(SessionEventType::Quit),
            "ABNORMAL_QUIT" => Ok(SessionEventType::AbnormalQuit),
            _ => Err(InvalidArgument::new(
                "eventType must be JOIN, QUIT or ABNORMAL_QUIT",
            )),
        }
    }

    pub fn ends_session(&self) -> bool {
        !matches!(self, SessionEventType::Join)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_any_case() {
        assert_eq!(SessionEventType::parse("join").unwrap(), SessionEventType::Join);
        assert_eq!(
            SessionEventType::parse(" abnormal_quit ").unwrap(),
            SessionEventType::AbnormalQuit
        );
        assert!(SessionEventType::parse("LOGIN").is_err());
    }

    #[test]
    fn serializes_as_stored_text() {
        let json = serde_json::to_string(&SessionEventType::AbnormalQuit).unwrap();
        assert_eq!(json, "\"ABNORMAL_QUIT\"");
    }
}
