// Identity extraction from decoded player data

use serde_json::Value;

use crate::entities::IdentityUpdate;

const BUKKIT_SECTION: &str = "bukkit";
const LAST_KNOWN_NAME: &str = "lastKnownName";
const FIRST_PLAYED: &str = "firstPlayed";
const LAST_PLAYED: &str = "lastPlayed";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedIdentity {
    pub name: Option<String>,
    pub first_played: Option<i64>,
    pub last_played: Option<i64>,
}

impl ExtractedIdentity {
    /// Only an observation carrying a name can update the identity table.
    pub fn into_update(self, player_uuid: &str, observed_at: i64) -> Option<IdentityUpdate> {
        let name = self.name?;
        Some(IdentityUpdate {
            player_uuid: player_uuid.to_string(),
            player_name: name,
            first_played: self.first_played,
            last_played: self.last_played,
            observed_at,
        })
    }
}

/// Reads name and play times from the `bukkit` compound, falling back to
/// top-level fields for the timestamps.
pub fn extract_identity(root: &Value) -> ExtractedIdentity {
    let bukkit = root.get(BUKKIT_SECTION).filter(|section| section.is_object());

    let name = bukkit
        .and_then(|section| section.get(LAST_KNOWN_NAME))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToString::to_string);

    let first_played = bukkit
        .and_then(|section| as_long(section.get(FIRST_PLAYED)))
        .or_else(|| as_long(root.get(FIRST_PLAYED)));
    let last_played = bukkit
        .and_then(|section| as_long(section.get(LAST_PLAYED)))
        .or_else(|| as_long(root.get(LAST_PLAYED)));

    ExtractedIdentity {
        name,
        first_played,
        last_played,
    }
}

fn as_long(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|raw| raw as i64)),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bukkit_section_wins_over_top_level() {
        let doc = json!({
            "bukkit": {"lastKnownName": "Alex", "firstPlayed": 100, "lastPlayed": 200},
            "firstPlayed": 1,
            "lastPlayed": 2
        });
        let identity = extract_identity(&doc);
        assert_eq!(identity.name.as_deref(), Some("Alex"));
        assert_eq!(identity.first_played, Some(100));
        assert_eq!(identity.last_played, Some(200));
    }

    #[test]
    fn timestamps_fall_back_to_top_level_and_accept_strings() {
        let doc = json!({
            "bukkit": {"lastKnownName": "Steve"},
            "firstPlayed": "1700000000000",
            "lastPlayed": 1700000500000i64
        });
        let identity = extract_identity(&doc);
        assert_eq!(identity.first_played, Some(1_700_000_000_000));
        assert_eq!(identity.last_played, Some(1_700_000_500_000));
    }

    #[test]
    fn nameless_observation_produces_no_update() {
        let doc = json!({"firstPlayed": 5});
        let identity = extract_identity(&doc);
        assert_eq!(identity.name, None);
        assert_eq!(identity.first_played, Some(5));
        assert!(identity.into_update("uuid", 10).is_none());
    }
}
