// Player identity entity
// uuid is immutable, name follows the latest observation

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub player_uuid: String,
    pub player_name: Option<String>,
    pub first_played: Option<i64>,
    pub last_played: Option<i64>,
    pub last_updated: Option<i64>,
}

/// Identity facts extracted from one observation.
/// Absent timestamps never replace stored ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityUpdate {
    pub player_uuid: String,
    pub player_name: String,
    pub first_played: Option<i64>,
    pub last_played: Option<i64>,
    pub observed_at: i64,
}
