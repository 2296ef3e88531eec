// Host context entities
// Live state owned by the game host, mirrored by the host-context worker

use serde::{Deserialize, Serialize};

use crate::value_objects::SessionEventType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnlinePlayer {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub health: f64,
    #[serde(default)]
    pub max_health: f64,
    #[serde(default)]
    pub game_mode: Option<String>,
    #[serde(default)]
    pub world: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldClock {
    pub world: String,
    pub time: i64,
    pub full_time: i64,
    #[serde(default)]
    pub do_daylight_cycle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServerTime {
    pub world: Option<String>,
    pub time: Option<i64>,
    pub full_time: Option<i64>,
    pub do_daylight_cycle: Option<String>,
}

impl From<&WorldClock> for ServerTime {
    fn from(clock: &WorldClock) -> Self {
        Self {
            world: Some(clock.world.clone()),
            time: Some(clock.time),
            full_time: Some(clock.full_time),
            do_daylight_cycle: clock.do_daylight_cycle.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServerBasics {
    pub server_max_players: i64,
    pub online_player_count: i64,
}

/// Scoreboard objective holding player balances.
pub const BALANCE_OBJECTIVE: &str = "mtr_balance";

/// Scores are 32-bit on the host.
pub fn clamp_score(value: i64) -> i64 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub player: String,
    pub balance: i64,
}

/// Full replacement of the mirrored host state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HostSnapshot {
    #[serde(default)]
    pub max_players: Option<i64>,
    #[serde(default)]
    pub worlds: Vec<WorldClock>,
    #[serde(default)]
    pub players: Vec<OnlinePlayer>,
    #[serde(default)]
    pub balances: Option<Vec<BalanceEntry>>,
}

/// A join/quit observed by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostSessionEvent {
    pub event_type: SessionEventType,
    #[serde(default)]
    pub occurred_at: Option<i64>,
    pub player_uuid: String,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub player_ip: Option<String>,
    #[serde(default)]
    pub world_name: Option<String>,
    #[serde(default)]
    pub dimension_key: Option<String>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub z: Option<f64>,
    #[serde(default)]
    pub health: Option<f64>,
    #[serde(default)]
    pub max_health: Option<f64>,
    #[serde(default)]
    pub game_mode: Option<String>,
}
