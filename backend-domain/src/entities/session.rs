// Player session entity

use serde::{Deserialize, Serialize};

use crate::value_objects::{SessionEventType, SessionWindow};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSession {
    pub id: i64,
    pub event_type: String,
    pub occurred_at: i64,
    pub player_uuid: String,
    pub player_name: Option<String>,
    pub player_ip: Option<String>,
    pub world_name: Option<String>,
    pub dimension_key: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPlayerSession {
    pub event_type: SessionEventType,
    pub occurred_at: i64,
    pub player_uuid: String,
    pub player_name: Option<String>,
    pub player_ip: Option<String>,
    pub world_name: Option<String>,
    pub dimension_key: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionFilter {
    pub player_uuid: Option<String>,
    pub event_type: Option<SessionEventType>,
    pub window: SessionWindow,
}
