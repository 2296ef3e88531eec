// NBT cache entity

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NbtCacheEntry {
    pub player_uuid: String,
    pub raw_json: String,
    pub cached_at: i64,
}

impl NbtCacheEntry {
    /// Fresh while `cached_at + ttl` is still in the future.
    pub fn is_fresh(&self, now_millis: i64, ttl_millis: i64) -> bool {
        self.cached_at.saturating_add(ttl_millis) > now_millis
    }
}
