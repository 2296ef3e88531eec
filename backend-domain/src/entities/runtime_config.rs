use std::time::Duration;

pub const TICKS_PER_SECOND: u64 = 20;

/// Immutable configuration handed to every component at construction.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub key: String,
    pub server_root: String,
    pub world_dirs: Vec<String>,
    pub database_path: String,
    pub interval_time_ticks: u64,
    pub nbt_cache_ttl_minutes: u64,
    pub host_call_timeout_seconds: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub version: u32,
}

impl RuntimeConfig {
    pub fn scan_interval(&self) -> Duration {
        Duration::from_millis(self.interval_time_ticks.saturating_mul(1000 / TICKS_PER_SECOND))
    }

    pub fn interval_time_seconds(&self) -> f64 {
        self.interval_time_ticks as f64 / TICKS_PER_SECOND as f64
    }

    pub fn nbt_cache_ttl_millis(&self) -> i64 {
        i64::try_from(self.nbt_cache_ttl_minutes.saturating_mul(60_000)).unwrap_or(i64::MAX)
    }

    pub fn host_call_timeout(&self) -> Duration {
        Duration::from_secs(self.host_call_timeout_seconds)
    }
}
