use std::env;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::warn;
use uuid::Uuid;

use backend_domain::RuntimeConfig;

use super::validation::{validate_bind_addr, validate_key, validate_worlds};

const DEFAULT_INTERVAL_TICKS: i64 = 200;
const DEFAULT_NBT_CACHE_TTL_MINUTES: u64 = 10;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub key: String,
    pub server_root: String,
    pub worlds: Vec<String>,
    pub database_path: String,
    pub interval_time: i64,
    pub nbt_cache_ttl_minutes: u64,
    pub host_call_timeout_seconds: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:48080".to_string(),
            key: String::new(),
            server_root: ".".to_string(),
            worlds: vec!["world".to_string()],
            database_path: "./beacon.db".to_string(),
            interval_time: DEFAULT_INTERVAL_TICKS,
            nbt_cache_ttl_minutes: DEFAULT_NBT_CACHE_TTL_MINUTES,
            host_call_timeout_seconds: 5,
            max_body_bytes: 2 * 1024 * 1024,
            request_timeout_seconds: 15,
            version: 1,
            log_dir: None,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = config_path();
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse {}", file_path.display()))?
        } else {
            warn!("{} not found, using defaults", file_path.display());
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.normalize();
        if config.key.is_empty() {
            config.key = generate_key();
            warn!(
                "no key configured, generated a new one (written to {}): {}",
                file_path.display(),
                config.key
            );
            persist_key(file_path, &config).await?;
        }
        config.resolve_paths(base_dir);
        config.validate()?;
        Ok(config)
    }

    /// `log_dir` from the environment or the config file, read before logging is set up.
    pub fn log_dir_hint() -> Option<String> {
        let path = config_path();
        let file_path = Path::new(&path);
        let raw = env::var("BEACON_LOG_DIR").ok().or_else(|| {
            let content = std::fs::read_to_string(file_path).ok()?;
            toml::from_str::<AppConfig>(&content).ok()?.log_dir
        })?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match file_path.parent() {
            Some(base) => Some(resolve_path(base, trimmed)),
            None => Some(trimmed.to_string()),
        }
    }

    pub fn normalize(&mut self) {
        self.key = self.key.trim().to_string();
        if let Some(log_dir) = &self.log_dir {
            if log_dir.trim().is_empty() {
                self.log_dir = None;
            }
        }
        self.worlds = normalize_list(std::mem::take(&mut self.worlds));
        if self.interval_time <= 0 {
            self.interval_time = DEFAULT_INTERVAL_TICKS;
        }
        if self.nbt_cache_ttl_minutes == 0 {
            self.nbt_cache_ttl_minutes = DEFAULT_NBT_CACHE_TTL_MINUTES;
        }
        if self.version == 0 {
            self.version = 1;
        }
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.server_root = resolve_path(base, &self.server_root);
        self.database_path = resolve_path(base, &self.database_path);
        if let Some(log_dir) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, log_dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_bind_addr(&self.bind_addr)?;
        validate_key(&self.key)?;
        validate_worlds(&self.worlds)?;
        if self.database_path.trim().is_empty() {
            return Err(anyhow!("database_path must not be empty"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        Ok(())
    }

    /// World folders as paths under `server_root`.
    pub fn world_dirs(&self) -> Vec<String> {
        let root = Path::new(&self.server_root);
        self.worlds
            .iter()
            .map(|world| resolve_path(root, world))
            .collect()
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            key: self.key.clone(),
            server_root: self.server_root.clone(),
            world_dirs: self.world_dirs(),
            database_path: self.database_path.clone(),
            interval_time_ticks: self.interval_time.unsigned_abs(),
            nbt_cache_ttl_minutes: self.nbt_cache_ttl_minutes,
            host_call_timeout_seconds: self.host_call_timeout_seconds,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
            version: self.version,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("BEACON_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("BEACON_KEY") {
            self.key = value;
        }
        if let Ok(value) = env::var("BEACON_SERVER_ROOT") {
            self.server_root = value;
        }
        if let Ok(value) = env::var("BEACON_WORLDS") {
            self.worlds = parse_env_list(&value);
        }
        if let Ok(value) = env::var("BEACON_DATABASE_PATH") {
            self.database_path = value;
        }
        if let Ok(value) = env::var("BEACON_INTERVAL_TIME") {
            self.interval_time = value.parse().unwrap_or(self.interval_time);
        }
        if let Ok(value) = env::var("BEACON_NBT_CACHE_TTL_MINUTES") {
            self.nbt_cache_ttl_minutes = value.parse().unwrap_or(self.nbt_cache_ttl_minutes);
        }
        if let Ok(value) = env::var("BEACON_HOST_CALL_TIMEOUT_SECONDS") {
            self.host_call_timeout_seconds =
                value.parse().unwrap_or(self.host_call_timeout_seconds);
        }
        if let Ok(value) = env::var("BEACON_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("BEACON_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("BEACON_VERSION") {
            self.version = value.parse().unwrap_or(self.version);
        }
        if let Ok(value) = env::var("BEACON_LOG_DIR") {
            self.log_dir = Some(value);
        }
    }
}

fn config_path() -> String {
    env::var("BEACON_CONFIG").unwrap_or_else(|_| "./config.toml".to_string())
}

/// 64 alphanumeric characters.
fn generate_key() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// Writes the generated key into the config file, creating it when absent.
async fn persist_key(file_path: &Path, config: &AppConfig) -> Result<()> {
    let content = if file_path.exists() {
        let raw = fs::read_to_string(file_path).await?;
        let mut table: toml::Table = toml::from_str(&raw)?;
        table.insert("key".to_string(), toml::Value::String(config.key.clone()));
        toml::to_string_pretty(&table)?
    } else {
        if let Some(parent) = file_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        toml::to_string_pretty(config)?
    };
    fs::write(file_path, content)
        .await
        .with_context(|| format!("failed to write key to {}", file_path.display()))
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

fn parse_env_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn normalize_list(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let trimmed = value.trim().to_string();
        if !trimmed.is_empty() && !out.contains(&trimmed) {
            out.push(trimmed);
        }
    }
    out
}
