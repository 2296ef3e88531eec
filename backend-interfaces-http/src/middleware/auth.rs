use axum::http::HeaderMap;
use sha2::{Digest, Sha256};

use backend_domain::RuntimeConfig;

/// Bearer check for the host ingest and metrics routes.
pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    key_matches(&config.key, extract_bearer(headers).as_deref())
}

/// Compares digests so the comparison does not depend on where the strings first differ.
pub fn key_matches(expected: &str, provided: Option<&str>) -> bool {
    let Some(provided) = provided else {
        return false;
    };
    if expected.is_empty() {
        return false;
    }
    Sha256::digest(expected.as_bytes()) == Sha256::digest(provided.as_bytes())
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let prefix = "Bearer ";
    if !value.starts_with(prefix) {
        return None;
    }
    let token = value[prefix.len()..].trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
