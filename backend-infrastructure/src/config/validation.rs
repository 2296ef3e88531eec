use std::net::SocketAddr;

use anyhow::{anyhow, Result};

pub fn validate_bind_addr(value: &str) -> Result<()> {
    value
        .parse::<SocketAddr>()
        .map(|_| ())
        .map_err(|err| anyhow!("invalid bind_addr: {}", err))
}

pub fn validate_worlds(worlds: &[String]) -> Result<()> {
    if worlds.is_empty() {
        return Err(anyhow!("at least one world folder must be configured"));
    }
    Ok(())
}

pub fn validate_key(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("key must not be empty"));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(anyhow!("key must not contain whitespace"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_values() {
        assert!(validate_bind_addr("0.0.0.0:48080").is_ok());
        assert!(validate_bind_addr("localhost").is_err());
        assert!(validate_worlds(&[]).is_err());
        assert!(validate_key("abc def").is_err());
        assert!(validate_key("abc").is_ok());
    }
}
