// Identifier value objects

/// How a request names a player: by uuid, by last known name, or both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerSelector {
    pub uuid: Option<String>,
    pub name: Option<String>,
}

impl PlayerSelector {
    pub fn new(uuid: Option<String>, name: Option<String>) -> Self {
        Self {
            uuid: normalize_optional_text(uuid),
            name: normalize_optional_text(name),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.uuid.is_none() && self.name.is_none()
    }
}

pub fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_drops_blank_parts() {
        let selector = PlayerSelector::new(Some("  ".to_string()), Some(" Steve ".to_string()));
        assert_eq!(selector.uuid, None);
        assert_eq!(selector.name.as_deref(), Some("Steve"));
        assert!(!selector.is_empty());
        assert!(PlayerSelector::new(None, Some(String::new())).is_empty());
    }
}
