use std::collections::BTreeSet;

/// Trimmed, non-empty, de-duplicated key filter. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterKeys(BTreeSet<String>);

impl FilterKeys {
    pub fn from_raw(keys: Option<Vec<String>>) -> Option<Self> {
        let set: BTreeSet<String> = keys
            .unwrap_or_default()
            .into_iter()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .collect();
        if set.is_empty() {
            None
        } else {
            Some(Self(set))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }
}
