// Player advancement/statistic file interpretation

use serde_json::Value;

use crate::entities::{AdvancementEntry, StatEntry};

const STATS_ROOT_KEY: &str = "stats";
const DATA_VERSION_KEY: &str = "DataVersion";
const KEY_SEPARATOR: &str = ":";

/// Every top-level field becomes one entry holding the field's compact JSON.
pub fn advancement_entries(root: &Value) -> Vec<AdvancementEntry> {
    let Some(object) = root.as_object() else {
        return Vec::new();
    };
    object
        .iter()
        .map(|(key, value)| AdvancementEntry {
            key: key.clone(),
            value: value.to_string(),
        })
        .collect()
}

/// Flattens a statistics document into `category:subkey` rows.
///
/// The `stats` object is used when present, otherwise the root itself.
/// A top-level `DataVersion` is skipped, numeric leaves become rows,
/// nested objects recurse and any other leaf is ignored.
pub fn flatten_stats(root: &Value) -> Vec<StatEntry> {
    let source = match root.get(STATS_ROOT_KEY) {
        Some(stats) if stats.is_object() => stats,
        _ => root,
    };
    let mut out = Vec::new();
    flatten_into(source, "", &mut out);
    out
}

fn flatten_into(node: &Value, prefix: &str, out: &mut Vec<StatEntry>) {
    let Some(object) = node.as_object() else {
        return;
    };
    for (field, value) in object {
        if prefix.is_empty() && field == DATA_VERSION_KEY {
            continue;
        }
        let key = if prefix.is_empty() {
            field.clone()
        } else {
            format!("{}{}{}", prefix, KEY_SEPARATOR, field)
        };
        if value.is_object() {
            flatten_into(value, &key, out);
        } else if let Some(number) = numeric_leaf(value) {
            out.push(StatEntry { key, value: number });
        }
    }
}

fn numeric_leaf(value: &Value) -> Option<i64> {
    if !value.is_number() {
        return None;
    }
    value
        .as_i64()
        .or_else(|| value.as_u64().map(|raw| i64::try_from(raw).unwrap_or(i64::MAX)))
        .or_else(|| value.as_f64().map(|raw| raw as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(entries: &[StatEntry]) -> Vec<(&str, i64)> {
        let mut out: Vec<(&str, i64)> = entries
            .iter()
            .map(|entry| (entry.key.as_str(), entry.value))
            .collect();
        out.sort();
        out
    }

    #[test]
    fn nested_stats_flatten_with_colon_paths() {
        let doc = json!({
            "stats": {
                "minecraft:custom": {"minecraft:jump": 12, "minecraft:play_time": 3600},
                "minecraft:mined": {"minecraft:stone": 7}
            },
            "DataVersion": 3465
        });
        assert_eq!(
            keys(&flatten_stats(&doc)),
            vec![
                ("minecraft:custom:minecraft:jump", 12),
                ("minecraft:custom:minecraft:play_time", 3600),
                ("minecraft:mined:minecraft:stone", 7),
            ]
        );
    }

    #[test]
    fn root_is_used_without_stats_object_and_data_version_skipped() {
        let doc = json!({
            "DataVersion": 1343,
            "stat.jump": 4,
            "stat.walkOneCm": 10.9,
            "note": "ignored"
        });
        assert_eq!(
            keys(&flatten_stats(&doc)),
            vec![("stat.jump", 4), ("stat.walkOneCm", 10)]
        );
    }

    #[test]
    fn nested_data_version_is_kept() {
        let doc = json!({"stats": {"custom": {"DataVersion": 2}}});
        assert_eq!(keys(&flatten_stats(&doc)), vec![("custom:DataVersion", 2)]);
    }

    #[test]
    fn advancement_values_are_compact_json() {
        let doc = json!({
            "minecraft:story/root": {"criteria": {"crafting_table": "2024-01-01 10:00:00 +0000"}, "done": true},
            "DataVersion": 3465
        });
        let entries = advancement_entries(&doc);
        assert_eq!(entries.len(), 2);
        let root = entries
            .iter()
            .find(|entry| entry.key == "minecraft:story/root")
            .expect("root advancement");
        assert_eq!(
            root.value,
            r#"{"criteria":{"crafting_table":"2024-01-01 10:00:00 +0000"},"done":true}"#
        );
    }

    #[test]
    fn non_object_documents_yield_nothing() {
        assert!(advancement_entries(&json!([1, 2])).is_empty());
        assert!(flatten_stats(&json!(5)).is_empty());
    }
}
