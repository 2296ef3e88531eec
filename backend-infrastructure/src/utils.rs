use std::fs::Metadata;
use std::path::Path;
use std::time::UNIX_EPOCH;

use chrono::Utc;

pub fn current_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Modification time in epoch milliseconds, 0 when the platform cannot tell.
pub fn modified_millis(metadata: &Metadata) -> i64 {
    metadata
        .modified()
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// `path` relative to `root` with `/` separators; the full path when it lies outside.
pub fn slash_path(root: &Path, path: &Path) -> String {
    let Ok(relative) = path.strip_prefix(root) else {
        return path.to_string_lossy().to_string();
    };
    relative
        .components()
        .map(|part| part.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_path_is_root_relative() {
        let root = Path::new("/srv/mc");
        assert_eq!(
            slash_path(root, Path::new("/srv/mc/world/stats/a.json")),
            "world/stats/a.json"
        );
    }
}
