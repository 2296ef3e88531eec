// Change-log file discovery rules

use std::path::{Path, PathBuf};

const LOG_DIR_NAME: &str = "logs";
const LOG_EXTENSION: &str = "csv";

/// Files considered per context once the context has been ingested before.
pub const WARM_CONTEXT_FILE_LIMIT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFileCandidate {
    pub path: PathBuf,
    pub modified_millis: i64,
}

/// A `.csv` file whose immediate parent directory is named `logs`, both case-insensitive.
pub fn is_change_log_file(path: &Path) -> bool {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(LOG_EXTENSION))
        .unwrap_or(false);
    let in_logs_dir = path
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .map(|name| name.eq_ignore_ascii_case(LOG_DIR_NAME))
        .unwrap_or(false);
    is_csv && in_logs_dir
}

/// Relative directory from the world root to the file's parent, `/`-separated.
pub fn dimension_context(world_root: &Path, file: &Path) -> Option<String> {
    let parent = file.parent()?;
    let relative = parent.strip_prefix(world_root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|part| part.as_os_str().to_string_lossy().to_string())
        .collect();
    Some(parts.join("/"))
}

/// Newest first; a warm context only looks at its most recent files.
pub fn select_change_log_files(
    mut files: Vec<LogFileCandidate>,
    context_is_warm: bool,
) -> Vec<LogFileCandidate> {
    files.sort_by(|a, b| {
        b.modified_millis
            .cmp(&a.modified_millis)
            .then_with(|| a.path.cmp(&b.path))
    });
    if context_is_warm {
        files.truncate(WARM_CONTEXT_FILE_LIMIT);
    }
    files
}

/// Record number after which a stale file's records are appended.
/// A file that shrank, or whose already consumed records changed, was replaced and starts over.
pub fn append_cursor(record_count: i64, rows_consumed: i64, prefix_unchanged: bool) -> i64 {
    if record_count < rows_consumed || !prefix_unchanged {
        0
    } else {
        rows_consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, modified_millis: i64) -> LogFileCandidate {
        LogFileCandidate {
            path: PathBuf::from(name),
            modified_millis,
        }
    }

    #[test]
    fn only_csv_directly_under_logs_matches() {
        assert!(is_change_log_file(Path::new("world/mtr/logs/2024-01-01.csv")));
        assert!(is_change_log_file(Path::new("world/mtr/LOGS/a.CSV")));
        assert!(!is_change_log_file(Path::new("world/mtr/logs/old/a.csv")));
        assert!(!is_change_log_file(Path::new("world/mtr/logs/a.txt")));
    }

    #[test]
    fn context_is_relative_parent_path() {
        let root = Path::new("/srv/world");
        let file = Path::new("/srv/world/mtr/minecraft/overworld/logs/a.csv");
        assert_eq!(
            dimension_context(root, file).as_deref(),
            Some("mtr/minecraft/overworld/logs")
        );
        assert_eq!(dimension_context(root, Path::new("/elsewhere/logs/a.csv")), None);
    }

    #[test]
    fn cold_context_keeps_all_files_newest_first() {
        let files = vec![candidate("a", 1), candidate("b", 3), candidate("c", 2)];
        let selected = select_change_log_files(files, false);
        let names: Vec<_> = selected.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            names,
            vec![PathBuf::from("b"), PathBuf::from("c"), PathBuf::from("a")]
        );
    }

    #[test]
    fn warm_context_keeps_two_most_recent() {
        let files = vec![
            candidate("a", 1),
            candidate("b", 3),
            candidate("c", 2),
            candidate("d", 4),
        ];
        let selected = select_change_log_files(files, true);
        let names: Vec<_> = selected.iter().map(|f| f.path.clone()).collect();
        assert_eq!(names, vec![PathBuf::from("d"), PathBuf::from("b")]);
    }

    #[test]
    fn shrunk_file_restarts_cursor() {
        assert_eq!(append_cursor(10, 4, true), 4);
        assert_eq!(append_cursor(4, 4, true), 4);
        assert_eq!(append_cursor(2, 4, true), 0);
    }

    #[test]
    fn rewritten_prefix_restarts_cursor() {
        assert_eq!(append_cursor(4, 4, false), 0);
        assert_eq!(append_cursor(9, 4, false), 0);
    }
}
