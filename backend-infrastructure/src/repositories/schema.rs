// Record store schema
// Every statement is idempotent and runs on each startup

pub const SCHEMA_VERSION: i64 = 2;

pub const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS schema_version (
        id INTEGER PRIMARY KEY CHECK (id = 1),
        version INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS player_sessions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        event_type TEXT NOT NULL,
        occurred_at INTEGER NOT NULL,
        player_uuid TEXT NOT NULL,
        player_name TEXT,
        player_ip TEXT,
        world_name TEXT,
        dimension_key TEXT,
        x REAL,
        y REAL,
        z REAL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS player_advancements (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        player_uuid TEXT NOT NULL,
        advancement_key TEXT NOT NULL,
        value BLOB,
        last_updated INTEGER NOT NULL,
        UNIQUE (player_uuid, advancement_key)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS player_stats (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        player_uuid TEXT NOT NULL,
        stat_key TEXT NOT NULL,
        value INTEGER NOT NULL,
        last_updated INTEGER NOT NULL,
        UNIQUE (player_uuid, stat_key)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS mtr_logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp TEXT,
        player_name TEXT,
        player_uuid TEXT,
        class_name TEXT,
        entry_id TEXT,
        entry_name TEXT,
        position TEXT,
        change_type TEXT,
        old_data TEXT,
        new_data TEXT,
        source_file_path TEXT,
        source_line INTEGER NOT NULL,
        dimension_context TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS mtr_files (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        file_path TEXT NOT NULL UNIQUE,
        last_modified INTEGER NOT NULL,
        last_processed INTEGER NOT NULL,
        dimension_context TEXT NOT NULL,
        rows_consumed INTEGER NOT NULL DEFAULT 0,
        prefix_digest TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS file_sync_state (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        file_type TEXT NOT NULL,
        player_uuid TEXT,
        file_path TEXT NOT NULL,
        last_modified INTEGER NOT NULL,
        last_processed INTEGER NOT NULL,
        UNIQUE (file_type, file_path)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS player_identities (
        player_uuid TEXT PRIMARY KEY,
        player_name TEXT,
        first_played INTEGER,
        last_played INTEGER,
        last_updated INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS player_nbt_cache (
        player_uuid TEXT PRIMARY KEY,
        raw_json TEXT NOT NULL,
        cached_at INTEGER NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_mtr_logs_player_uuid ON mtr_logs (player_uuid)",
    "CREATE INDEX IF NOT EXISTS idx_mtr_logs_dimension_context ON mtr_logs (dimension_context)",
    "CREATE INDEX IF NOT EXISTS idx_mtr_logs_timestamp ON mtr_logs (timestamp)",
    "CREATE INDEX IF NOT EXISTS idx_mtr_files_dimension_context ON mtr_files (dimension_context)",
    "CREATE INDEX IF NOT EXISTS idx_player_sessions_player_uuid ON player_sessions (player_uuid)",
    "CREATE INDEX IF NOT EXISTS idx_player_sessions_occurred_at ON player_sessions (occurred_at)",
    "CREATE INDEX IF NOT EXISTS idx_player_identities_player_name ON player_identities (player_name)",
];

/// Columns added after a table was first shipped: (table, column, definition).
pub const ADDED_COLUMNS: &[(&str, &str, &str)] = &[("mtr_files", "prefix_digest", "TEXT")];

pub const UPSERT_SCHEMA_VERSION: &str = r#"
    INSERT INTO schema_version (id, version, updated_at) VALUES (1, ?, ?)
    ON CONFLICT(id) DO UPDATE SET version = excluded.version, updated_at = excluded.updated_at
"#;
