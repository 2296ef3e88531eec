// Record store repositories

pub mod change_log_store;
pub mod file_sync_store;
pub mod identity_store;
pub mod nbt_cache_store;
pub mod player_record_store;
pub mod read_only_sql;
pub mod schema;
pub mod session_store;
pub mod sqlite_store;

pub use change_log_store::*;
pub use file_sync_store::*;
pub use identity_store::*;
pub use nbt_cache_store::*;
pub use sqlite_store::*;
