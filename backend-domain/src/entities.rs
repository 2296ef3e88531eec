// Domain entities

pub mod change_log;
pub mod file_sync;
pub mod host;
pub mod nbt_cache;
pub mod page;
pub mod player;
pub mod records;
pub mod runtime_config;
pub mod scan;
pub mod session;
pub mod sql;

pub use change_log::*;
pub use file_sync::*;
pub use host::*;
pub use nbt_cache::*;
pub use page::*;
pub use player::*;
pub use records::*;
pub use runtime_config::*;
pub use scan::*;
pub use session::*;
pub use sql::*;
