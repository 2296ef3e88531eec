// Pure domain services

pub mod change_log_selection;
pub mod identity_extract;
pub mod player_records;
pub mod sql_guard;
pub mod staleness;

pub use change_log_selection::*;
pub use identity_extract::*;
pub use player_records::*;
pub use sql_guard::*;
pub use staleness::*;
