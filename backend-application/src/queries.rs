pub mod balance_queries;
pub mod change_log_queries;
pub mod host_queries;
pub mod identity_queries;
pub mod nbt_queries;
pub mod player_record_queries;
pub mod players_data_queries;
pub mod session_queries;
pub mod sql_queries;

mod player_resolution;

pub use balance_queries::*;
pub use change_log_queries::*;
pub use host_queries::*;
pub use identity_queries::*;
pub use nbt_queries::*;
pub use player_record_queries::*;
pub use players_data_queries::*;
pub use session_queries::*;
pub use sql_queries::*;
