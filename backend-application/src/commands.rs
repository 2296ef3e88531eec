pub mod balance_commands;
pub mod host_ingest_commands;
pub mod scan_commands;

pub use balance_commands::*;
pub use host_ingest_commands::*;
pub use scan_commands::*;
