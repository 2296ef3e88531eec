// File scanners feeding the record store

pub mod advancement_stats;
pub mod change_log;
pub mod identity_blobs;
pub mod world_files;

pub use advancement_stats::*;
pub use change_log::*;
pub use identity_blobs::*;
pub use world_files::*;
