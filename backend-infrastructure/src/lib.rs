pub mod config;
pub mod host;
pub mod nbt;
pub mod repositories;
pub mod scanners;
pub mod services;
pub mod utils;

pub use config::*;
pub use host::*;
pub use nbt::*;
pub use repositories::*;
pub use scanners::*;
pub use services::*;
pub use utils::*;
