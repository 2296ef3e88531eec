// Domain value objects
pub mod filter_keys;
pub mod identifiers;
pub mod invalid_argument;
pub mod ordering;
pub mod pagination;
pub mod session_event_type;
pub mod source_kind;
pub mod windows;

pub use filter_keys::*;
pub use identifiers::*;
pub use invalid_argument::*;
pub use ordering::*;
pub use pagination::*;
pub use session_event_type::*;
pub use source_kind::*;
pub use windows::*;
