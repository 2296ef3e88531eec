pub mod ingest_handlers;
pub mod ops_handlers;
pub mod rpc_handlers;
pub mod ws_handlers;

pub use ingest_handlers::*;
pub use ops_handlers::*;
pub use rpc_handlers::*;
pub use ws_handlers::*;
