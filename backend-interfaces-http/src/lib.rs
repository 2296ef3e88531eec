pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod rpc;

pub use error::*;
pub use handlers::*;
pub use middleware::*;
pub use routes::*;
pub use rpc::*;

#[cfg(test)]
mod testing;
