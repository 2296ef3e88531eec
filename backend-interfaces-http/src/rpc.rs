pub mod dispatcher;
pub mod request;

pub use dispatcher::*;
pub use request::*;
