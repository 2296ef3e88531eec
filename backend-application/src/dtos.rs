// Request and response payloads exchanged with the transport layer

pub mod host_ingest;
pub mod requests;
pub mod responses;

pub use host_ingest::*;
pub use requests::*;
pub use responses::*;
