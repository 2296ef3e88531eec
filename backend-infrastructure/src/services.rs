pub mod health_service;
pub mod scan_scheduler;

pub use health_service::*;
pub use scan_scheduler::*;
