// Backend Application Layer

pub mod commands;
pub mod dtos;
pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod queries;
pub mod state;

pub use error::AppError;
pub use metrics::Metrics;
pub use orchestrator::ScanOrchestrator;
pub use state::AppState;

#[cfg(test)]
mod testing;
