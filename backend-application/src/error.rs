use backend_domain::InvalidArgument;
use thiserror::Error;
use tracing::error;

/// Failures surfaced to clients. `Display` renders the wire error string.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("INVALID_KEY")]
    Unauthorized,
    #[error("NOT_FOUND")]
    NotFound,
    #[error("INVALID_ARGUMENT: {0}")]
    InvalidArgument(String),
    #[error("DB_ERROR: {0}")]
    Database(anyhow::Error),
    #[error("INTERNAL_ERROR: {0}")]
    Internal(anyhow::Error),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "INVALID_KEY",
            AppError::NotFound => "NOT_FOUND",
            AppError::InvalidArgument(_) => "INVALID_ARGUMENT",
            AppError::Database(_) => "DB_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        AppError::InvalidArgument(message.into())
    }
}

impl From<InvalidArgument> for AppError {
    fn from(err: InvalidArgument) -> Self {
        AppError::InvalidArgument(err.0)
    }
}

/// Logs a store failure and wraps it as `DB_ERROR`.
pub(crate) fn database(action: &'static str) -> impl FnOnce(anyhow::Error) -> AppError {
    move |err| {
        error!("failed to {}: {:#}", action, err);
        AppError::Database(err)
    }
}

/// Logs a host-context failure and wraps it as `INTERNAL_ERROR`.
pub(crate) fn internal(action: &'static str) -> impl FnOnce(anyhow::Error) -> AppError {
    move |err| {
        error!("failed to {}: {:#}", action, err);
        AppError::Internal(err)
    }
}
