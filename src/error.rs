use thiserror::Error;

/// Service-wide error types.
///
/// Variants correspond to the RPC outcomes callers can observe; the
/// mapping onto status codes lives in `api::errors`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
