use tonic::Status;

use crate::error::AppError;

/// API-specific error mapping that converts AppError into RPC outcomes.
impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        match err {
            AppError::InvalidId(msg) => Status::invalid_argument(msg),
            AppError::NotFound(msg) => Status::not_found(msg),
            AppError::Decode(msg) => Status::unavailable(msg),
            AppError::Database(msg) => Status::internal(msg),
            AppError::Config(msg) => Status::internal(msg),
        }
    }
}
