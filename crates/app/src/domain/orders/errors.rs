//! Orders service errors.

use std::num::TryFromIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("order belongs to another user")]
    Unauthorized,

    #[error("idempotency key already used for a different order")]
    IdempotencyConflict,

    #[error("invalid amount value")]
    InvalidAmount(#[from] TryFromIntError),

    #[error("order store unavailable: {0}")]
    Unavailable(String),
}
