//! Checkout errors.

use std::time::Duration;

use foodora::{cart::CartError, checkout::ValidationError};
use thiserror::Error;

use crate::domain::orders::OrdersServiceError;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("failed to submit order: {0}")]
    Submission(#[source] OrdersServiceError),

    #[error("order submission timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("cannot {action} while checkout is {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },
}
