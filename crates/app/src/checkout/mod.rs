//! Checkout
//!
//! Drives one checkout from the delivery form to the acknowledged order confirmation.

mod errors;
mod flow;

pub use errors::CheckoutError;
pub use flow::{Acknowledgement, CheckoutFlow, CheckoutState, Destination};
