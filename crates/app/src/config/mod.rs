//! Application configuration
//!
//! Every setting can be given as a flag, an environment variable or a `.env` entry.

pub mod checkout;
pub mod observability;

pub use checkout::CheckoutConfig;
pub use observability::{LogFormat, LoggingConfig};
