//! Checkout Config

use std::{path::PathBuf, time::Duration};

use clap::Args;
use foodora::money::{PriceError, currency_from_code};
use rusty_money::iso::Currency;

/// Menu and order submission settings.
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// Order submission timeout in milliseconds
    #[arg(
        long,
        env = "FOODORA_SUBMIT_TIMEOUT_MS",
        default_value_t = 10_000_u64,
        global = true
    )]
    pub submit_timeout_ms: u64,

    /// ISO currency code for carts and orders
    #[arg(long, env = "FOODORA_CURRENCY", default_value = "USD", global = true)]
    pub currency: String,

    /// Fixture directory holding `catalog/<name>.yml`
    #[arg(long, env = "FOODORA_FIXTURES", default_value = "./fixtures", global = true)]
    pub fixtures: PathBuf,

    /// Catalog fixture name
    #[arg(long, env = "FOODORA_CATALOG", default_value = "menu", global = true)]
    pub catalog: String,
}

impl CheckoutConfig {
    #[must_use]
    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }

    /// Resolve the configured currency code.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::UnknownCurrency`] for unsupported codes.
    pub fn currency(&self) -> Result<&'static Currency, PriceError> {
        currency_from_code(&self.currency)
    }
}
