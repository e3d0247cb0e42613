//! App Context

use std::{sync::Arc, time::Duration};

use crate::{
    checkout::CheckoutFlow,
    config::CheckoutConfig,
    domain::orders::{InMemoryOrdersService, OrdersService},
};

#[derive(Clone)]
pub struct AppContext {
    pub orders: Arc<dyn OrdersService>,
    pub submit_timeout: Duration,
}

impl AppContext {
    /// Build application context backed by the in-process order store.
    #[must_use]
    pub fn in_memory(config: &CheckoutConfig) -> Self {
        Self {
            orders: Arc::new(InMemoryOrdersService::new()),
            submit_timeout: config.submit_timeout(),
        }
    }

    /// Start a checkout with a fresh idempotency key.
    #[must_use]
    pub fn checkout(&self) -> CheckoutFlow {
        CheckoutFlow::new(Arc::clone(&self.orders), self.submit_timeout)
    }
}
