//! Orders

pub mod errors;
mod memory;
pub mod models;
pub mod service;

pub use errors::OrdersServiceError;
pub use memory::InMemoryOrdersService;
pub use models::{NewOrder, Order, OrderLine, OrderUuid};
pub use service::*;
