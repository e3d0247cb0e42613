//! Foodora session, order store and checkout services.

pub mod checkout;
pub mod config;
pub mod context;
pub mod domain;
pub mod observability;
pub mod session;

mod uuids;
