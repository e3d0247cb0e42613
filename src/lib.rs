//! Foodora
//!
//! Cart, pricing and checkout core for the Foodora food-ordering app: a merge-aware shopping
//! cart, exact minor-unit totals with a flat delivery fee, and the validated order draft that
//! checkout submits.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod fixtures;
pub mod money;
pub mod prelude;
pub mod pricing;
pub mod receipt;
