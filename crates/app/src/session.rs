//! Session
//!
//! A session owns the cart of one signed-in principal. It is created at sign-in and handed to
//! the screens that need it; dropping it (sign-out, exit) discards the cart.

use std::fmt::{Display, Formatter, Result as FmtResult};

use foodora::{
    cart::{Cart, CartError},
    catalog::{CatalogItem, ItemId},
};
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Opaque principal identifier issued by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OwnerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// The authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: OwnerId,
    pub email: Option<String>,
}

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: OwnerId::new(id),
            email: None,
        }
    }
}

/// Cart and principal for one authenticated session.
#[derive(Debug)]
pub struct Session<'a> {
    principal: Principal,
    cart: Cart<'a>,
}

impl<'a> Session<'a> {
    /// Start a session with an empty cart.
    pub fn start(principal: Principal, currency: &'static Currency) -> Self {
        info!(owner = %principal.id, "session started");

        Self {
            principal,
            cart: Cart::new(currency),
        }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// Add an item to the cart, merging with an existing line.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] for a zero quantity, a currency mismatch or an overflow.
    pub fn add_to_cart(&mut self, item: &CatalogItem<'a>, quantity: u32) -> Result<u32, CartError> {
        let total = self.cart.add(item, quantity)?;

        debug!(item = %item.id(), quantity, total, "added to cart");

        Ok(total)
    }

    /// Overwrite a line quantity; zero or less removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if the quantity is too large.
    pub fn update_quantity(&mut self, item_id: &ItemId, quantity: i64) -> Result<bool, CartError> {
        let changed = self.cart.set_quantity(item_id, quantity)?;

        debug!(item = %item_id, quantity, changed, "updated cart quantity");

        Ok(changed)
    }

    /// Remove a line from the cart.
    pub fn remove_from_cart(&mut self, item_id: &ItemId) -> bool {
        let removed = self.cart.remove(item_id).is_some();

        debug!(item = %item_id, removed, "removed from cart");

        removed
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        let lines = self.cart.len();

        self.cart.clear();

        info!(owner = %self.principal.id, lines, "cart cleared");
    }

    /// End the session, discarding the cart.
    pub fn end(self) {
        info!(
            owner = %self.principal.id,
            discarded_lines = self.cart.len(),
            "session ended"
        );
    }
}
