//! Cart
//!
//! The in-memory record of what the user intends to buy. Lines are keyed by [`ItemId`] and
//! keep insertion order; adding an item that is already present merges into the existing
//! line. Every line holds a quantity of at least one, and the subtotal is derived from the
//! lines on each read.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::catalog::{CatalogItem, ItemId};

/// Errors raised by cart mutations and totals.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// Quantity must be at least one when adding, and fit in a line when set.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// The item currency differs from the cart currency (item, item currency, cart currency).
    #[error("item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ItemId, &'static str, &'static str),

    /// Merging quantities for the item would overflow.
    #[error("quantity overflow for item {0}")]
    QuantityOverflow(ItemId),

    /// An extended price could not be represented.
    #[error("amount overflow for item {0}")]
    AmountOverflow(ItemId),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// One distinct catalog item and its requested quantity.
///
/// Name, price and image are copied when the line is created and are not re-synced with
/// the catalog afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    item_id: ItemId,
    name: String,
    unit_price: Money<'a, Currency>,
    quantity: u32,
    image_ref: Option<String>,
}

impl<'a> CartLine<'a> {
    fn from_item(item: &CatalogItem<'a>, quantity: u32) -> Self {
        Self {
            item_id: item.id().clone(),
            name: item.name().to_string(),
            unit_price: *item.price(),
            quantity,
            image_ref: item.image_ref().map(str::to_string),
        }
    }

    /// Item identifier
    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    /// Display name captured at add time
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price captured at add time
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Quantity, always at least one
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Image reference captured at add time
    pub fn image_ref(&self) -> Option<&str> {
        self.image_ref.as_deref()
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::AmountOverflow`] if the product does not fit in minor units.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, CartError> {
        let minor = self
            .unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or_else(|| CartError::AmountOverflow(self.item_id.clone()))?;

        Ok(Money::from_minor(minor, self.unit_price.currency()))
    }
}

/// Shopping cart
#[derive(Debug, Clone, PartialEq)]
pub struct Cart<'a> {
    lines: Vec<CartLine<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add `quantity` of `item`, merging into an existing line for the same id.
    ///
    /// A merge only increases the quantity; the name and price captured by the first add
    /// are kept. Returns the resulting quantity of the line.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    /// - [`CartError::CurrencyMismatch`]: the item is priced in another currency.
    /// - [`CartError::QuantityOverflow`]: the merged quantity does not fit.
    pub fn add(&mut self, item: &CatalogItem<'a>, quantity: u32) -> Result<u32, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }

        let item_currency = item.price().currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                item.id().clone(),
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        match self.lines.iter_mut().find(|line| line.item_id == *item.id()) {
            Some(line) => {
                line.quantity = line
                    .quantity
                    .checked_add(quantity)
                    .ok_or_else(|| CartError::QuantityOverflow(item.id().clone()))?;

                Ok(line.quantity)
            }
            None => {
                self.lines.push(CartLine::from_item(item, quantity));

                Ok(quantity)
            }
        }
    }

    /// Overwrite the quantity of a line.
    ///
    /// A quantity of zero or less removes the line. Setting the quantity of an item that is
    /// not in the cart does nothing. Returns whether a line was changed or removed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `quantity` is too large for a line.
    pub fn set_quantity(&mut self, item_id: &ItemId, quantity: i64) -> Result<bool, CartError> {
        if quantity <= 0 {
            return Ok(self.remove(item_id).is_some());
        }

        let quantity = u32::try_from(quantity).map_err(|_err| CartError::InvalidQuantity(quantity))?;

        let Some(line) = self.lines.iter_mut().find(|line| line.item_id == *item_id) else {
            return Ok(false);
        };

        line.quantity = quantity;

        Ok(true)
    }

    /// Remove a line, returning it if it was present.
    pub fn remove(&mut self, item_id: &ItemId) -> Option<CartLine<'a>> {
        self.position(item_id).map(|idx| self.lines.remove(idx))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `unit_price * quantity` over all lines; zero for an empty cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if an extended price or the sum overflows.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, CartError> {
        self.lines
            .iter()
            .try_fold(Money::from_minor(0, self.currency), |acc, line| {
                Ok(acc.add(line.line_total()?)?)
            })
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// Look up the line for an item.
    pub fn line(&self, item_id: &ItemId) -> Option<&CartLine<'a>> {
        self.lines.iter().find(|line| line.item_id == *item_id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Cart currency
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn position(&self, item_id: &ItemId) -> Option<usize> {
        self.lines.iter().position(|line| line.item_id == *item_id)
    }
}
