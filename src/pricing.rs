//! Pricing
//!
//! Grand totals are the cart subtotal plus a flat delivery fee. The fee is the same for every
//! order; there is no free-delivery threshold.

use rusty_money::{Money, MoneyError, iso::Currency};

use crate::cart::{Cart, CartError};

/// Flat delivery fee in minor units (2.99).
pub const DELIVERY_FEE: i64 = 299;

/// The delivery fee in the given currency.
pub fn delivery_fee(currency: &Currency) -> Money<'_, Currency> {
    Money::from_minor(DELIVERY_FEE, currency)
}

/// Calculates the grand total for a subtotal and delivery fee.
///
/// # Errors
///
/// Returns a [`MoneyError`] if the two amounts are in different currencies.
pub fn grand_total<'a>(
    subtotal: Money<'a, Currency>,
    delivery_fee: Money<'a, Currency>,
) -> Result<Money<'a, Currency>, MoneyError> {
    subtotal.add(delivery_fee)
}

/// Subtotal, delivery fee and grand total for one cart state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals<'a> {
    subtotal: Money<'a, Currency>,
    delivery_fee: Money<'a, Currency>,
    grand_total: Money<'a, Currency>,
}

impl<'a> OrderTotals<'a> {
    /// Derive totals from a subtotal using the flat delivery fee.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the grand total can't be computed.
    pub fn from_subtotal(subtotal: Money<'a, Currency>) -> Result<Self, MoneyError> {
        let delivery_fee = delivery_fee(subtotal.currency());
        let grand_total = grand_total(subtotal, delivery_fee)?;

        Ok(Self {
            subtotal,
            delivery_fee,
            grand_total,
        })
    }

    /// Derive totals from the current contents of a cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the subtotal or grand total overflows.
    pub fn for_cart(cart: &Cart<'a>) -> Result<Self, CartError> {
        Ok(Self::from_subtotal(cart.subtotal()?)?)
    }

    /// Sum of line prices, excluding delivery
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Flat delivery fee
    pub fn delivery_fee(&self) -> Money<'a, Currency> {
        self.delivery_fee
    }

    /// Subtotal plus delivery fee
    pub fn grand_total(&self) -> Money<'a, Currency> {
        self.grand_total
    }
}
