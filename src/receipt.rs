//! Receipt
//!
//! Tabular rendering of a cart or an order draft, shared by the cart, checkout and
//! confirmation views so every screen shows the same totals.

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Style, Theme, object::Columns},
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    checkout::OrderDraft,
    pricing::OrderTotals,
};

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Totals couldn't be computed from the cart.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Writing to the output failed.
    #[error("failed to write receipt")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone)]
struct ReceiptRow<'a> {
    name: String,
    quantity: u32,
    unit_price: Money<'a, Currency>,
    line_total: Money<'a, Currency>,
}

/// Line-by-line breakdown with subtotal, delivery fee and grand total.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    rows: Vec<ReceiptRow<'a>>,
    totals: OrderTotals<'a>,
}

impl<'a> Receipt<'a> {
    /// Build a receipt from the current cart contents.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Cart`] if a line total or the subtotal overflows.
    pub fn for_cart(cart: &Cart<'a>) -> Result<Self, ReceiptError> {
        let rows = cart
            .lines()
            .iter()
            .map(|line| {
                Ok(ReceiptRow {
                    name: line.name().to_string(),
                    quantity: line.quantity(),
                    unit_price: *line.unit_price(),
                    line_total: line.line_total()?,
                })
            })
            .collect::<Result<Vec<_>, CartError>>()?;

        Ok(Self {
            rows,
            totals: OrderTotals::for_cart(cart)?,
        })
    }

    /// Build a receipt from an order draft.
    pub fn for_draft(draft: &OrderDraft<'a>) -> Self {
        let rows = draft
            .lines()
            .iter()
            .map(|line| {
                let line_total = line
                    .unit_price
                    .to_minor_units()
                    .saturating_mul(i64::from(line.quantity));

                ReceiptRow {
                    name: line.name.clone(),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    line_total: Money::from_minor(line_total, line.unit_price.currency()),
                }
            })
            .collect();

        Self {
            rows,
            totals: *draft.totals(),
        }
    }

    /// Totals shown at the foot of the receipt
    pub fn totals(&self) -> &OrderTotals<'a> {
        &self.totals
    }

    /// Writes the receipt table and summary.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Io`] if the output can't be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Unit Price", "Price"]);

        for row in &self.rows {
            builder.push_record([
                row.name.clone(),
                row.quantity.to_string(),
                row.unit_price.to_string(),
                row.line_total.to_string(),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Columns::new(1..), Alignment::right());

        writeln!(out, "{table}")?;

        write_summary(&mut out, &self.totals)?;

        Ok(())
    }
}

fn write_summary(out: &mut impl io::Write, totals: &OrderTotals<'_>) -> io::Result<()> {
    let summary = [
        ("Subtotal:", totals.subtotal()),
        ("Delivery:", totals.delivery_fee()),
        ("Total:", totals.grand_total()),
    ];

    let values: Vec<(&str, String)> = summary
        .iter()
        .map(|(label, amount)| (*label, amount.to_string()))
        .collect();

    let value_width = values.iter().map(|(_, value)| value.chars().count()).max().unwrap_or(0);

    for (label, value) in values {
        writeln!(out, " {label:<10}{value:>value_width$}")?;
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use rusty_money::iso::{EUR, USD};
    use testresult::TestResult;

    use crate::{
        catalog::CatalogItem,
        checkout::{CheckoutForm, OrderDraft},
    };

    use super::*;

    fn cart<'a>() -> Result<Cart<'a>, Box<dyn std::error::Error>> {
        let mut cart = Cart::new(USD);

        cart.add(&CatalogItem::new("p1", "Pizza", Money::from_minor(1000, USD))?, 2)?;
        cart.add(&CatalogItem::new("p2", "Salad", Money::from_minor(550, USD))?, 1)?;

        Ok(cart)
    }

    fn render(receipt: &Receipt<'_>) -> Result<String, Box<dyn std::error::Error>> {
        let mut out = Vec::new();

        receipt.write_to(&mut out)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn write_to_renders_lines_and_totals() -> TestResult {
        let output = render(&Receipt::for_cart(&cart()?)?)?;

        assert!(output.contains("Pizza"), "missing line name in:\n{output}");
        assert!(output.contains("$20.00"), "missing line total in:\n{output}");
        assert!(output.contains("Subtotal:"), "missing subtotal in:\n{output}");
        assert!(output.contains("$25.50"), "missing subtotal value in:\n{output}");
        assert!(output.contains("$2.99"), "missing delivery fee in:\n{output}");
        assert!(output.contains("$28.49"), "missing grand total in:\n{output}");

        Ok(())
    }

    #[test]
    fn empty_cart_receipt_shows_delivery_only_total() -> TestResult {
        let output = render(&Receipt::for_cart(&Cart::new(USD))?)?;

        assert!(output.contains("$0.00"), "missing zero subtotal in:\n{output}");
        assert!(output.contains("Total:"), "missing total in:\n{output}");

        Ok(())
    }

    #[test]
    fn amounts_follow_currency_formatting() -> TestResult {
        let mut cart = Cart::new(EUR);

        cart.add(&CatalogItem::new("feast", "Party Platter", Money::from_minor(123_456, EUR))?, 1)?;

        let output = render(&Receipt::for_cart(&cart)?)?;

        assert!(output.contains("€1.234,56"), "missing grouped line price in:\n{output}");
        assert!(output.contains("€2,99"), "missing delivery fee in:\n{output}");
        assert!(output.contains("€1.237,55"), "missing grand total in:\n{output}");

        Ok(())
    }

    #[test]
    fn draft_and_cart_receipts_agree() -> TestResult {
        let cart = cart()?;
        let form = CheckoutForm {
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            postal_code: "12345".to_string(),
            phone: "555-0100".to_string(),
            ..CheckoutForm::default()
        };

        let from_cart = Receipt::for_cart(&cart)?;
        let from_draft = Receipt::for_draft(&OrderDraft::from_cart(&cart, &form)?);

        assert_eq!(from_cart.totals(), from_draft.totals());
        assert_eq!(render(&from_cart)?, render(&from_draft)?);

        Ok(())
    }
}
