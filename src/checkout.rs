//! Checkout
//!
//! Delivery-detail validation and the projection of a cart into an order draft. A draft is a
//! copy: once built, later cart mutations don't reach it.

use std::fmt::{Display, Formatter, Result as FmtResult};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    catalog::ItemId,
    pricing::OrderTotals,
};

/// A required delivery field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryField {
    /// Street address
    Street,
    /// City
    City,
    /// Postal code
    PostalCode,
    /// Contact phone number
    Phone,
}

impl Display for DeliveryField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Street => "street",
            Self::City => "city",
            Self::PostalCode => "postal code",
            Self::Phone => "phone",
        })
    }
}

/// Missing delivery fields, in form order.
pub type MissingFields = SmallVec<[DeliveryField; 4]>;

/// Reasons an order can't be submitted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required delivery fields were empty after trimming.
    #[error("missing delivery details: {}", join_fields(.0))]
    MissingFields(MissingFields),

    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,
}

fn join_fields(fields: &MissingFields) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors raised while drafting an order from a cart.
#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    /// The form or cart failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Cart totals couldn't be computed.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Pay the courier in cash.
    #[default]
    #[serde(rename = "cod")]
    CashOnDelivery,

    /// Card payment. Selectable, but no card is ever charged.
    Card,
}

impl PaymentMethod {
    /// Label shown next to the option.
    pub fn label(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "Cash on Delivery",
            Self::Card => "Credit / Debit Card (Coming Soon)",
        }
    }
}

/// Delivery details as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    /// Street address
    pub street: String,
    /// City
    pub city: String,
    /// Postal code
    pub postal_code: String,
    /// Contact phone
    pub phone: String,
    /// Free-text instructions for the courier
    pub instructions: String,
    /// Selected payment method
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    /// Check required fields and return trimmed delivery details.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] listing every empty required field.
    pub fn validate(&self) -> Result<DeliveryDetails, ValidationError> {
        let fields = [
            (DeliveryField::Street, self.street.trim()),
            (DeliveryField::City, self.city.trim()),
            (DeliveryField::PostalCode, self.postal_code.trim()),
            (DeliveryField::Phone, self.phone.trim()),
        ];

        let missing: MissingFields = fields
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| *field)
            .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let [street, city, postal_code, phone] = fields.map(|(_, value)| value.to_string());
        let instructions = self.instructions.trim();

        Ok(DeliveryDetails {
            street,
            city,
            postal_code,
            phone,
            instructions: (!instructions.is_empty()).then(|| instructions.to_string()),
        })
    }
}

/// Validated delivery details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    /// Street address
    pub street: String,
    /// City
    pub city: String,
    /// Postal code
    pub postal_code: String,
    /// Contact phone
    pub phone: String,
    /// Courier instructions, if any
    pub instructions: Option<String>,
}

/// An order line, decoupled from the cart line it was copied from.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftLine<'a> {
    /// Item identifier
    pub item_id: ItemId,
    /// Display name
    pub name: String,
    /// Unit price
    pub unit_price: Money<'a, Currency>,
    /// Quantity
    pub quantity: u32,
}

/// Everything an order needs from the cart and the form, minus who placed it and when.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft<'a> {
    lines: Vec<DraftLine<'a>>,
    totals: OrderTotals<'a>,
    delivery: DeliveryDetails,
    payment_method: PaymentMethod,
}

impl<'a> OrderDraft<'a> {
    /// Validate the form, then copy the cart's current lines and totals.
    ///
    /// Fields are checked before the cart, so an empty form on an empty cart reports the
    /// missing fields.
    ///
    /// # Errors
    ///
    /// - [`DraftError::Validation`]: required fields are empty or the cart is empty.
    /// - [`DraftError::Cart`]: totals overflowed.
    pub fn from_cart(cart: &Cart<'a>, form: &CheckoutForm) -> Result<Self, DraftError> {
        let delivery = form.validate()?;

        if cart.is_empty() {
            return Err(ValidationError::EmptyCart.into());
        }

        let lines = cart
            .lines()
            .iter()
            .map(|line| DraftLine {
                item_id: line.item_id().clone(),
                name: line.name().to_string(),
                unit_price: *line.unit_price(),
                quantity: line.quantity(),
            })
            .collect();

        Ok(Self {
            lines,
            totals: OrderTotals::for_cart(cart)?,
            delivery,
            payment_method: form.payment_method,
        })
    }

    /// Order lines
    pub fn lines(&self) -> &[DraftLine<'a>] {
        &self.lines
    }

    /// Subtotal, delivery fee and grand total
    pub fn totals(&self) -> &OrderTotals<'a> {
        &self.totals
    }

    /// Delivery details
    pub fn delivery(&self) -> &DeliveryDetails {
        &self.delivery
    }

    /// Payment method
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::catalog::CatalogItem;

    use super::*;

    fn filled_form() -> CheckoutForm {
        CheckoutForm {
            street: " 1 Main St ".to_string(),
            city: "Springfield".to_string(),
            postal_code: "12345".to_string(),
            phone: "555-0100".to_string(),
            instructions: "   ".to_string(),
            payment_method: PaymentMethod::CashOnDelivery,
        }
    }

    fn two_line_cart<'a>() -> Result<Cart<'a>, Box<dyn std::error::Error>> {
        let mut cart = Cart::new(USD);

        cart.add(&CatalogItem::new("p1", "Pizza", Money::from_minor(1000, USD))?, 2)?;
        cart.add(&CatalogItem::new("p2", "Salad", Money::from_minor(550, USD))?, 1)?;

        Ok(cart)
    }

    #[test]
    fn validate_trims_fields_and_drops_blank_instructions() -> TestResult {
        let details = filled_form().validate()?;

        assert_eq!(details.street, "1 Main St");
        assert_eq!(details.instructions, None);

        Ok(())
    }

    #[test]
    fn validate_keeps_instructions() -> TestResult {
        let form = CheckoutForm {
            instructions: " Ring twice ".to_string(),
            ..filled_form()
        };

        assert_eq!(form.validate()?.instructions.as_deref(), Some("Ring twice"));

        Ok(())
    }

    #[test]
    fn validate_reports_every_blank_field() {
        let form = CheckoutForm {
            city: "  ".to_string(),
            phone: String::new(),
            ..filled_form()
        };

        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingFields(smallvec![
                DeliveryField::City,
                DeliveryField::Phone
            ]))
        );
    }

    #[test]
    fn missing_fields_message_lists_fields() {
        let error = ValidationError::MissingFields(smallvec![
            DeliveryField::Street,
            DeliveryField::PostalCode
        ]);

        assert_eq!(
            error.to_string(),
            "missing delivery details: street, postal code"
        );
    }

    #[test]
    fn draft_rejects_empty_cart() {
        let result = OrderDraft::from_cart(&Cart::new(USD), &filled_form());

        assert_eq!(result, Err(DraftError::Validation(ValidationError::EmptyCart)));
    }

    #[test]
    fn draft_checks_fields_before_cart() {
        let result = OrderDraft::from_cart(&Cart::new(USD), &CheckoutForm::default());

        assert!(matches!(
            result,
            Err(DraftError::Validation(ValidationError::MissingFields(fields))) if fields.len() == 4
        ));
    }

    #[test]
    fn draft_copies_lines_and_totals() -> TestResult {
        let cart = two_line_cart()?;

        let draft = OrderDraft::from_cart(&cart, &filled_form())?;

        assert_eq!(draft.lines().len(), 2);
        assert_eq!(draft.totals().subtotal(), Money::from_minor(2550, USD));
        assert_eq!(draft.totals().grand_total(), Money::from_minor(2849, USD));
        assert_eq!(draft.payment_method(), PaymentMethod::CashOnDelivery);

        Ok(())
    }

    #[test]
    fn draft_is_decoupled_from_later_cart_changes() -> TestResult {
        let mut cart = two_line_cart()?;

        let draft = OrderDraft::from_cart(&cart, &filled_form())?;

        cart.set_quantity(&ItemId::new("p1"), 9)?;
        cart.clear();

        assert_eq!(draft.lines().first().map(|line| line.quantity), Some(2));
        assert_eq!(draft.totals().subtotal(), Money::from_minor(2550, USD));

        Ok(())
    }

    #[test]
    fn card_payment_is_labelled_coming_soon() {
        assert_eq!(PaymentMethod::Card.label(), "Credit / Debit Card (Coming Soon)");
        assert_eq!(PaymentMethod::default(), PaymentMethod::CashOnDelivery);
    }
}
