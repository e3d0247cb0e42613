//! Foodora prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine},
    catalog::{Catalog, CatalogError, CatalogItem, ItemId},
    checkout::{
        CheckoutForm, DeliveryDetails, DeliveryField, DraftError, DraftLine, OrderDraft,
        PaymentMethod, ValidationError,
    },
    fixtures::{FixtureError, load_catalog, parse_catalog},
    money::{PriceError, parse_price},
    pricing::{DELIVERY_FEE, OrderTotals, delivery_fee, grand_total},
    receipt::{Receipt, ReceiptError},
};
