//! Order Models
//!
//! Amounts are stored in minor units of `currency`, the way the order store persists them.

use foodora::{
    catalog::ItemId,
    checkout::{DeliveryDetails, OrderDraft, PaymentMethod},
};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{domain::orders::OrdersServiceError, session::OwnerId, uuids::TypedUuid};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: ItemId,
    pub name: String,
    pub unit_price: u64,
    pub quantity: u32,
}

/// Order Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub uuid: OrderUuid,
    pub idempotency_key: Uuid,
    pub owner: OwnerId,
    pub lines: Vec<OrderLine>,
    pub currency: String,
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub total: u64,
    pub delivery: DeliveryDetails,
    pub payment_method: PaymentMethod,
    pub placed_at: Timestamp,
    pub delivered: bool,
}

impl Order {
    /// Materialise a stored order from a submitted one.
    pub fn from_new(uuid: OrderUuid, order: NewOrder) -> Self {
        Self {
            uuid,
            idempotency_key: order.idempotency_key,
            owner: order.owner,
            lines: order.lines,
            currency: order.currency,
            subtotal: order.subtotal,
            delivery_fee: order.delivery_fee,
            total: order.total,
            delivery: order.delivery,
            payment_method: order.payment_method,
            placed_at: order.placed_at,
            delivered: order.delivered,
        }
    }

    /// Whether this order is what `request` asks for. Placement time and status are ignored.
    #[must_use]
    pub fn fulfils(&self, request: &NewOrder) -> bool {
        self.owner == request.owner
            && self.lines == request.lines
            && self.currency == request.currency
            && self.subtotal == request.subtotal
            && self.delivery_fee == request.delivery_fee
            && self.total == request.total
            && self.delivery == request.delivery
            && self.payment_method == request.payment_method
    }
}

/// New Order Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Client token shared by retries of the same order; the store deduplicates on it per owner.
    pub idempotency_key: Uuid,
    pub owner: OwnerId,
    pub lines: Vec<OrderLine>,
    pub currency: String,
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub total: u64,
    pub delivery: DeliveryDetails,
    pub payment_method: PaymentMethod,
    pub placed_at: Timestamp,
    pub delivered: bool,
}

impl NewOrder {
    /// Stamp a draft with its owner, idempotency key and placement time.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersServiceError::InvalidAmount`] if an amount is negative.
    pub fn from_draft(
        draft: &OrderDraft<'_>,
        owner: OwnerId,
        idempotency_key: Uuid,
        placed_at: Timestamp,
    ) -> Result<Self, OrdersServiceError> {
        let lines = draft
            .lines()
            .iter()
            .map(|line| {
                Ok(OrderLine {
                    item_id: line.item_id.clone(),
                    name: line.name.clone(),
                    unit_price: u64::try_from(line.unit_price.to_minor_units())?,
                    quantity: line.quantity,
                })
            })
            .collect::<Result<Vec<_>, OrdersServiceError>>()?;

        let totals = draft.totals();
        let subtotal = totals.subtotal();

        Ok(Self {
            idempotency_key,
            owner,
            lines,
            currency: subtotal.currency().iso_alpha_code.to_string(),
            subtotal: u64::try_from(subtotal.to_minor_units())?,
            delivery_fee: u64::try_from(totals.delivery_fee().to_minor_units())?,
            total: u64::try_from(totals.grand_total().to_minor_units())?,
            delivery: draft.delivery().clone(),
            payment_method: draft.payment_method(),
            placed_at,
            delivered: false,
        })
    }

    /// Whether two submissions ask for the same order, ignoring key and placement time.
    #[must_use]
    pub fn same_request(&self, other: &NewOrder) -> bool {
        self.owner == other.owner
            && self.lines == other.lines
            && self.currency == other.currency
            && self.subtotal == other.subtotal
            && self.delivery_fee == other.delivery_fee
            && self.total == other.total
            && self.delivery == other.delivery
            && self.payment_method == other.payment_method
    }
}
