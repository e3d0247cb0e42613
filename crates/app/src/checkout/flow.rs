//! Checkout flow state machine.

use std::{sync::Arc, time::Duration};

use foodora::checkout::{CheckoutForm, DraftError, OrderDraft};
use jiff::Timestamp;
use tokio::time::timeout;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    checkout::CheckoutError,
    domain::orders::{NewOrder, Order, OrderUuid, OrdersService},
    session::Session,
};

/// Where checkout goes once the placed order has been acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    OrderConfirmation { order: OrderUuid, total: u64 },
    Home,
}

/// The two choices offered after an order is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Acknowledgement {
    ViewOrder,
    BackToHome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    /// Delivery details are being filled in; the cart may still change.
    Editing,
    Validating,
    Submitting,
    /// The store accepted the order; the cart is kept until the user acknowledges it.
    AwaitingAcknowledgement(Order),
    Cleared(Destination),
    Failed { reason: String },
}

impl CheckoutState {
    fn name(&self) -> &'static str {
        match self {
            Self::Editing => "editing",
            Self::Validating => "validating",
            Self::Submitting => "submitting",
            Self::AwaitingAcknowledgement(_) => "awaiting acknowledgement",
            Self::Cleared(_) => "cleared",
            Self::Failed { .. } => "failed",
        }
    }
}

/// One checkout attempt group.
///
/// A retry after a failure keeps the idempotency key while the order it would place is
/// unchanged, so the order store can collapse duplicates. Once the cart or the delivery
/// details change, the retry is a different order and is sent under a fresh key.
pub struct CheckoutFlow {
    orders: Arc<dyn OrdersService>,
    submit_timeout: Duration,
    state: CheckoutState,
    idempotency_key: Uuid,
    last_attempt: Option<NewOrder>,
}

impl CheckoutFlow {
    pub fn new(orders: Arc<dyn OrdersService>, submit_timeout: Duration) -> Self {
        Self {
            orders,
            submit_timeout,
            state: CheckoutState::Editing,
            idempotency_key: Uuid::now_v7(),
            last_attempt: None,
        }
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn idempotency_key(&self) -> Uuid {
        self.idempotency_key
    }

    /// Validate the form against the current cart and submit the order.
    ///
    /// Allowed from [`CheckoutState::Editing`] and, as a manual retry, from
    /// [`CheckoutState::Failed`]. Validation errors return the flow to editing without
    /// contacting the order store; store errors and timeouts leave it failed. The cart is
    /// never modified here.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] describing why the order was not placed.
    pub async fn submit(
        &mut self,
        session: &Session<'_>,
        form: &CheckoutForm,
    ) -> Result<Order, CheckoutError> {
        if !matches!(self.state, CheckoutState::Editing | CheckoutState::Failed { .. }) {
            return Err(self.invalid_transition("submit"));
        }

        self.state = CheckoutState::Validating;

        let draft = match OrderDraft::from_cart(session.cart(), form) {
            Ok(draft) => draft,
            Err(DraftError::Validation(source)) => {
                warn!(owner = %session.principal().id, "checkout validation failed: {source}");

                self.state = CheckoutState::Editing;

                return Err(source.into());
            }
            Err(DraftError::Cart(source)) => return Err(self.fail(source.into())),
        };

        let mut new_order = NewOrder::from_draft(
            &draft,
            session.principal().id.clone(),
            self.idempotency_key,
            Timestamp::now(),
        )
        .map_err(|source| self.fail(CheckoutError::Submission(source)))?;

        if self
            .last_attempt
            .as_ref()
            .is_some_and(|previous| !previous.same_request(&new_order))
        {
            let previous_key = self.idempotency_key;

            self.idempotency_key = Uuid::now_v7();
            new_order.idempotency_key = self.idempotency_key;

            info!(
                %previous_key,
                idempotency_key = %self.idempotency_key,
                "order changed since last attempt, using a new idempotency key"
            );
        }

        self.last_attempt = Some(new_order.clone());
        self.state = CheckoutState::Submitting;

        info!(
            owner = %new_order.owner,
            idempotency_key = %self.idempotency_key,
            lines = new_order.lines.len(),
            total = new_order.total,
            "submitting order"
        );

        let outcome = timeout(self.submit_timeout, self.orders.create_order(new_order)).await;

        match outcome {
            Ok(Ok(order)) => {
                info!(order = %order.uuid, total = order.total, "order placed");

                self.state = CheckoutState::AwaitingAcknowledgement(order.clone());

                Ok(order)
            }
            Ok(Err(source)) => Err(self.fail(CheckoutError::Submission(source))),
            Err(_elapsed) => Err(self.fail(CheckoutError::Timeout(self.submit_timeout))),
        }
    }

    /// Acknowledge the placed order, clearing the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] unless an order is awaiting acknowledgement.
    pub fn acknowledge(
        &mut self,
        session: &mut Session<'_>,
        choice: Acknowledgement,
    ) -> Result<Destination, CheckoutError> {
        let CheckoutState::AwaitingAcknowledgement(order) = &self.state else {
            return Err(self.invalid_transition("acknowledge"));
        };

        let destination = match choice {
            Acknowledgement::ViewOrder => Destination::OrderConfirmation {
                order: order.uuid,
                total: order.total,
            },
            Acknowledgement::BackToHome => Destination::Home,
        };

        session.clear_cart();

        info!(order = %order.uuid, ?choice, "order acknowledged");

        self.state = CheckoutState::Cleared(destination.clone());

        Ok(destination)
    }

    fn fail(&mut self, error: CheckoutError) -> CheckoutError {
        error!(idempotency_key = %self.idempotency_key, "order submission failed: {error}");

        self.state = CheckoutState::Failed {
            reason: error.to_string(),
        };

        error
    }

    fn invalid_transition(&self, action: &'static str) -> CheckoutError {
        CheckoutError::InvalidTransition {
            state: self.state.name(),
            action,
        }
    }
}
