//! Orders service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::orders::{
        errors::OrdersServiceError,
        models::{NewOrder, Order, OrderUuid},
    },
    session::OwnerId,
};

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Creates an order. Repeating a create with the same owner and idempotency key returns
    /// the order created first instead of a duplicate, or
    /// [`OrdersServiceError::IdempotencyConflict`] if the contents differ.
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError>;

    /// Retrieves all orders placed by the owner, newest first.
    async fn list_orders(&self, owner: OwnerId) -> Result<Vec<Order>, OrdersServiceError>;

    /// Retrieves the owner's orders with the given delivery status, newest first.
    async fn list_orders_by_status(
        &self,
        owner: OwnerId,
        delivered: bool,
    ) -> Result<Vec<Order>, OrdersServiceError>;

    /// Retrieve a single order.
    async fn get_order(&self, owner: OwnerId, order: OrderUuid)
    -> Result<Order, OrdersServiceError>;

    /// Marks an order as delivered or not delivered.
    async fn set_delivered(
        &self,
        owner: OwnerId,
        order: OrderUuid,
        delivered: bool,
    ) -> Result<Order, OrdersServiceError>;

    /// Deletes an order.
    async fn delete_order(&self, owner: OwnerId, order: OrderUuid)
    -> Result<(), OrdersServiceError>;
}
