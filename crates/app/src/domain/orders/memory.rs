//! In-memory order store.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    domain::orders::{
        OrdersService,
        errors::OrdersServiceError,
        models::{NewOrder, Order, OrderUuid},
    },
    session::OwnerId,
};

#[derive(Debug, Default)]
struct Store {
    orders: FxHashMap<OrderUuid, Order>,
    idempotency_keys: FxHashMap<(OwnerId, Uuid), OrderUuid>,
}

impl Store {
    fn owned(&self, owner: &OwnerId, order: OrderUuid) -> Result<&Order, OrdersServiceError> {
        let order = self.orders.get(&order).ok_or(OrdersServiceError::NotFound)?;

        if order.owner != *owner {
            return Err(OrdersServiceError::Unauthorized);
        }

        Ok(order)
    }

    fn newest_first(&self, filter: impl Fn(&Order) -> bool) -> Vec<Order> {
        let mut orders: Vec<Order> = self.orders.values().filter(|o| filter(o)).cloned().collect();

        orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));

        orders
    }
}

/// Order store held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryOrdersService {
    store: RwLock<Store>,
}

impl InMemoryOrdersService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrdersService for InMemoryOrdersService {
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError> {
        let mut store = self.store.write().await;
        let key = (order.owner.clone(), order.idempotency_key);

        if let Some(existing) = store
            .idempotency_keys
            .get(&key)
            .and_then(|uuid| store.orders.get(uuid))
        {
            if !existing.fulfils(&order) {
                warn!(order = %existing.uuid, "idempotency key reused for a different order");

                return Err(OrdersServiceError::IdempotencyConflict);
            }

            debug!(order = %existing.uuid, "duplicate create ignored");

            return Ok(existing.clone());
        }

        let uuid = OrderUuid::new();
        let created = Order::from_new(uuid, order);

        store.idempotency_keys.insert(key, uuid);
        store.orders.insert(uuid, created.clone());

        Ok(created)
    }

    async fn list_orders(&self, owner: OwnerId) -> Result<Vec<Order>, OrdersServiceError> {
        let store = self.store.read().await;

        Ok(store.newest_first(|order| order.owner == owner))
    }

    async fn list_orders_by_status(
        &self,
        owner: OwnerId,
        delivered: bool,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        let store = self.store.read().await;

        Ok(store.newest_first(|order| order.owner == owner && order.delivered == delivered))
    }

    async fn get_order(
        &self,
        owner: OwnerId,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let store = self.store.read().await;

        store.owned(&owner, order).cloned()
    }

    async fn set_delivered(
        &self,
        owner: OwnerId,
        order: OrderUuid,
        delivered: bool,
    ) -> Result<Order, OrdersServiceError> {
        let mut store = self.store.write().await;

        store.owned(&owner, order)?;

        let stored = store
            .orders
            .get_mut(&order)
            .ok_or(OrdersServiceError::NotFound)?;

        stored.delivered = delivered;

        Ok(stored.clone())
    }

    async fn delete_order(&self, owner: OwnerId, order: OrderUuid) -> Result<(), OrdersServiceError> {
        let mut store = self.store.write().await;

        store.owned(&owner, order)?;

        if let Some(removed) = store.orders.remove(&order) {
            store
                .idempotency_keys
                .remove(&(removed.owner, removed.idempotency_key));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use foodora::checkout::{DeliveryDetails, PaymentMethod};
    use jiff::{SignedDuration, Timestamp};
    use testresult::TestResult;

    use super::*;

    fn new_order(owner: &str, placed_at: Timestamp) -> NewOrder {
        NewOrder {
            idempotency_key: Uuid::now_v7(),
            owner: OwnerId::new(owner),
            lines: Vec::new(),
            currency: "USD".to_string(),
            subtotal: 2550,
            delivery_fee: 299,
            total: 2849,
            delivery: DeliveryDetails {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                postal_code: "12345".to_string(),
                phone: "555-0100".to_string(),
                instructions: None,
            },
            payment_method: PaymentMethod::CashOnDelivery,
            placed_at,
            delivered: false,
        }
    }

    #[tokio::test]
    async fn create_order_returns_generated_uuid() -> TestResult {
        let service = InMemoryOrdersService::new();
        let order = new_order("user-1", Timestamp::now());

        let created = service.create_order(order.clone()).await?;

        assert_eq!(created.total, 2849);
        assert_eq!(created.owner, order.owner);
        assert!(!created.delivered);

        let fetched = service.get_order(order.owner, created.uuid).await?;

        assert_eq!(fetched, created);

        Ok(())
    }

    #[tokio::test]
    async fn create_order_deduplicates_on_idempotency_key() -> TestResult {
        let service = InMemoryOrdersService::new();
        let order = new_order("user-1", Timestamp::now());

        let first = service.create_order(order.clone()).await?;
        let second = service.create_order(order.clone()).await?;

        assert_eq!(first.uuid, second.uuid);
        assert_eq!(service.list_orders(order.owner).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn reused_key_with_different_contents_conflicts() -> TestResult {
        let service = InMemoryOrdersService::new();
        let order = new_order("user-1", Timestamp::now());

        let first = service.create_order(order.clone()).await?;

        let edited = NewOrder {
            subtotal: 3100,
            total: 3399,
            ..order.clone()
        };

        let result = service.create_order(edited).await;

        assert!(
            matches!(result, Err(OrdersServiceError::IdempotencyConflict)),
            "expected IdempotencyConflict, got {result:?}"
        );

        let stored = service.list_orders(order.owner).await?;

        assert_eq!(stored, [first]);

        Ok(())
    }

    #[tokio::test]
    async fn idempotency_keys_are_scoped_to_owner() -> TestResult {
        let service = InMemoryOrdersService::new();
        let order = new_order("user-1", Timestamp::now());

        let mine = service.create_order(order.clone()).await?;

        let replayed = NewOrder {
            owner: OwnerId::new("user-2"),
            ..order
        };

        let theirs = service.create_order(replayed).await?;

        assert_ne!(theirs.uuid, mine.uuid);
        assert_eq!(theirs.owner, OwnerId::new("user-2"));
        assert_eq!(
            service.get_order(OwnerId::new("user-1"), mine.uuid).await?,
            mine
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_is_owner_scoped_and_newest_first() -> TestResult {
        let service = InMemoryOrdersService::new();
        let now = Timestamp::now();
        let earlier = now.checked_sub(SignedDuration::from_hours(1))?;

        let old = service.create_order(new_order("user-1", earlier)).await?;
        let new = service.create_order(new_order("user-1", now)).await?;
        service.create_order(new_order("user-2", now)).await?;

        let uuids: Vec<OrderUuid> = service
            .list_orders(OwnerId::new("user-1"))
            .await?
            .into_iter()
            .map(|order| order.uuid)
            .collect();

        assert_eq!(uuids, [new.uuid, old.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_by_status_filters_delivered() -> TestResult {
        let service = InMemoryOrdersService::new();
        let owner = OwnerId::new("user-1");

        let delivered = service.create_order(new_order("user-1", Timestamp::now())).await?;
        service.create_order(new_order("user-1", Timestamp::now())).await?;

        service.set_delivered(owner.clone(), delivered.uuid, true).await?;

        let done = service.list_orders_by_status(owner.clone(), true).await?;
        let pending = service.list_orders_by_status(owner, false).await?;

        assert_eq!(done.len(), 1);
        assert_eq!(done.first().map(|order| order.uuid), Some(delivered.uuid));
        assert_eq!(pending.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn get_order_unknown_uuid_returns_not_found() {
        let service = InMemoryOrdersService::new();

        let result = service.get_order(OwnerId::new("user-1"), OrderUuid::new()).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn order_not_visible_to_other_owner() -> TestResult {
        let service = InMemoryOrdersService::new();
        let created = service.create_order(new_order("user-1", Timestamp::now())).await?;

        let result = service.get_order(OwnerId::new("user-2"), created.uuid).await;

        assert!(
            matches!(result, Err(OrdersServiceError::Unauthorized)),
            "expected Unauthorized, got {result:?}"
        );

        let result = service
            .set_delivered(OwnerId::new("user-2"), created.uuid, true)
            .await;

        assert!(matches!(result, Err(OrdersServiceError::Unauthorized)));

        Ok(())
    }

    #[tokio::test]
    async fn delete_order_makes_it_not_found() -> TestResult {
        let service = InMemoryOrdersService::new();
        let owner = OwnerId::new("user-1");
        let created = service.create_order(new_order("user-1", Timestamp::now())).await?;

        service.delete_order(owner.clone(), created.uuid).await?;

        let result = service.get_order(owner.clone(), created.uuid).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        let result = service.delete_order(owner, created.uuid).await;

        assert!(matches!(result, Err(OrdersServiceError::NotFound)));

        Ok(())
    }
}
