//! # Cart Manager
//!
//! The authoritative local view of the buyer's cart.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Manager Operations                              │
//! │                                                                         │
//! │  UI Action                 Manager                  Cart Service        │
//! │  ─────────                 ───────                  ────────────        │
//! │                                                                         │
//! │  Enter cart view ────────► load_cart() ───────────► GET /cart           │
//! │                                                                         │
//! │  Change quantity ────────► set_quantity() ────────► PUT item            │
//! │                                 │                    then GET /cart     │
//! │                                 └── qty < 1: rejected locally,          │
//! │                                     NO request, snapshot unchanged      │
//! │                                                                         │
//! │  Click remove ───────────► remove_item() ─────────► DELETE item         │
//! │                                                      then GET /cart     │
//! │                                                                         │
//! │  Click clear ────────────► clear_cart(prompt) ────► DELETE /cart        │
//! │                                 │                    then GET /cart     │
//! │                                 └── prompt declined: NO request         │
//! │                                                                         │
//! │  Every mutation completes by reloading the snapshot: the displayed      │
//! │  totals always reflect server state, never a local patch. Latency       │
//! │  is traded for consistency; there is no client/server drift to          │
//! │  reconcile after a mutation.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutations take `&mut self` and finish their reload before returning,
//! so two user-initiated mutations reach the server in the order issued
//! and the UI never shows a stale snapshot from an earlier mutation
//! after a later one completed.

use tracing::{debug, info};

use supplyline_core::types::CartSnapshot;

use crate::api::CartApi;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Clear Confirmation
// =============================================================================

/// Blocking confirmation seam for destructive operations.
///
/// Clearing the cart is irreversible and has no undo, so the manager
/// refuses to issue the request until the host UI confirms it with the
/// buyer.
pub trait ConfirmPrompt {
    /// Presents `message` and returns the buyer's decision.
    fn confirm(&self, message: &str) -> bool;
}

/// Outcome of a [`CartManager::clear_cart`] call.
#[derive(Debug, Clone)]
pub enum ClearOutcome {
    /// The buyer declined; nothing was sent.
    Cancelled,
    /// The cart was cleared; this is the reloaded (empty) snapshot.
    Cleared(CartSnapshot),
}

// =============================================================================
// Cart Manager
// =============================================================================

/// Owns the in-memory cart snapshot and synchronizes it with the
/// remote Cart Service.
///
/// The snapshot is the only local cache: each entry into a
/// cart-consuming view calls [`load_cart`](Self::load_cart) fresh,
/// because the cart is shared across the buyer's sessions and devices.
pub struct CartManager<A: CartApi> {
    api: A,
    snapshot: Option<CartSnapshot>,
}

impl<A: CartApi> CartManager<A> {
    /// Creates a manager with no snapshot loaded yet.
    pub fn new(api: A) -> Self {
        CartManager {
            api,
            snapshot: None,
        }
    }

    /// The last loaded snapshot, if any.
    pub fn snapshot(&self) -> Option<&CartSnapshot> {
        self.snapshot.as_ref()
    }

    /// Fetches the current snapshot from the Cart Service.
    pub async fn load_cart(&mut self) -> ClientResult<&CartSnapshot> {
        let snapshot = self.api.fetch_cart().await?;
        debug!(
            items = snapshot.len(),
            subtotal_cents = snapshot.subtotal().cents(),
            "cart loaded"
        );
        Ok(&*self.snapshot.insert(snapshot))
    }

    /// Sets a line item's quantity, then reloads.
    ///
    /// Quantities below 1 are rejected locally: no request is sent and
    /// the snapshot is unchanged, so an observed quantity can never
    /// drop below 1 through this path. (Removal is its own, explicit
    /// operation.)
    pub async fn set_quantity(
        &mut self,
        line_item_id: &str,
        quantity: i64,
    ) -> ClientResult<&CartSnapshot> {
        if quantity < 1 {
            debug!(line_item_id, quantity, "quantity below 1 rejected locally");
            return self.current();
        }

        self.api.update_quantity(line_item_id, quantity).await?;
        self.reload().await
    }

    /// Removes a line item, then reloads.
    pub async fn remove_item(&mut self, line_item_id: &str) -> ClientResult<&CartSnapshot> {
        self.api.remove_item(line_item_id).await?;
        self.reload().await
    }

    /// Clears the cart after explicit confirmation, then reloads.
    pub async fn clear_cart(&mut self, prompt: &dyn ConfirmPrompt) -> ClientResult<ClearOutcome> {
        if !prompt.confirm("Remove all items from your cart? This cannot be undone.") {
            debug!("cart clear declined");
            return Ok(ClearOutcome::Cancelled);
        }

        self.api.clear_cart().await?;
        let snapshot = self.reload().await?.clone();
        info!("cart cleared");
        Ok(ClearOutcome::Cleared(snapshot))
    }

    /// Reloads the snapshot after a confirmed mutation. The mutation is
    /// not complete until this finishes.
    async fn reload(&mut self) -> ClientResult<&CartSnapshot> {
        let snapshot = self.api.fetch_cart().await?;
        Ok(&*self.snapshot.insert(snapshot))
    }

    fn current(&self) -> ClientResult<&CartSnapshot> {
        self.snapshot
            .as_ref()
            .ok_or_else(|| ClientError::Transient("cart has not been loaded".to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use supplyline_core::checkout::OrderRequest;
    use supplyline_core::types::CartLineItem;

    use crate::api::OrderConfirmation;

    fn line_item(id: &str, unit_price_cents: i64, quantity: i64) -> CartLineItem {
        CartLineItem {
            id: id.to_string(),
            product_id: format!("prod-{}", id),
            product_name: format!("Product {}", id),
            sku: format!("SKU-{}", id),
            brand: "Acme".to_string(),
            supplier_name: "Acme Wholesale".to_string(),
            unit_price_cents,
            quantity,
            stock_quantity: 100,
        }
    }

    /// In-memory Cart Service double that records the calls it saw.
    struct FakeApi {
        items: Mutex<Vec<CartLineItem>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn with_items(items: Vec<CartLineItem>) -> Self {
            FakeApi {
                items: Mutex::new(items),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CartApi for FakeApi {
        async fn fetch_cart(&self) -> ClientResult<CartSnapshot> {
            self.record("GET /cart");
            Ok(CartSnapshot::new(self.items.lock().unwrap().clone()))
        }

        async fn update_quantity(
            &self,
            line_item_id: &str,
            quantity: i64,
        ) -> ClientResult<CartLineItem> {
            self.record(format!("PUT /cart/items/{line_item_id} qty={quantity}"));
            let mut items = self.items.lock().unwrap();
            let item = items
                .iter_mut()
                .find(|i| i.id == line_item_id)
                .ok_or_else(|| ClientError::Transient("line item not found".to_string()))?;
            item.quantity = quantity;
            Ok(item.clone())
        }

        async fn remove_item(&self, line_item_id: &str) -> ClientResult<()> {
            self.record(format!("DELETE /cart/items/{line_item_id}"));
            self.items.lock().unwrap().retain(|i| i.id != line_item_id);
            Ok(())
        }

        async fn clear_cart(&self) -> ClientResult<()> {
            self.record("DELETE /cart");
            self.items.lock().unwrap().clear();
            Ok(())
        }

        async fn submit_order(&self, _request: &OrderRequest) -> ClientResult<OrderConfirmation> {
            self.record("POST /orders");
            Ok(OrderConfirmation {
                order_id: "order-1".to_string(),
            })
        }
    }

    struct Always(bool);
    impl ConfirmPrompt for Always {
        fn confirm(&self, _message: &str) -> bool {
            self.0
        }
    }

    #[tokio::test]
    async fn test_load_cart_stores_snapshot() {
        let mut manager = CartManager::new(FakeApi::with_items(vec![line_item("li-1", 2999, 2)]));
        let snapshot = manager.load_cart().await.unwrap();
        assert_eq!(snapshot.total_quantity(), 2);
        assert_eq!(manager.snapshot().unwrap().subtotal().cents(), 5998);
    }

    #[tokio::test]
    async fn test_set_quantity_updates_then_reloads() {
        let mut manager = CartManager::new(FakeApi::with_items(vec![line_item("li-1", 2999, 2)]));
        manager.load_cart().await.unwrap();

        let snapshot = manager.set_quantity("li-1", 5).await.unwrap();
        assert_eq!(snapshot.total_quantity(), 5);
        assert_eq!(snapshot.subtotal().cents(), 14995);

        // Mutation, then full reload - in that order.
        assert_eq!(
            manager.api.calls(),
            vec!["GET /cart", "PUT /cart/items/li-1 qty=5", "GET /cart"]
        );
    }

    #[tokio::test]
    async fn test_quantity_below_one_is_local_noop() {
        let mut manager = CartManager::new(FakeApi::with_items(vec![line_item("li-1", 2999, 2)]));
        manager.load_cart().await.unwrap();

        for bad in [0, -3] {
            let snapshot = manager.set_quantity("li-1", bad).await.unwrap();
            assert_eq!(snapshot.total_quantity(), 2);
        }

        // Only the initial load ever reached the service.
        assert_eq!(manager.api.calls(), vec!["GET /cart"]);
    }

    #[tokio::test]
    async fn test_remove_item_reloads() {
        let mut manager = CartManager::new(FakeApi::with_items(vec![
            line_item("li-1", 2999, 2),
            line_item("li-2", 1050, 1),
        ]));
        manager.load_cart().await.unwrap();

        let snapshot = manager.remove_item("li-2").await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.find_item("li-2").is_none());
    }

    #[tokio::test]
    async fn test_clear_cart_declined_sends_nothing() {
        let mut manager = CartManager::new(FakeApi::with_items(vec![line_item("li-1", 2999, 2)]));
        manager.load_cart().await.unwrap();

        let outcome = manager.clear_cart(&Always(false)).await.unwrap();
        assert!(matches!(outcome, ClearOutcome::Cancelled));
        assert_eq!(manager.api.calls(), vec!["GET /cart"]);
        // Local snapshot untouched.
        assert_eq!(manager.snapshot().unwrap().total_quantity(), 2);
    }

    #[tokio::test]
    async fn test_clear_cart_confirmed_empties() {
        let mut manager = CartManager::new(FakeApi::with_items(vec![line_item("li-1", 2999, 2)]));
        manager.load_cart().await.unwrap();

        let outcome = manager.clear_cart(&Always(true)).await.unwrap();
        match outcome {
            ClearOutcome::Cleared(snapshot) => {
                assert!(snapshot.is_empty());
                assert_eq!(snapshot.subtotal().cents(), 0);
                assert_eq!(snapshot.total_quantity(), 0);
            }
            ClearOutcome::Cancelled => panic!("expected the cart to clear"),
        }

        // A later load still sees the empty cart.
        let reloaded = manager.load_cart().await.unwrap();
        assert!(reloaded.is_empty());
    }
}
