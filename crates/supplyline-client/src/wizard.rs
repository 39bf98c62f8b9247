//! # Checkout Wizard
//!
//! Binds the pure checkout flow to the order submission call.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Wizard                                     │
//! │                                                                         │
//! │  begin(cart snapshot)  ── snapshot taken BY VALUE, once, at entry;     │
//! │         │                 later cart changes are not observed          │
//! │         ▼                                                               │
//! │  SHIPPING ─► PAYMENT ─► REVIEW   (supplyline-core CheckoutFlow;        │
//! │                            │      validation and back-nav live there)  │
//! │                            ▼                                            │
//! │                     place_order()                                       │
//! │                            │  POST /orders (single composite request)  │
//! │                            ├── accepted ─► COMPLETED, wizard is done   │
//! │                            └── rejected ─► REVIEW, server message      │
//! │                                            surfaced, data retained     │
//! │                                                                         │
//! │  The cart itself is emptied by the service as a side effect of order   │
//! │  creation; the wizard does not clear the Cart Manager's state.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{info, warn};

use supplyline_core::checkout::{CheckoutFlow, CheckoutState};
use supplyline_core::types::CartSnapshot;

use crate::api::CartApi;
use crate::error::{ClientError, WizardError};

/// Drives the buyer from a cart snapshot to a submitted order.
pub struct CheckoutWizard<A: CartApi> {
    api: A,
    flow: CheckoutFlow,
}

impl<A: CartApi> CheckoutWizard<A> {
    /// Enters checkout with the snapshot taken at this moment.
    pub fn begin(api: A, snapshot: CartSnapshot) -> Self {
        CheckoutWizard {
            api,
            flow: CheckoutFlow::new(snapshot),
        }
    }

    /// The underlying flow: state, forms, totals, step transitions.
    pub fn flow(&self) -> &CheckoutFlow {
        &self.flow
    }

    /// Mutable flow access for form binding and step navigation
    /// (`submit_shipping`, `submit_payment`, `back`, ...). Every
    /// transition still goes through the flow's own gates.
    pub fn flow_mut(&mut self) -> &mut CheckoutFlow {
        &mut self.flow
    }

    /// Confirms the order from REVIEW.
    ///
    /// Sends the single composite request. On success the flow
    /// terminates in `Completed` and the order id is returned. On
    /// failure the flow returns to REVIEW with the server's message (or
    /// the transport message) recorded; every entered value is retained
    /// and the buyer may resubmit without re-entering anything.
    ///
    /// The SUBMITTING state is the busy flag: a second call while one
    /// submission is outstanding fails the REVIEW gate.
    pub async fn place_order(&mut self) -> Result<String, WizardError> {
        let request = self.flow.place_order()?;
        info!(
            total_cents = self.flow.totals().total_cents,
            "submitting order"
        );

        match self.api.submit_order(&request).await {
            Ok(confirmation) => {
                self.flow.order_accepted(confirmation.order_id.clone())?;
                info!(order_id = %confirmation.order_id, "order accepted");
                Ok(confirmation.order_id)
            }
            Err(err) => {
                let message = match &err {
                    ClientError::BusinessRule(m) | ClientError::Transient(m) => m.clone(),
                    other => other.to_string(),
                };
                warn!(%message, "order submission failed");
                self.flow.order_rejected(message)?;
                Err(err.into())
            }
        }
    }

    /// Convenience view of the current state for the host UI.
    pub fn state(&self) -> &CheckoutState {
        self.flow.state()
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
    use supplyline_core::types::{CartLineItem, PaymentMethod};

    use crate::api::OrderConfirmation;
    use crate::error::ClientResult;

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

    /// Order endpoint double with scripted responses.
    struct FakeOrders {
        responses: Mutex<Vec<ClientResult<OrderConfirmation>>>,
        submissions: Mutex<usize>,
    }

    impl FakeOrders {
        fn scripted(responses: Vec<ClientResult<OrderConfirmation>>) -> Self {
            FakeOrders {
                responses: Mutex::new(responses),
                submissions: Mutex::new(0),
            }
        }

        fn submissions(&self) -> usize {
            *self.submissions.lock().unwrap()
        }
    }

    #[async_trait]
    impl CartApi for FakeOrders {
        async fn fetch_cart(&self) -> ClientResult<CartSnapshot> {
            unreachable!("the wizard never reads the cart")
        }

        async fn update_quantity(
            &self,
            _line_item_id: &str,
            _quantity: i64,
        ) -> ClientResult<CartLineItem> {
            unreachable!("the wizard never mutates the cart")
        }

        async fn remove_item(&self, _line_item_id: &str) -> ClientResult<()> {
            unreachable!("the wizard never mutates the cart")
        }

        async fn clear_cart(&self) -> ClientResult<()> {
            unreachable!("the wizard never clears the cart")
        }

        async fn submit_order(&self, _request: &OrderRequest) -> ClientResult<OrderConfirmation> {
            *self.submissions.lock().unwrap() += 1;
            self.responses.lock().unwrap().remove(0)
        }
    }

    fn wizard_at_review(api: FakeOrders) -> CheckoutWizard<FakeOrders> {
        let snapshot = CartSnapshot::new(vec![line_item("li-1", 2999, 2)]);
        let mut wizard = CheckoutWizard::begin(api, snapshot);

        let info = wizard.flow_mut().shipping_info_mut();
        info.first_name = "Dana".to_string();
        info.last_name = "Buyer".to_string();
        info.address = "200 Dock St".to_string();
        info.city = "Portland".to_string();
        info.state = "Maine".to_string();
        info.postal_code = "04101".to_string();
        info.phone_number = "0207555014".to_string();
        wizard.flow_mut().submit_shipping().unwrap();

        let form = wizard.flow_mut().payment_form_mut();
        form.method = PaymentMethod::Net30;
        wizard.flow_mut().submit_payment().unwrap();

        wizard
    }

    #[tokio::test]
    async fn test_successful_order_completes_wizard() {
        let api = FakeOrders::scripted(vec![Ok(OrderConfirmation {
            order_id: "order-123".to_string(),
        })]);
        let mut wizard = wizard_at_review(api);

        let order_id = wizard.place_order().await.unwrap();
        assert_eq!(order_id, "order-123");
        assert_eq!(
            wizard.state(),
            &CheckoutState::Completed {
                order_id: "order-123".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_rejected_order_returns_to_review_and_allows_retry() {
        let api = FakeOrders::scripted(vec![
            Err(ClientError::BusinessRule("Insufficient stock".to_string())),
            Ok(OrderConfirmation {
                order_id: "order-124".to_string(),
            }),
        ]);
        let mut wizard = wizard_at_review(api);

        let err = wizard.place_order().await.unwrap_err();
        assert!(matches!(
            err,
            WizardError::Client(ClientError::BusinessRule(_))
        ));
        assert_eq!(wizard.state(), &CheckoutState::Review);
        assert_eq!(wizard.flow().last_error(), Some("Insufficient stock"));
        // Entered data survived the rejection.
        assert_eq!(wizard.flow().shipping_info().postal_code, "04101");

        // Resubmission needs no re-entry.
        let order_id = wizard.place_order().await.unwrap();
        assert_eq!(order_id, "order-124");
        assert_eq!(wizard.api.submissions(), 2);
    }

    #[tokio::test]
    async fn test_transient_failure_also_returns_to_review() {
        let api = FakeOrders::scripted(vec![Err(ClientError::Transient(
            "connection reset".to_string(),
        ))]);
        let mut wizard = wizard_at_review(api);

        let err = wizard.place_order().await.unwrap_err();
        assert!(matches!(err, WizardError::Client(ClientError::Transient(_))));
        assert_eq!(wizard.state(), &CheckoutState::Review);
        assert_eq!(wizard.flow().last_error(), Some("connection reset"));
    }

    #[tokio::test]
    async fn test_place_order_outside_review_is_rejected() {
        let api = FakeOrders::scripted(vec![]);
        let snapshot = CartSnapshot::new(vec![line_item("li-1", 2999, 2)]);
        let mut wizard = CheckoutWizard::begin(api, snapshot);

        // Still on SHIPPING: the gate refuses and nothing is sent.
        let err = wizard.place_order().await.unwrap_err();
        assert!(matches!(err, WizardError::Checkout(_)));
        assert_eq!(wizard.api.submissions(), 0);
    }

    #[tokio::test]
    async fn test_empty_cart_never_submits() {
        let api = FakeOrders::scripted(vec![]);
        let mut wizard = CheckoutWizard::begin(api, CartSnapshot::default());

        assert_eq!(wizard.state(), &CheckoutState::EmptyCart);
        let err = wizard.place_order().await.unwrap_err();
        assert!(matches!(err, WizardError::Checkout(_)));
        assert_eq!(wizard.api.submissions(), 0);
    }
}
