//! # Checkout Flow
//!
//! The three-step checkout wizard as an explicit state machine.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout State Machine                             │
//! │                                                                         │
//! │  new(cart)                                                              │
//! │     ├── cart empty ────► EMPTY_CART  (terminal: "browse products")     │
//! │     │                                                                   │
//! │     └── cart non-empty ► SHIPPING                                       │
//! │                             │  submit_shipping (validates)              │
//! │                             ▼                                           │
//! │                          PAYMENT ◄──── back (data retained)             │
//! │                             │  submit_payment (validates)               │
//! │                             ▼                                           │
//! │                          REVIEW ◄───── back (data retained)             │
//! │                             │  place_order                              │
//! │                             ▼                                           │
//! │                         SUBMITTING                                      │
//! │                             ├── order_accepted ──► COMPLETED (terminal) │
//! │                             └── order_rejected ──► REVIEW               │
//! │                                  (message surfaced, data retained,      │
//! │                                   resubmission allowed)                 │
//! │                                                                         │
//! │  Every other (state, event) pair is an InvalidTransition error.         │
//! │  The current step is an enum, not a mutable field: skipping straight    │
//! │  to REVIEW is unrepresentable.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The flow takes the cart snapshot BY VALUE at entry and never sees
//! later cart mutations. Form data lives beside the state, so moving
//! between steps never discards entered values.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CheckoutError;
use crate::pricing::{self, OrderTotals};
use crate::types::{CartSnapshot, PaymentForm, PaymentInfo, ShippingInfo, ShippingMethod};
use crate::validation::{validate_payment, validate_shipping};

// =============================================================================
// Checkout State
// =============================================================================

/// Where the buyer is in the checkout wizard.
///
/// `EmptyCart` and `Completed` are terminal; no event leaves them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "step")]
#[ts(export)]
pub enum CheckoutState {
    /// Entered checkout with nothing in the cart; only exit is leaving
    /// for the catalog.
    #[serde(rename = "EMPTY_CART")]
    EmptyCart,
    /// Step 1: collecting shipping details.
    #[serde(rename = "SHIPPING")]
    Shipping,
    /// Step 2: collecting payment details.
    #[serde(rename = "PAYMENT")]
    Payment,
    /// Step 3: review totals and confirm.
    #[serde(rename = "REVIEW")]
    Review,
    /// Order request is in flight; exactly one may be outstanding.
    #[serde(rename = "SUBMITTING")]
    Submitting,
    /// Order accepted; the wizard is done.
    #[serde(rename = "COMPLETED", rename_all = "camelCase")]
    Completed { order_id: String },
}

impl CheckoutState {
    /// Short name used in transition error messages.
    pub fn name(&self) -> &'static str {
        match self {
            CheckoutState::EmptyCart => "empty-cart",
            CheckoutState::Shipping => "shipping",
            CheckoutState::Payment => "payment",
            CheckoutState::Review => "review",
            CheckoutState::Submitting => "submitting",
            CheckoutState::Completed { .. } => "completed",
        }
    }

    /// True for states no event may leave.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CheckoutState::EmptyCart | CheckoutState::Completed { .. }
        )
    }
}

// =============================================================================
// Order Request
// =============================================================================

/// The composite payload sent once on final confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderRequest {
    pub shipping_info: ShippingInfo,
    pub payment_info: PaymentInfo,
    pub shipping_method: ShippingMethod,
}

// =============================================================================
// Checkout Flow
// =============================================================================

/// The checkout wizard's state and form data.
///
/// All transitions go through the methods below; the fields are private
/// so the state can only change along the edges in the diagram above.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    state: CheckoutState,
    cart: CartSnapshot,
    shipping_info: ShippingInfo,
    payment_form: PaymentForm,
    shipping_method: ShippingMethod,
    /// Message from the most recent rejected submission, shown on REVIEW.
    last_error: Option<String>,
}

impl CheckoutFlow {
    /// Enters checkout with the cart snapshot taken at this moment.
    ///
    /// An empty cart lands in the terminal `EmptyCart` state; the UI
    /// renders a "browse products" prompt and nothing else can happen.
    pub fn new(cart: CartSnapshot) -> Self {
        let state = if cart.is_empty() {
            CheckoutState::EmptyCart
        } else {
            CheckoutState::Shipping
        };
        CheckoutFlow {
            state,
            cart,
            shipping_info: ShippingInfo::default(),
            payment_form: PaymentForm::default(),
            shipping_method: ShippingMethod::default(),
            last_error: None,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Current wizard state.
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// The cart snapshot taken at entry (never refreshed).
    pub fn cart(&self) -> &CartSnapshot {
        &self.cart
    }

    /// Shipping form data.
    pub fn shipping_info(&self) -> &ShippingInfo {
        &self.shipping_info
    }

    /// Mutable shipping form data (UI binding; also used for profile
    /// pre-fill at entry).
    pub fn shipping_info_mut(&mut self) -> &mut ShippingInfo {
        &mut self.shipping_info
    }

    /// Payment form data.
    pub fn payment_form(&self) -> &PaymentForm {
        &self.payment_form
    }

    /// Mutable payment form data (UI binding).
    pub fn payment_form_mut(&mut self) -> &mut PaymentForm {
        &mut self.payment_form
    }

    /// Selected shipping method.
    pub fn shipping_method(&self) -> ShippingMethod {
        self.shipping_method
    }

    /// Selects the shipping method. Totals pick it up on the next call.
    pub fn set_shipping_method(&mut self, method: ShippingMethod) {
        self.shipping_method = method;
    }

    /// Prices the entry snapshot for the selected shipping method.
    /// Recomputed on every call, never cached.
    pub fn totals(&self) -> OrderTotals {
        pricing::order_totals(&self.cart, self.shipping_method)
    }

    /// Message from the most recent rejected submission, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// SHIPPING → PAYMENT, gated by the shipping validators.
    pub fn submit_shipping(&mut self) -> Result<(), CheckoutError> {
        self.expect_state(&CheckoutState::Shipping, "submit shipping")?;

        let errors = validate_shipping(&self.shipping_info);
        if !errors.is_empty() {
            return Err(CheckoutError::Validation(errors));
        }

        self.state = CheckoutState::Payment;
        Ok(())
    }

    /// PAYMENT → REVIEW, gated by the payment validators for the
    /// selected method.
    pub fn submit_payment(&mut self) -> Result<(), CheckoutError> {
        self.expect_state(&CheckoutState::Payment, "submit payment")?;

        let errors = validate_payment(&self.payment_form);
        if !errors.is_empty() {
            return Err(CheckoutError::Validation(errors));
        }

        self.state = CheckoutState::Review;
        Ok(())
    }

    /// PAYMENT → SHIPPING or REVIEW → PAYMENT. Entered values are
    /// retained; back-navigation is unrestricted and lossless.
    pub fn back(&mut self) -> Result<(), CheckoutError> {
        match self.state {
            CheckoutState::Payment => {
                self.state = CheckoutState::Shipping;
                Ok(())
            }
            CheckoutState::Review => {
                self.state = CheckoutState::Payment;
                Ok(())
            }
            _ => Err(self.invalid("go back")),
        }
    }

    /// REVIEW → SUBMITTING. Yields the composite order request for the
    /// caller to send; exactly one submission may be outstanding.
    ///
    /// Both steps re-validate here so a form edited through the `_mut`
    /// accessors after advancing can never reach the wire invalid.
    pub fn place_order(&mut self) -> Result<OrderRequest, CheckoutError> {
        self.expect_state(&CheckoutState::Review, "place order")?;

        let mut errors = validate_shipping(&self.shipping_info);
        errors.merge(validate_payment(&self.payment_form));
        if !errors.is_empty() {
            return Err(CheckoutError::Validation(errors));
        }

        self.last_error = None;
        self.state = CheckoutState::Submitting;
        Ok(OrderRequest {
            shipping_info: self.shipping_info.clone(),
            payment_info: self.payment_form.to_payment_info(),
            shipping_method: self.shipping_method,
        })
    }

    /// SUBMITTING → COMPLETED. The wizard is finished; the service
    /// empties the cart as a side effect of order creation.
    pub fn order_accepted(&mut self, order_id: String) -> Result<(), CheckoutError> {
        self.expect_state(&CheckoutState::Submitting, "accept order")?;
        self.state = CheckoutState::Completed { order_id };
        Ok(())
    }

    /// SUBMITTING → REVIEW. The server's message is surfaced verbatim;
    /// every entered value is retained and resubmission is allowed.
    pub fn order_rejected(&mut self, message: String) -> Result<(), CheckoutError> {
        self.expect_state(&CheckoutState::Submitting, "reject order")?;
        self.last_error = Some(message);
        self.state = CheckoutState::Review;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn expect_state(
        &self,
        expected: &CheckoutState,
        event: &'static str,
    ) -> Result<(), CheckoutError> {
        if &self.state == expected {
            Ok(())
        } else {
            Err(self.invalid(event))
        }
    }

    fn invalid(&self, event: &'static str) -> CheckoutError {
        CheckoutError::InvalidTransition {
            state: self.state.name(),
            event,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CartLineItem, PaymentMethod};

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

    fn cart() -> CartSnapshot {
        CartSnapshot::new(vec![line_item("1", 2999, 2)])
    }

    fn fill_valid_shipping(flow: &mut CheckoutFlow) {
        let info = flow.shipping_info_mut();
        info.first_name = "Dana".to_string();
        info.last_name = "Buyer".to_string();
        info.company_name = "Harbor Goods LLC".to_string();
        info.address = "200 Dock St".to_string();
        info.city = "Portland".to_string();
        info.state = "Maine".to_string();
        info.postal_code = "04101".to_string();
        info.phone_number = "0207555014".to_string();
    }

    fn fill_valid_card(flow: &mut CheckoutFlow) {
        let form = flow.payment_form_mut();
        form.method = PaymentMethod::CreditCard;
        form.card_number = "4111 1111 1111 1".to_string();
        form.expiration_date = "12/27".to_string();
        form.cvv = "123".to_string();
        form.card_holder_name = "Dana Buyer".to_string();
    }

    fn flow_at_review() -> CheckoutFlow {
        let mut flow = CheckoutFlow::new(cart());
        fill_valid_shipping(&mut flow);
        flow.submit_shipping().unwrap();
        fill_valid_card(&mut flow);
        flow.submit_payment().unwrap();
        flow
    }

    #[test]
    fn test_empty_cart_is_terminal() {
        let mut flow = CheckoutFlow::new(CartSnapshot::default());
        assert_eq!(flow.state(), &CheckoutState::EmptyCart);
        assert!(flow.state().is_terminal());

        let err = flow.submit_shipping().unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidTransition { .. }));
    }

    #[test]
    fn test_happy_path_to_completed() {
        let mut flow = flow_at_review();
        assert_eq!(flow.state(), &CheckoutState::Review);

        let request = flow.place_order().unwrap();
        assert_eq!(flow.state(), &CheckoutState::Submitting);
        assert_eq!(request.shipping_info.postal_code, "04101");
        match request.payment_info {
            PaymentInfo::CreditCard { ref card_number, .. } => {
                assert_eq!(card_number, "4111111111111");
            }
            ref other => panic!("expected credit card payload, got {:?}", other),
        }

        flow.order_accepted("order-77".to_string()).unwrap();
        assert_eq!(
            flow.state(),
            &CheckoutState::Completed {
                order_id: "order-77".to_string()
            }
        );
        assert!(flow.state().is_terminal());
    }

    #[test]
    fn test_invalid_shipping_blocks_payment() {
        let mut flow = CheckoutFlow::new(cart());
        fill_valid_shipping(&mut flow);
        flow.shipping_info_mut().postal_code = "1234".to_string();

        let err = flow.submit_shipping().unwrap_err();
        match err {
            CheckoutError::Validation(errors) => {
                assert!(errors.get("postalCode").is_some());
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        // Still on shipping: PAYMENT was never reached.
        assert_eq!(flow.state(), &CheckoutState::Shipping);
    }

    #[test]
    fn test_invalid_payment_blocks_review() {
        let mut flow = CheckoutFlow::new(cart());
        fill_valid_shipping(&mut flow);
        flow.submit_shipping().unwrap();
        fill_valid_card(&mut flow);
        flow.payment_form_mut().cvv = "12".to_string();

        assert!(matches!(
            flow.submit_payment().unwrap_err(),
            CheckoutError::Validation(_)
        ));
        assert_eq!(flow.state(), &CheckoutState::Payment);
    }

    #[test]
    fn test_back_navigation_retains_data() {
        let mut flow = flow_at_review();

        flow.back().unwrap();
        assert_eq!(flow.state(), &CheckoutState::Payment);
        flow.back().unwrap();
        assert_eq!(flow.state(), &CheckoutState::Shipping);

        // Nothing was discarded on the way back.
        assert_eq!(flow.shipping_info().address, "200 Dock St");
        assert_eq!(flow.payment_form().card_number, "4111 1111 1111 1");

        // And the same data advances again without re-entry.
        flow.submit_shipping().unwrap();
        flow.submit_payment().unwrap();
        assert_eq!(flow.state(), &CheckoutState::Review);
    }

    #[test]
    fn test_back_from_shipping_is_invalid() {
        let mut flow = CheckoutFlow::new(cart());
        assert!(matches!(
            flow.back().unwrap_err(),
            CheckoutError::InvalidTransition { .. }
        ));
    }

    #[test]
    fn test_rejected_submission_returns_to_review() {
        let mut flow = flow_at_review();
        flow.place_order().unwrap();

        flow.order_rejected("Insufficient stock".to_string()).unwrap();
        assert_eq!(flow.state(), &CheckoutState::Review);
        assert_eq!(flow.last_error(), Some("Insufficient stock"));

        // Data intact; resubmission possible without re-entering anything.
        assert_eq!(flow.shipping_info().postal_code, "04101");
        let request = flow.place_order().unwrap();
        assert_eq!(request.shipping_info.postal_code, "04101");
        // A fresh submission attempt clears the stale error message.
        assert_eq!(flow.last_error(), None);
    }

    #[test]
    fn test_skipping_steps_is_unrepresentable() {
        let mut flow = CheckoutFlow::new(cart());

        // No way to place an order from SHIPPING.
        assert!(matches!(
            flow.place_order().unwrap_err(),
            CheckoutError::InvalidTransition { .. }
        ));
        // No way to submit payment before shipping.
        assert!(matches!(
            flow.submit_payment().unwrap_err(),
            CheckoutError::InvalidTransition { .. }
        ));
        // No way to accept an order that was never submitted.
        assert!(matches!(
            flow.order_accepted("order-1".to_string()).unwrap_err(),
            CheckoutError::InvalidTransition { .. }
        ));
    }

    #[test]
    fn test_place_order_revalidates_edited_form() {
        let mut flow = flow_at_review();
        // Sneak an invalid value in after the step already validated.
        flow.shipping_info_mut().postal_code = "12".to_string();

        assert!(matches!(
            flow.place_order().unwrap_err(),
            CheckoutError::Validation(_)
        ));
        assert_eq!(flow.state(), &CheckoutState::Review);
    }

    #[test]
    fn test_shipping_method_affects_totals() {
        let mut flow = flow_at_review();

        assert_eq!(flow.totals().total_cents, 6478);
        flow.set_shipping_method(ShippingMethod::Express);
        assert_eq!(flow.totals().total_cents, 8978);

        let request = flow.place_order().unwrap();
        assert_eq!(request.shipping_method, ShippingMethod::Express);
    }

    #[test]
    fn test_state_wire_shape() {
        let state = CheckoutState::Completed {
            order_id: "order-77".to_string(),
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["step"], "COMPLETED");
        assert_eq!(json["orderId"], "order-77");

        assert_eq!(
            serde_json::to_value(&CheckoutState::Shipping).unwrap()["step"],
            "SHIPPING"
        );
    }
}
