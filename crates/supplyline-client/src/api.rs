//! # Cart/Order Service API
//!
//! Wire types and the HTTP client for the remote Cart/Order Service.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation          Method  Path               Body                    │
//! │  ─────────          ──────  ────               ────                    │
//! │  Get current cart   GET     /cart              -                       │
//! │  Update quantity    PUT     /cart/items/{id}   { quantity }            │
//! │  Remove line item   DELETE  /cart/items/{id}   -                       │
//! │  Clear cart         DELETE  /cart              -                       │
//! │  Submit order       POST    /orders            { shippingInfo,         │
//! │                                                  paymentInfo,          │
//! │                                                  shippingMethod }      │
//! │                                                                         │
//! │  Every request carries `Authorization: Bearer <token>`. A locally      │
//! │  expired token blocks the request before it is sent.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Status translation happens here and nowhere else: callers only ever
//! see [`ClientError`], never a raw transport error.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use supplyline_core::checkout::OrderRequest;
use supplyline_core::types::{CartLineItem, CartSnapshot};

use crate::auth::{self, TokenStore};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Wire Types
// =============================================================================

/// GET /cart response body.
///
/// The server reports aggregates alongside the items; the client treats
/// the items as the source of truth and recomputes (see
/// [`CartPayload::into_snapshot`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPayload {
    pub cart_items: Vec<CartLineItem>,
    pub subtotal_cents: i64,
    pub total_quantity: i64,
}

impl CartPayload {
    /// Builds the local snapshot, recomputing aggregates from the items.
    ///
    /// A server-reported aggregate that disagrees with the recomputation
    /// is logged and ignored; the recomputed value wins everywhere.
    pub fn into_snapshot(self) -> CartSnapshot {
        let snapshot = CartSnapshot::new(self.cart_items);
        let subtotal = snapshot.subtotal().cents();
        let quantity = snapshot.total_quantity();
        if subtotal != self.subtotal_cents || quantity != self.total_quantity {
            warn!(
                reported_subtotal = self.subtotal_cents,
                recomputed_subtotal = subtotal,
                reported_quantity = self.total_quantity,
                recomputed_quantity = quantity,
                "server-reported cart aggregates disagree with line items"
            );
        }
        snapshot
    }
}

/// PUT /cart/items/{id} request body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuantityUpdate {
    pub quantity: i64,
}

/// POST /orders success body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: String,
}

/// Error body shape shared by all endpoints.
#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

// =============================================================================
// CartApi Trait
// =============================================================================

/// The five remote operations the cart and checkout need.
///
/// A trait so the manager and wizard can be exercised against an
/// in-memory double; production code uses [`HttpCartClient`].
#[async_trait]
pub trait CartApi: Send + Sync {
    /// Fetches the current cart snapshot.
    async fn fetch_cart(&self) -> ClientResult<CartSnapshot>;

    /// Sets a line item's quantity; returns the updated line as the
    /// server sees it.
    async fn update_quantity(
        &self,
        line_item_id: &str,
        quantity: i64,
    ) -> ClientResult<CartLineItem>;

    /// Removes a line item.
    async fn remove_item(&self, line_item_id: &str) -> ClientResult<()>;

    /// Removes every line item.
    async fn clear_cart(&self) -> ClientResult<()>;

    /// Submits the composite order request.
    async fn submit_order(&self, request: &OrderRequest) -> ClientResult<OrderConfirmation>;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// reqwest-backed [`CartApi`] implementation.
pub struct HttpCartClient<T: TokenStore> {
    http: reqwest::Client,
    base_url: String,
    tokens: T,
}

impl<T: TokenStore> HttpCartClient<T> {
    /// Builds a client for the configured service.
    pub fn new(config: ClientConfig, tokens: T) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(HttpCartClient {
            http,
            base_url: config.base_url,
            tokens,
        })
    }

    /// The bearer token for the next request.
    ///
    /// A missing token or one whose `exp` claim has passed blocks the
    /// request entirely - no network call is made with dead credentials.
    fn bearer(&self) -> ClientResult<String> {
        let token = self
            .tokens
            .token()
            .ok_or_else(|| ClientError::Authentication("no session token".to_string()))?;

        if auth::token_is_expired(&token) {
            self.tokens.clear();
            return Err(ClientError::Authentication(
                "session token expired".to_string(),
            ));
        }

        Ok(token)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Translates a non-2xx response for cart operations.
    ///
    /// 401 clears credentials; anything else is Transient, carrying the
    /// server's message when the body has one.
    async fn ensure_success(&self, response: Response, operation: &str) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            self.tokens.clear();
            return Err(ClientError::Authentication(
                "session rejected by the cart service".to_string(),
            ));
        }
        let message = error_message(response).await;
        Err(ClientError::Transient(message.unwrap_or_else(|| {
            format!("{operation} failed with status {status}")
        })))
    }
}

/// Best-effort extraction of the `message` field from an error body.
async fn error_message(response: Response) -> Option<String> {
    let text = response.text().await.ok()?;
    serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.message)
}

/// Decodes a success body, folding malformed JSON into Transient.
async fn parse_json<D: serde::de::DeserializeOwned>(
    response: Response,
    what: &str,
) -> ClientResult<D> {
    response
        .json::<D>()
        .await
        .map_err(|e| ClientError::Transient(format!("malformed {what} response: {e}")))
}

#[async_trait]
impl<T: TokenStore> CartApi for HttpCartClient<T> {
    async fn fetch_cart(&self) -> ClientResult<CartSnapshot> {
        let token = self.bearer()?;
        debug!("GET /cart");

        let response = self
            .http
            .get(self.url("/cart"))
            .bearer_auth(&token)
            .send()
            .await?;
        let response = self.ensure_success(response, "cart load").await?;
        let payload: CartPayload = parse_json(response, "cart").await?;
        Ok(payload.into_snapshot())
    }

    async fn update_quantity(
        &self,
        line_item_id: &str,
        quantity: i64,
    ) -> ClientResult<CartLineItem> {
        let token = self.bearer()?;
        debug!(line_item_id, quantity, "PUT /cart/items");

        let response = self
            .http
            .put(self.url(&format!("/cart/items/{line_item_id}")))
            .bearer_auth(&token)
            .json(&QuantityUpdate { quantity })
            .send()
            .await?;
        let response = self.ensure_success(response, "quantity update").await?;
        parse_json(response, "line item").await
    }

    async fn remove_item(&self, line_item_id: &str) -> ClientResult<()> {
        let token = self.bearer()?;
        debug!(line_item_id, "DELETE /cart/items");

        let response = self
            .http
            .delete(self.url(&format!("/cart/items/{line_item_id}")))
            .bearer_auth(&token)
            .send()
            .await?;
        self.ensure_success(response, "item removal").await?;
        Ok(())
    }

    async fn clear_cart(&self) -> ClientResult<()> {
        let token = self.bearer()?;
        debug!("DELETE /cart");

        let response = self
            .http
            .delete(self.url("/cart"))
            .bearer_auth(&token)
            .send()
            .await?;
        self.ensure_success(response, "cart clear").await?;
        Ok(())
    }

    async fn submit_order(&self, request: &OrderRequest) -> ClientResult<OrderConfirmation> {
        let token = self.bearer()?;
        debug!("POST /orders");

        let response = self
            .http
            .post(self.url("/orders"))
            .bearer_auth(&token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return parse_json(response, "order confirmation").await;
        }
        if status == StatusCode::UNAUTHORIZED {
            self.tokens.clear();
            return Err(ClientError::Authentication(
                "session rejected by the order service".to_string(),
            ));
        }
        // An articulated message at confirm time is a business rule
        // (stock ran out, account on hold, ...) - surfaced verbatim.
        match error_message(response).await {
            Some(message) => Err(ClientError::BusinessRule(message)),
            None => Err(ClientError::Transient(format!(
                "order submission failed with status {status}"
            ))),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cart_payload_parses_camel_case() {
        let payload: CartPayload = serde_json::from_value(json!({
            "cartItems": [{
                "id": "li-1",
                "productId": "prod-1",
                "productName": "Bulk Olive Oil 5L",
                "sku": "OIL-5L",
                "brand": "Campo",
                "supplierName": "Campo Foods",
                "unitPriceCents": 2999,
                "quantity": 2,
                "stockQuantity": 40
            }],
            "subtotalCents": 5998,
            "totalQuantity": 2
        }))
        .unwrap();

        let snapshot = payload.into_snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.subtotal().cents(), 5998);
    }

    #[test]
    fn test_recomputed_aggregates_win_over_reported() {
        // The server claims nonsense totals; the items decide.
        let payload: CartPayload = serde_json::from_value(json!({
            "cartItems": [{
                "id": "li-1",
                "productId": "prod-1",
                "productName": "Bulk Olive Oil 5L",
                "sku": "OIL-5L",
                "brand": "Campo",
                "supplierName": "Campo Foods",
                "unitPriceCents": 2999,
                "quantity": 2,
                "stockQuantity": 40
            }],
            "subtotalCents": 1,
            "totalQuantity": 99
        }))
        .unwrap();

        let snapshot = payload.into_snapshot();
        assert_eq!(snapshot.subtotal().cents(), 5998);
        assert_eq!(snapshot.total_quantity(), 2);
    }

    #[test]
    fn test_quantity_update_body_shape() {
        let body = serde_json::to_value(QuantityUpdate { quantity: 7 }).unwrap();
        assert_eq!(body, json!({ "quantity": 7 }));
    }

    #[test]
    fn test_order_confirmation_shape() {
        let confirmation: OrderConfirmation =
            serde_json::from_value(json!({ "orderId": "order-123" })).unwrap();
        assert_eq!(confirmation.order_id, "order-123");
    }
}
