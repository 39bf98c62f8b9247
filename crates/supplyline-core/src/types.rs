//! # Domain Types
//!
//! Core domain types for the Supplyline cart and checkout.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CartLineItem   │   │  CartSnapshot   │   │  ShippingInfo   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (opaque)    │   │  items (ordered)│   │  address        │       │
//! │  │  unit_price     │   │  subtotal()     │   │  postal_code    │       │
//! │  │  quantity       │   │  total_qty()    │   │  phone_number   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │ ShippingMethod  │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Standard(free) │   │  CreditCard     │       │
//! │  │  800 = 8%       │   │  Express(flat)  │   │  PurchaseOrder  │       │
//! │  └─────────────────┘   └─────────────────┘   │  Net30          │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A line item freezes the product's price and stock level at the moment it
//! was added. The cart never re-fetches live catalog prices; the server is
//! the only party that may revise a line.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::EXPRESS_SURCHARGE_CENTS;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 800 bps = 8% (the flat storefront rate, see [`crate::TAX_RATE_BPS`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// A single product entry in the buyer's cart.
///
/// ## Design Notes
/// - `id` is server-assigned and opaque; it stays stable for the life of
///   the cart and is the handle for quantity updates and removal.
/// - Descriptive fields and `unit_price_cents` are snapshots taken when
///   the item was added; they do not track later catalog changes.
/// - `stock_quantity` is informational only. Requesting more than the
///   supplier has on hand is allowed; fulfillment is the supplier's
///   responsibility.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineItem {
    /// Server-assigned line-item id (opaque, stable for the cart's life).
    pub id: String,

    /// Product this line refers to.
    pub product_id: String,

    /// Product name at time of add (frozen).
    pub product_name: String,

    /// SKU at time of add (frozen).
    pub sku: String,

    /// Brand at time of add (frozen).
    pub brand: String,

    /// Supplier display name at time of add (frozen).
    pub supplier_name: String,

    /// Unit price in cents at time of add (frozen).
    pub unit_price_cents: i64,

    /// Quantity requested. Positive; mutable through the Cart Manager.
    /// Deliberately NOT capped by `stock_quantity`.
    pub quantity: i64,

    /// Available stock at time of add. Display-only.
    pub stock_quantity: i64,
}

impl CartLineItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line total = unit price × quantity. Always derived, never stored.
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Whether the requested quantity exceeds the stock snapshot.
    /// Informational for the UI; never blocks anything.
    pub fn exceeds_stock(&self) -> bool {
        self.quantity > self.stock_quantity
    }
}

// =============================================================================
// Cart Snapshot
// =============================================================================

/// The fully-materialized view of the buyer's cart.
///
/// ## Invariants
/// - `items` preserve server response order (insertion order).
/// - `subtotal()` and `total_quantity()` are recomputed from `items` on
///   every call. They are methods, not fields, so a stale cached
///   aggregate is unrepresentable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    /// Line items in insertion order.
    pub items: Vec<CartLineItem>,
}

impl CartSnapshot {
    /// Creates a snapshot from line items.
    pub fn new(items: Vec<CartLineItem>) -> Self {
        CartSnapshot { items }
    }

    /// Sum of line totals over all items.
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, item| acc + item.line_total())
    }

    /// Sum of quantities over all items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finds a line item by its server-assigned id.
    pub fn find_item(&self, line_item_id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.id == line_item_id)
    }
}

// =============================================================================
// Shipping
// =============================================================================

/// How the order ships. Standard is free; Express adds a flat surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ShippingMethod {
    /// No shipping charge.
    #[serde(rename = "STANDARD")]
    Standard,
    /// Flat surcharge, see [`crate::EXPRESS_SURCHARGE_CENTS`].
    #[serde(rename = "EXPRESS")]
    Express,
}

impl ShippingMethod {
    /// The shipping charge for this method.
    pub fn surcharge(&self) -> Money {
        match self {
            ShippingMethod::Standard => Money::zero(),
            ShippingMethod::Express => Money::from_cents(EXPRESS_SURCHARGE_CENTS),
        }
    }
}

impl Default for ShippingMethod {
    fn default() -> Self {
        ShippingMethod::Standard
    }
}

/// Shipping details collected in checkout step 1.
///
/// Name and company fields are pre-filled from the merchant's account
/// profile; the UI renders them read-only. Validation rules live in
/// [`crate::validation::validate_shipping`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    /// Buyer's company, from the account profile (read-only in the UI).
    pub company_name: String,
    pub address: String,
    /// Suite / unit / apartment. Optional.
    pub apartment: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub phone_number: String,
}

// =============================================================================
// Payment
// =============================================================================

/// Accepted payment methods for wholesale orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    #[serde(rename = "CREDIT_CARD")]
    CreditCard,
    #[serde(rename = "PURCHASE_ORDER")]
    PurchaseOrder,
    #[serde(rename = "NET_30")]
    Net30,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::CreditCard
    }
}

/// Payment details as entered in checkout step 2.
///
/// ## Why every field, for every method?
/// The form retains whatever the buyer typed even when they switch
/// methods or navigate back - back-navigation never discards entered
/// values. Only the selected method's fields are validated and only
/// those fields are sent, via [`PaymentForm::to_payment_info`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentForm {
    pub method: PaymentMethod,
    /// Card number as displayed: digits grouped in blocks of 4.
    pub card_number: String,
    /// MM/YY.
    pub expiration_date: String,
    pub cvv: String,
    pub card_holder_name: String,
    pub purchase_order_number: String,
}

impl PaymentForm {
    /// Converts the form into the validated wire payload for the
    /// selected method, stripping display grouping from the card number.
    ///
    /// Callers validate first ([`crate::validation::validate_payment`]);
    /// the checkout flow enforces this before the form ever reaches an
    /// order request.
    pub fn to_payment_info(&self) -> PaymentInfo {
        match self.method {
            PaymentMethod::CreditCard => PaymentInfo::CreditCard {
                card_number: crate::validation::strip_card_number(&self.card_number),
                expiration_date: self.expiration_date.trim().to_string(),
                cvv: self.cvv.trim().to_string(),
                card_holder_name: self.card_holder_name.trim().to_string(),
            },
            PaymentMethod::PurchaseOrder => PaymentInfo::PurchaseOrder {
                purchase_order_number: self.purchase_order_number.trim().to_string(),
            },
            PaymentMethod::Net30 => PaymentInfo::Net30,
        }
    }
}

/// Validated payment payload, tagged by method on the wire.
///
/// Card data is validated client-side only and never charged here;
/// the order service owns all downstream payment handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "method")]
#[ts(export)]
pub enum PaymentInfo {
    #[serde(rename = "CREDIT_CARD", rename_all = "camelCase")]
    CreditCard {
        /// 13 digits, spaces already stripped.
        card_number: String,
        /// MM/YY.
        expiration_date: String,
        cvv: String,
        card_holder_name: String,
    },
    #[serde(rename = "PURCHASE_ORDER", rename_all = "camelCase")]
    PurchaseOrder { purchase_order_number: String },
    #[serde(rename = "NET_30")]
    Net30,
}

// =============================================================================
// Unit Tests
// =============================================================================
