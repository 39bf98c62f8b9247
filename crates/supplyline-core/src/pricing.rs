//! # Order Pricing
//!
//! Pure pricing computation for the checkout review step.
//!
//! ```text
//! subtotal = Σ line totals                  (exact integer cents)
//! tax      = subtotal × TAX_RATE            (8% flat, rounds once)
//! shipping = 0 | EXPRESS_SURCHARGE          (flat)
//! total    = subtotal + tax + shipping
//! ```
//!
//! Totals are recomputed from the cart snapshot on every call and never
//! cached; a stale total is unrepresentable. Because the subtotal is
//! exact cents, tax is computed on the unrounded subtotal and rounding
//! happens exactly once, inside `Money::calculate_tax`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartSnapshot, ShippingMethod, TaxRate};
use crate::TAX_RATE_BPS;

/// Priced breakdown of an order at the review step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderTotals {
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub shipping_cents: i64,
    pub total_cents: i64,
}

impl OrderTotals {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the tax as Money.
    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_cents(self.tax_cents)
    }

    /// Returns the shipping charge as Money.
    #[inline]
    pub fn shipping(&self) -> Money {
        Money::from_cents(self.shipping_cents)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// Prices a cart snapshot for the given shipping method.
///
/// Pure function of its inputs; call it on every render.
pub fn order_totals(snapshot: &CartSnapshot, shipping_method: ShippingMethod) -> OrderTotals {
    let subtotal = snapshot.subtotal();
    let tax = subtotal.calculate_tax(TaxRate::from_bps(TAX_RATE_BPS));
    let shipping = shipping_method.surcharge();
    let total = subtotal + tax + shipping;

    OrderTotals {
        subtotal_cents: subtotal.cents(),
        tax_cents: tax.cents(),
        shipping_cents: shipping.cents(),
        total_cents: total.cents(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
