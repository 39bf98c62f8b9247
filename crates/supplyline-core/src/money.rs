//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A wholesale cart multiplies prices by bulk quantities all day:         │
//! │    29.99 × 144 units must be exactly 4318.56, every time               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    2999 cents × 144 = 431856 cents, exactly                            │
//! │    Rounding happens in ONE place (tax) and is explicit                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use supplyline_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(2999); // $29.99
//!
//! // Arithmetic operations
//! let line_total = price * 2;                      // $59.98
//! let with_fee = price + Money::from_cents(2500);  // $54.99
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for credits and adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// CartLineItem.unit_price ──► line_total() ──► CartSnapshot.subtotal()
///                                                     │
///                                      pricing::order_totals()
///                                                     │
///                                subtotal + tax + shipping = total
/// ```
/// Every monetary value in the cart and checkout flows through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use supplyline_core::money::Money;
    ///
    /// let price = Money::from_cents(2999); // Represents $29.99
    /// assert_eq!(price.cents(), 2999);
    /// ```
    ///
    /// ## Why Cents?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// The wire protocol, calculations, and stored snapshots all use cents.
    /// Only the UI converts to dollars for display.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    ///
    /// ## Example
    /// ```rust
    /// use supplyline_core::money::Money;
    ///
    /// let zero = Money::zero();
    /// assert_eq!(zero.cents(), 0);
    /// assert!(zero.is_zero());
    /// ```
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Calculates tax on this amount, rounding half-up at the cent.
    ///
    /// ## Rounding Contract
    /// Tax is computed on the UNROUNDED amount and rounds exactly once,
    /// here. Because the amount is exact integer cents, no compounding
    /// rounding error can be introduced upstream of this call.
    ///
    /// ## Implementation
    /// Integer math: `(amount * rate + 5000) / 10000`
    /// The +5000 provides half-up rounding (5000/10000 = 0.5).
    /// i128 intermediate prevents overflow on large wholesale orders.
    ///
    /// ## Example
    /// ```rust
    /// use supplyline_core::money::Money;
    /// use supplyline_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(5998); // $59.98
    /// let rate = TaxRate::from_bps(800);      // 8%
    ///
    /// let tax = subtotal.calculate_tax(rate);
    /// // $59.98 × 8% = $4.7984 → rounds to $4.80
    /// assert_eq!(tax.cents(), 480);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // rate.bps() is basis points: 800 = 8%
        // Formula: amount_cents * bps / 10000, rounded half-up
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use supplyline_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2999); // $29.99
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert_eq!(line_total.cents(), 5998); // $59.98
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. Use frontend formatting for actual UI
/// display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
