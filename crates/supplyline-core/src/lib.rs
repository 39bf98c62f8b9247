//! # supplyline-core: Pure Business Logic for Supplyline
//!
//! This crate is the **heart** of the Supplyline cart and checkout. It
//! contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Supplyline Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Storefront Frontend                           │   │
//! │  │    Catalog UI ──► Cart UI ──► Checkout Wizard UI               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  supplyline-client                              │   │
//! │  │    CartManager, CheckoutWizard, Cart/Order Service HTTP        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ supplyline-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ checkout  │  │ validation│  │   │
//! │  │   │ LineItem  │  │   Money   │  │   Flow    │  │   rules   │  │   │
//! │  │   │ Snapshot  │  │  TaxCalc  │  │  States   │  │  FieldErrs│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                      ┌───────────┐                             │   │
//! │  │                      │  pricing  │                             │   │
//! │  │                      └───────────┘                             │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CartLineItem, CartSnapshot, ShippingInfo, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`checkout`] - The checkout wizard state machine
//! - [`validation`] - Step-local validation rules
//! - [`pricing`] - Order totals (subtotal, tax, shipping)
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, file system, and session storage access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use supplyline_core::money::Money;
//! use supplyline_core::types::TaxRate;
//! use supplyline_core::TAX_RATE_BPS;
//!
//! // Create money from cents (never from floats!)
//! let subtotal = Money::from_cents(5998); // $59.98
//!
//! // Calculate the flat 8% tax, rounded once at the cent
//! let tax = subtotal.calculate_tax(TaxRate::from_bps(TAX_RATE_BPS));
//! assert_eq!(tax.cents(), 480);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use supplyline_core::Money` instead of
// `use supplyline_core::money::Money`

pub use checkout::{CheckoutFlow, CheckoutState, OrderRequest};
pub use error::{CheckoutError, ValidationError};
pub use money::Money;
pub use pricing::OrderTotals;
pub use types::*;
pub use validation::FieldErrors;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat storefront tax rate in basis points (800 = 8%).
///
/// ## Business Reason
/// Multi-jurisdiction tax is out of scope for the storefront; the order
/// service applies the authoritative rate server-side and this constant
/// mirrors it for display.
pub const TAX_RATE_BPS: u32 = 800;

/// Flat express-shipping surcharge in cents ($25.00).
///
/// Standard shipping is free; express adds exactly this amount.
pub const EXPRESS_SURCHARGE_CENTS: i64 = 2500;
