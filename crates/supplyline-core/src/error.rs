//! # Error Types
//!
//! Domain-specific error types for supplyline-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  supplyline-core errors (this file)                                    │
//! │  ├── ValidationError  - single-field validation failures               │
//! │  │       (collected into validation::FieldErrors per step)             │
//! │  └── CheckoutError    - illegal checkout transitions                   │
//! │                                                                         │
//! │  supplyline-client errors (separate crate)                             │
//! │  └── ClientError      - Authentication / Transient / BusinessRule      │
//! │                                                                         │
//! │  Validation errors never leave the checkout step that produced them;   │
//! │  they are rendered per-field and never contact the network.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, step, event)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::validation::FieldErrors;

// =============================================================================
// Validation Error
// =============================================================================

/// A single field's validation failure.
///
/// Rendered to a message and collected into a
/// [`FieldErrors`](crate::validation::FieldErrors) map keyed by field
/// name, so the UI can annotate each input independently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field must be exactly `len` digits.
    #[error("{field} must be exactly {len} digits")]
    ExactDigits { field: String, len: usize },

    /// Field must not contain digit characters.
    #[error("{field} must not contain digits")]
    NoDigitsAllowed { field: String },

    /// Invalid format (e.g., malformed expiration date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// The name of the field this error is attached to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::ExactDigits { field, .. }
            | ValidationError::NoDigitsAllowed { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Checkout Error
// =============================================================================

/// Checkout state machine errors.
///
/// The checkout flow is an explicit state machine: each operation is
/// legal only in specific states, and anything else is an
/// `InvalidTransition` rather than silent misbehavior.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Step validation failed; the flow stays on the current step.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// The requested event is not legal in the current state.
    #[error("cannot {event} while checkout is {state}")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },
}

// =============================================================================
// Unit Tests
// =============================================================================
