//! # Validation Module
//!
//! Step-local validation for the checkout wizard.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Step-Local Validation                              │
//! │                                                                         │
//! │  Buyer clicks "Continue" on a step                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_shipping / validate_payment  ← THIS MODULE                   │
//! │       │                                                                 │
//! │       ├── FieldErrors empty?   → advance to next step                  │
//! │       │                                                                 │
//! │       └── FieldErrors has entries → stay, annotate each field          │
//! │                                                                         │
//! │  Rules are pure functions of the current form state, evaluated on      │
//! │  submit attempt only - never continuously, never over the network.     │
//! │  Each field reports independently; one bad field never blocks          │
//! │  correcting another.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use supplyline_core::types::ShippingInfo;
//! use supplyline_core::validation::validate_shipping;
//!
//! let mut info = ShippingInfo::default();
//! info.address = "200 Dock St".to_string();
//! info.postal_code = "1234".to_string(); // one digit short
//!
//! let errors = validate_shipping(&info);
//! assert!(errors.get("postalCode").is_some());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{PaymentForm, PaymentMethod, ShippingInfo};

// =============================================================================
// Field Errors
// =============================================================================

/// An ordered field → message map produced by a step validator.
///
/// Empty map = the step may advance. Keys are the UI field names
/// (camelCase, matching the wire shape), so the frontend can attach each
/// message to its input directly. BTreeMap keeps iteration order
/// deterministic for rendering and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Creates an empty error map.
    pub fn new() -> Self {
        FieldErrors(BTreeMap::new())
    }

    /// Records a validation error under its field name.
    /// A later error for the same field replaces the earlier one.
    pub fn push(&mut self, err: ValidationError) {
        self.0.insert(err.field().to_string(), err.to_string());
    }

    /// The message for a field, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Folds another step's errors into this map. Field names never
    /// collide across steps, so no entry is lost.
    pub fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    /// True when every rule passed and the step may advance.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates (field, message) pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

// =============================================================================
// Character Helpers
// =============================================================================

/// Non-empty and every character an ASCII digit.
fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Any ASCII digit anywhere in the string.
fn contains_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

// =============================================================================
// Card Number Formatting
// =============================================================================

/// Strips spaces from a card number, leaving the raw digit string.
///
/// The inverse of [`format_card_number`]: stripping a formatted number
/// yields the original digits.
pub fn strip_card_number(card_number: &str) -> String {
    card_number.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Groups a card number's digits in blocks of 4 for display.
///
/// ## Example
/// ```rust
/// use supplyline_core::validation::format_card_number;
///
/// assert_eq!(format_card_number("4111111111111"), "4111 1111 1111 1");
/// ```
pub fn format_card_number(card_number: &str) -> String {
    let digits = strip_card_number(card_number);
    let mut out = String::with_capacity(digits.len() + digits.len() / 4);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// MM/YY with month 01-12.
fn is_valid_expiration(s: &str) -> bool {
    let s = s.trim();
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b'/' {
        return false;
    }
    let (month_part, year_part) = (&s[0..2], &s[3..5]);
    if !is_all_digits(month_part) || !is_all_digits(year_part) {
        return false;
    }
    let month: u32 = month_part.parse().unwrap_or(0);
    (1..=12).contains(&month)
}

// =============================================================================
// Step Validators
// =============================================================================

/// Validates the shipping step.
///
/// ## Rules
/// - `address` non-empty
/// - `postalCode` exactly 5 digits
/// - `phoneNumber` exactly 10 digits, starting with '0'
/// - `city` and `state` contain no digit characters
///
/// Returns an empty [`FieldErrors`] when the step may advance.
pub fn validate_shipping(info: &ShippingInfo) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if info.address.trim().is_empty() {
        errors.push(ValidationError::Required {
            field: "address".to_string(),
        });
    }

    let postal = info.postal_code.trim();
    if postal.len() != 5 || !is_all_digits(postal) {
        errors.push(ValidationError::ExactDigits {
            field: "postalCode".to_string(),
            len: 5,
        });
    }

    let phone = info.phone_number.trim();
    if phone.len() != 10 || !is_all_digits(phone) {
        errors.push(ValidationError::ExactDigits {
            field: "phoneNumber".to_string(),
            len: 10,
        });
    } else if !phone.starts_with('0') {
        errors.push(ValidationError::InvalidFormat {
            field: "phoneNumber".to_string(),
            reason: "must start with 0".to_string(),
        });
    }

    if contains_digit(&info.city) {
        errors.push(ValidationError::NoDigitsAllowed {
            field: "city".to_string(),
        });
    }

    if contains_digit(&info.state) {
        errors.push(ValidationError::NoDigitsAllowed {
            field: "state".to_string(),
        });
    }

    errors
}

/// Validates the payment step.
///
/// Rules are conditional on the selected method; fields belonging to
/// other methods are ignored entirely, whatever they contain.
///
/// ## Rules
/// - CREDIT_CARD: `cardNumber` exactly 13 digits after stripping spaces,
///   `expirationDate` MM/YY with month 01-12, `cvv` exactly 3 digits,
///   `cardHolderName` non-empty and digit-free
/// - PURCHASE_ORDER: `purchaseOrderNumber` non-empty
/// - NET_30: nothing further
pub fn validate_payment(form: &PaymentForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match form.method {
        PaymentMethod::CreditCard => {
            let digits = strip_card_number(&form.card_number);
            if digits.len() != 13 || !is_all_digits(&digits) {
                errors.push(ValidationError::ExactDigits {
                    field: "cardNumber".to_string(),
                    len: 13,
                });
            }

            if !is_valid_expiration(&form.expiration_date) {
                errors.push(ValidationError::InvalidFormat {
                    field: "expirationDate".to_string(),
                    reason: "must be MM/YY with month 01-12".to_string(),
                });
            }

            let cvv = form.cvv.trim();
            if cvv.len() != 3 || !is_all_digits(cvv) {
                errors.push(ValidationError::ExactDigits {
                    field: "cvv".to_string(),
                    len: 3,
                });
            }

            let holder = form.card_holder_name.trim();
            if holder.is_empty() {
                errors.push(ValidationError::Required {
                    field: "cardHolderName".to_string(),
                });
            } else if contains_digit(holder) {
                errors.push(ValidationError::NoDigitsAllowed {
                    field: "cardHolderName".to_string(),
                });
            }
        }
        PaymentMethod::PurchaseOrder => {
            if form.purchase_order_number.trim().is_empty() {
                errors.push(ValidationError::Required {
                    field: "purchaseOrderNumber".to_string(),
                });
            }
        }
        PaymentMethod::Net30 => {
            // Net-30 terms need nothing beyond the method selection.
        }
    }

    errors
}

// =============================================================================
// Unit Tests
// =============================================================================
