//! # Client Error Types
//!
//! The error taxonomy for remote Cart/Order Service operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Supplyline                             │
//! │                                                                         │
//! │  reqwest transport error ──┐                                            │
//! │  401 / expired token ──────┤                                            │
//! │  error body {message} ─────┼──► translated at the operation boundary   │
//! │                            │    (api.rs) into ONE of:                   │
//! │                            ▼                                            │
//! │   Authentication  → clear credentials, redirect to login               │
//! │   Transient       → show message, offer retry, state unchanged         │
//! │   BusinessRule    → server's message verbatim, wizard back to REVIEW   │
//! │                                                                         │
//! │  Validation errors never appear here: they are FieldErrors in          │
//! │  supplyline-core and never contact the network.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use supplyline_core::error::CheckoutError;
use thiserror::Error;

/// Errors from remote Cart/Order Service operations.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Missing or expired session token, or a 401 from the service.
    /// Recovered by clearing stored credentials and redirecting to
    /// login; never silently retried.
    #[error("authentication required: {0}")]
    Authentication(String),

    /// The service rejected the order at confirm time (e.g. stock ran
    /// out). The message is the server's, verbatim.
    #[error("{0}")]
    BusinessRule(String),

    /// Any other network or server failure. Retryable; no partial
    /// mutation is assumed to have applied unless the server confirmed.
    #[error("{0}")]
    Transient(String),

    /// Invalid client configuration (bad base URL, client build
    /// failure). Not recoverable at runtime.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// True when the caller should clear the session and redirect to
    /// login.
    pub fn is_authentication(&self) -> bool {
        matches!(self, ClientError::Authentication(_))
    }
}

/// Raw transport failures are retryable as far as the UI is concerned.
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transient(format!("request failed: {err}"))
    }
}

/// Convenience type alias for Results with ClientError.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors from the checkout wizard: either a local state-machine /
/// validation failure or a remote one.
#[derive(Debug, Clone, Error)]
pub enum WizardError {
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_rule_message_is_verbatim() {
        let err = ClientError::BusinessRule("Insufficient stock".to_string());
        assert_eq!(err.to_string(), "Insufficient stock");
    }

    #[test]
    fn test_is_authentication() {
        assert!(ClientError::Authentication("expired".to_string()).is_authentication());
        assert!(!ClientError::Transient("timeout".to_string()).is_authentication());
    }
}
