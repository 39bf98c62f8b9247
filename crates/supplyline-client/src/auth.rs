//! # Session Token Handling
//!
//! Bearer-token access for the Cart/Order Service.
//!
//! ## Expiry Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Token Checks Around Every Request                          │
//! │                                                                         │
//! │  before request:  token missing?          → Authentication (no call)   │
//! │                   exp claim in the past?  → Authentication (no call)   │
//! │  after request:   401 from the service    → Authentication             │
//! │                                                                         │
//! │  On any Authentication outcome the stored credentials are cleared      │
//! │  and the caller redirects to login. Nothing is retried silently.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session itself (login, refresh) is owned by the wider
//! application; this core only needs a "current token or nothing"
//! capability, plus the ability to clear it after an auth failure.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::debug;

/// Source of the session bearer token.
///
/// Implementations wrap whatever session storage the host application
/// uses. `clear` is called after an authentication failure so the next
/// view entry lands on the login screen rather than replaying a dead
/// token.
pub trait TokenStore: Send + Sync {
    /// The current session token, if any.
    fn token(&self) -> Option<String>;

    /// Drops the stored credentials.
    fn clear(&self);
}

/// In-memory token store for embedding and tests.
///
/// Clones share the same underlying slot, so a client holding one clone
/// and a test holding another observe the same state.
#[derive(Debug, Clone, Default)]
pub struct SessionTokenStore {
    inner: Arc<Mutex<Option<String>>>,
}

impl SessionTokenStore {
    /// Creates an empty store (no session).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given token.
    pub fn with_token(token: impl Into<String>) -> Self {
        SessionTokenStore {
            inner: Arc::new(Mutex::new(Some(token.into()))),
        }
    }

    /// Replaces the stored token (e.g. after login).
    pub fn set_token(&self, token: impl Into<String>) {
        *self.inner.lock().expect("token store mutex poisoned") = Some(token.into());
    }
}

impl TokenStore for SessionTokenStore {
    fn token(&self) -> Option<String> {
        self.inner.lock().expect("token store mutex poisoned").clone()
    }

    fn clear(&self) {
        *self.inner.lock().expect("token store mutex poisoned") = None;
    }
}

// =============================================================================
// Expiry Claim Inspection
// =============================================================================

/// Only the registered claim we care about.
#[derive(Debug, Deserialize)]
struct ExpiryClaim {
    exp: Option<i64>,
}

/// Checks the token's embedded `exp` claim against the current time.
///
/// No signature verification happens client-side - the service is the
/// authority and will still 401 a forged token. A token without a
/// readable `exp` claim is treated as not locally expired for the same
/// reason.
pub fn token_is_expired(token: &str) -> bool {
    match decode_expiry(token) {
        Some(exp) => {
            let expired = Utc::now().timestamp() >= exp;
            if expired {
                debug!(exp, "session token expired locally");
            }
            expired
        }
        None => false,
    }
}

/// Decodes the `exp` claim without verifying the signature.
fn decode_expiry(token: &str) -> Option<i64> {
    // The algorithm is irrelevant with signature validation disabled;
    // HS256 just satisfies the Validation constructor.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.set_required_spec_claims::<&str>(&[]);

    jsonwebtoken::decode::<ExpiryClaim>(token, &DecodingKey::from_secret(&[]), &validation)
        .ok()
        .and_then(|data| data.claims.exp)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct Claims {
        sub: String,
        exp: i64,
    }

    fn token_with_exp(exp: i64) -> String {
        let claims = Claims {
            sub: "merchant-42".to_string(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("token encoding")
    }

    #[test]
    fn test_future_exp_is_not_expired() {
        let token = token_with_exp(Utc::now().timestamp() + 3600);
        assert!(!token_is_expired(&token));
    }

    #[test]
    fn test_past_exp_is_expired() {
        let token = token_with_exp(Utc::now().timestamp() - 3600);
        assert!(token_is_expired(&token));
    }

    #[test]
    fn test_garbage_token_is_not_locally_expired() {
        // The service's 401 stays authoritative for anything unreadable.
        assert!(!token_is_expired("not-a-jwt"));
        assert!(!token_is_expired(""));
    }

    #[test]
    fn test_store_clones_share_state() {
        let store = SessionTokenStore::with_token("tok-1");
        let view = store.clone();

        assert_eq!(view.token().as_deref(), Some("tok-1"));
        store.clear();
        assert_eq!(view.token(), None);

        view.set_token("tok-2");
        assert_eq!(store.token().as_deref(), Some("tok-2"));
    }
}
