//! # supplyline-client: Remote Cart/Order Service Access
//!
//! Everything in Supplyline that touches the network lives here: the
//! bearer-token plumbing, the HTTP client for the Cart/Order Service,
//! the [`CartManager`] that keeps the local snapshot honest, and the
//! [`CheckoutWizard`] that turns a snapshot into a submitted order.
//!
//! ## Modules
//!
//! - [`auth`] - session token store and expiry-claim inspection
//! - [`config`] - service endpoint configuration
//! - [`api`] - wire types, the [`CartApi`] seam, the reqwest client
//! - [`manager`] - the Cart Manager (load, mutate, reload)
//! - [`wizard`] - the Checkout Wizard (flow + order submission)
//! - [`error`] - the Authentication / Transient / BusinessRule taxonomy
//!
//! ## Error Policy
//!
//! Raw transport errors never leave this crate. Every operation
//! translates failures at its boundary into [`ClientError`], and
//! validation problems never get this far - they are
//! [`FieldErrors`](supplyline_core::validation::FieldErrors) inside
//! supplyline-core and never contact the network.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod manager;
pub mod wizard;

pub use api::{CartApi, HttpCartClient, OrderConfirmation};
pub use auth::{SessionTokenStore, TokenStore};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, WizardError};
pub use manager::{CartManager, ClearOutcome, ConfirmPrompt};
pub use wizard::CheckoutWizard;
