//! Reference client and conformance harness for a signed, idempotent
//! checkout REST protocol.
//!
//! The crate covers the two load-bearing pieces of the protocol and the
//! plumbing around them:
//!
//! - **Request signing** ([`signer`]): HMAC-SHA256 over the canonical
//!   timestamp-plus-body byte sequence, plus assembly of the full wire
//!   header set with the omission/override hooks conformance scenarios use.
//! - **Domain validation and error targeting** ([`model`]): strict typed
//!   entities over the loosely-typed wire payloads, closed vocabularies
//!   that fail closed (with one documented provider fallback), and a
//!   deterministic classifier from structured error paths to semantic UI
//!   targets.
//!
//! [`client::CheckoutClient`] composes these with a pluggable
//! [`transport::Transport`] into the five protocol operations: create,
//! update, get, complete, and delegated payment.
//!
//! ```no_run
//! use checkout_conformance::{
//!     client::CheckoutClient, config::ClientConfig, fixtures, signer::SignOptions,
//! };
//!
//! # async fn run() -> checkout_conformance::Result<()> {
//! let config = ClientConfig::new(
//!     "https://merchant.example.com",
//!     "https://psp.example.com",
//!     "c2VjcmV0LWtleQ==",
//! );
//! let client = CheckoutClient::new(&config)?;
//!
//! let payload = fixtures::cart_initialize_payload(fixtures::ITEM_LISTING_ID, 1);
//! let session = client
//!     .create_session(&payload, &SignOptions::with_idempotency_key("idem-1"))
//!     .await?;
//! for error in session.errors()? {
//!     println!("{:?} at {:?}", error.code, error.target());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod protocol;
pub mod signer;
pub mod transport;

pub use client::{CheckoutClient, DelegatePaymentOutcome};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use signer::{RequestSigner, SignOptions};
pub use transport::{ApiResponse, HttpTransport, ResponseBody, Transport};
