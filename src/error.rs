//! Error types for the checkout conformance client.
//!
//! All errors implement the standard [`std::error::Error`] trait via
//! [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Validation** ([`ClientError::Validation`]): a wire payload failed to
//!   parse into the domain model (bad enum, bad decimal, missing field).
//!   Always fails closed; never retried.
//! - **Configuration** ([`ClientError::Configuration`]): missing or invalid
//!   client configuration, raised before any network attempt.
//! - **Network** ([`ClientError::Http`]): HTTP communication failures owned
//!   by the transport and propagated opaquely.
//! - **Transport contract** ([`ClientError::Transport`]): the transport was
//!   handed something it cannot send (bad URL, injected header).
//!
//! Business-level checkout problems (`out_of_stock`, `requires_3ds`, …) are
//! deliberately *not* part of this enum: the server reports them as
//! error-typed messages on an otherwise successful response, and they are
//! surfaced as [`CartError`](crate::model::CartError) values.

use thiserror::Error;

/// Result type alias for client operations.
///
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur in the checkout conformance client.
///
/// Variants carry contextual information about what went wrong. None of them
/// trigger automatic retries; retry policy, if any, belongs to the caller.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum ClientError {
    /// A wire payload failed strict domain validation.
    ///
    /// Common causes:
    /// - an enum value outside its closed vocabulary (e.g. currency `"XXX"`)
    /// - a monetary amount that is not a valid decimal literal
    /// - a contract violation such as building a `CartError` from a message
    ///   without an error code
    #[error("validation failed: {0}")]
    Validation(String),

    /// The client configuration is missing or invalid.
    ///
    /// Raised when the base64 signing key does not decode or base URLs do
    /// not parse. Fatal: detected before any network attempt.
    #[error("invalid client configuration: {0}")]
    Configuration(String),

    /// HTTP request failed.
    ///
    /// Wraps [`reqwest::Error`]: timeouts, connection refusals, DNS and TLS
    /// failures. Owned entirely by the transport.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The transport was handed a request it refuses to send.
    ///
    /// Covers unparseable URLs, unsupported methods, and header values that
    /// would allow CRLF injection.
    #[error("transport error: {0}")]
    Transport(String),
}
