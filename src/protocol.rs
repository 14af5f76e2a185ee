//! Wire-level protocol constants.
//!
//! Exact header names, endpoint path templates, and protocol defaults. The
//! header names are part of the signing contract and must not be renamed.

/// Protocol version sent in the `API-Version` header.
pub const API_VERSION: &str = "2025-09-29";

/// User agent identifying this harness.
pub const USER_AGENT: &str = "CheckoutSpecTest/1.0";

/// Default language tag for `Accept-Language`.
pub const DEFAULT_LANGUAGE: &str = "en-us";

/// Content type for all request bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Default total-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// `API-Version` header name.
pub const HEADER_API_VERSION: &str = "API-Version";
/// `Accept-Language` header name.
pub const HEADER_ACCEPT_LANGUAGE: &str = "Accept-Language";
/// `Timestamp` header name.
pub const HEADER_TIMESTAMP: &str = "Timestamp";
/// `Signature` header name.
pub const HEADER_SIGNATURE: &str = "Signature";
/// `Request-Id` header name.
pub const HEADER_REQUEST_ID: &str = "Request-Id";
/// `Idempotency-Key` header name.
pub const HEADER_IDEMPOTENCY_KEY: &str = "Idempotency-Key";
/// `User-Agent` header name.
pub const HEADER_USER_AGENT: &str = "User-Agent";
/// `Content-Type` header name.
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";

/// HTTP POST method name.
pub const REST_METHOD_POST: &str = "POST";
/// HTTP GET method name.
pub const REST_METHOD_GET: &str = "GET";

/// Session collection path (create).
pub const CHECKOUT_INITIALIZE_PATH: &str = "/checkout_sessions";

/// Delegated payment path, resolved against the payment base URL.
pub const DELEGATE_PAYMENT_PATH: &str = "/delegated_payments";

/// Session item path (update, get).
#[must_use]
pub fn checkout_session_path(session_id: &str) -> String {
    format!("/checkout_sessions/{session_id}")
}

/// Session completion path.
#[must_use]
pub fn checkout_complete_path(session_id: &str) -> String {
    format!("/checkout_sessions/{session_id}/complete")
}

/// Session cancellation path.
///
/// Defined by the protocol; the client currently exposes no cancel
/// operation.
#[must_use]
pub fn checkout_cancel_path(session_id: &str) -> String {
    format!("/checkout_sessions/{session_id}/cancel")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_path_templating() {
        assert_eq!(checkout_session_path("cs_123"), "/checkout_sessions/cs_123");
        assert_eq!(checkout_complete_path("cs_123"), "/checkout_sessions/cs_123/complete");
        assert_eq!(checkout_cancel_path("cs_123"), "/checkout_sessions/cs_123/cancel");
    }

    #[test]
    fn test_header_names_exact() {
        // The signing contract depends on these exact names.
        assert_eq!(HEADER_API_VERSION, "API-Version");
        assert_eq!(HEADER_IDEMPOTENCY_KEY, "Idempotency-Key");
        assert_eq!(HEADER_SIGNATURE, "Signature");
        assert_eq!(HEADER_REQUEST_ID, "Request-Id");
    }
}
