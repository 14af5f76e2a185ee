//! Request signing: canonical bytes, authentication tag, and header set.
//!
//! Every call is authorized by an HMAC-SHA256 tag over the canonical signing
//! input: the UTF-8 bytes of the request timestamp immediately followed by
//! the JSON serialization of the body (`{}` when the call has no body), with
//! no delimiter between the two segments. The segment order is fixed.
//!
//! The signer also assembles the full header set for a call, including the
//! deterministic omission and override hooks the conformance suite uses to
//! submit deliberately invalid signatures, stale timestamps, or missing
//! headers.

use std::collections::HashMap;

use base64::Engine;
use chrono::{Duration, SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::instrument;
use uuid::Uuid;

use crate::{config::ClientConfig, error::Result, protocol};

type HmacSha256 = Hmac<Sha256>;

/// Per-call signing options.
///
/// Defaults produce the normal protocol header set. The omission set and
/// override map exist for protocol edge-case testing: omissions strip named
/// headers, overrides are applied last and always win — they can corrupt a
/// computed header or reintroduce an omitted one.
#[derive(Debug, Clone, Default)]
pub struct SignOptions {
    /// Caller-supplied idempotency key. When `None`, the `Idempotency-Key`
    /// header is still sent with an empty value; empty-string and omission
    /// may mean different things server-side.
    pub idempotency_key: Option<String>,

    /// Caller custom headers, merged in before omission and override.
    pub custom_headers: Vec<(String, String)>,

    /// Header names to strip from the computed set.
    pub omit: Vec<String>,

    /// Header overrides, applied after omission. Always win.
    pub overrides: Vec<(String, String)>,

    /// Signed clock skew in seconds added to the request timestamp.
    /// Test hook for clock-skew scenarios.
    pub timestamp_skew_secs: i64,
}

impl SignOptions {
    /// Options carrying only an idempotency key.
    #[must_use]
    pub fn with_idempotency_key(key: &str) -> Self {
        Self { idempotency_key: Some(key.to_owned()), ..Self::default() }
    }
}

/// Produces the authentication tag and header set for one HTTP call.
///
/// The signer holds the decoded pre-shared key and the static header values
/// from the configuration. It retains no per-call state: request ids,
/// timestamps, and tags are freshly generated on every call and never
/// reused, so no two calls are header-identical even with equal bodies.
pub struct RequestSigner {
    key: Vec<u8>,
    api_version: String,
    language: String,
    user_agent: String,
}

// Manual impl: the key must not leak through Debug output.
impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("api_version", &self.api_version)
            .field("language", &self.language)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl RequestSigner {
    /// Builds a signer from the client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`](crate::ClientError::Configuration)
    /// if the base64 private key does not decode. This is fatal and happens
    /// before any network attempt.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            key: config.decoded_private_key()?,
            api_version: config.api_version.clone(),
            language: config.language.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    /// Computes the base64 authentication tag for one timestamp/body pair.
    ///
    /// Deterministic in (key, timestamp, body): recomputing with the same
    /// inputs yields the same tag.
    #[must_use]
    pub fn signature(&self, timestamp: &str, body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .expect("HMAC accepts keys of any length");
        mac.update(timestamp.as_bytes());
        mac.update(body);
        base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes())
    }

    /// Assembles the full header set for a request.
    ///
    /// `body` is the exact byte serialization the transport will send; pass
    /// `None` for body-less calls (the signature then covers `{}`).
    ///
    /// Headers are deterministic in shape but non-deterministic in value:
    /// each call gets a fresh UUIDv4 request id, a fresh timestamp, and
    /// therefore a fresh tag.
    #[instrument(skip(self, body, options), fields(body_len = body.map_or(0, <[u8]>::len)))]
    pub fn headers(&self, body: Option<&[u8]>, options: &SignOptions) -> HashMap<String, String> {
        let request_id = Uuid::new_v4().to_string();
        let timestamp = Self::timestamp(options.timestamp_skew_secs);

        let signed_body = body.unwrap_or(b"{}");
        let signature = self.signature(&timestamp, signed_body);

        let mut headers = HashMap::new();
        headers.insert(protocol::HEADER_API_VERSION.to_owned(), self.api_version.clone());
        headers.insert(protocol::HEADER_ACCEPT_LANGUAGE.to_owned(), self.language.clone());
        headers.insert(protocol::HEADER_TIMESTAMP.to_owned(), timestamp);
        headers.insert(protocol::HEADER_SIGNATURE.to_owned(), signature);
        headers.insert(protocol::HEADER_REQUEST_ID.to_owned(), request_id);
        headers.insert(
            protocol::HEADER_IDEMPOTENCY_KEY.to_owned(),
            options.idempotency_key.clone().unwrap_or_default(),
        );
        headers.insert(protocol::HEADER_USER_AGENT.to_owned(), self.user_agent.clone());
        headers.insert(
            protocol::HEADER_CONTENT_TYPE.to_owned(),
            protocol::CONTENT_TYPE_JSON.to_owned(),
        );

        for (name, value) in &options.custom_headers {
            headers.insert(name.clone(), value.clone());
        }

        for name in &options.omit {
            headers.remove(name);
        }
        for (name, value) in &options.overrides {
            headers.insert(name.clone(), value.clone());
        }

        headers
    }

    /// Current UTC timestamp as ISO-8601 with fractional seconds and a
    /// literal `Z` suffix (never `+00:00`).
    fn timestamp(skew_secs: i64) -> String {
        let now = Utc::now() + Duration::seconds(skew_secs);
        now.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}
