//! Opaque proxy tokens
//!
//! A token is the upstream URL itself, URL-safe base64 encoded - reversible,
//! self-describing, no registry and no expiry of its own. The unpadded
//! alphabet keeps tokens safe to embed as query-string values without further
//! escaping.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::domain::DomainError;

/// Encode an upstream URL into an opaque token.
pub fn encode(url: &str) -> String {
    URL_SAFE_NO_PAD.encode(url.as_bytes())
}

/// Decode a token back into the exact original URL.
///
/// Fails with `MalformedToken` on invalid base64, non-UTF-8 payloads, or
/// payloads that are not absolute http(s) URLs - a corrupted token never
/// yields a partially-valid URL.
pub fn decode(token: &str) -> Result<String, DomainError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token.trim().as_bytes())
        .map_err(|_| DomainError::MalformedToken)?;

    let decoded = String::from_utf8(bytes).map_err(|_| DomainError::MalformedToken)?;

    let parsed = url::Url::parse(&decoded).map_err(|_| DomainError::MalformedToken)?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(DomainError::MalformedToken);
    }

    Ok(decoded)
}
