//! Client IP extraction
//!
//! Prefers the first hop of `x-forwarded-for`, falling back to the transport
//! peer address. Forwarded headers are spoofable, so the extracted IP feeds a
//! best-effort rate limiter, never a security decision.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;

/// Extractor yielding the best-guess client IP. Infallible: with neither a
/// forwarded header nor connect info (e.g. in tests), it yields `unknown`.
#[derive(Debug, Clone)]
pub struct ClientIp(pub String);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(forwarded) = parts.headers.get("x-forwarded-for") {
            if let Ok(value) = forwarded.to_str() {
                if let Some(first) = value.split(',').next() {
                    let first = first.trim();
                    if !first.is_empty() {
                        return Ok(ClientIp(first.to_string()));
                    }
                }
            }
        }

        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        Ok(ClientIp(peer))
    }
}
