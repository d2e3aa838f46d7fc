//! Media fetch and proxy-fetch handler
//!
//! One endpoint per provider, two modes: with `link` the request is a
//! proxy-fetch (token decode + byte relay, no key check); otherwise the key
//! is validated, the provider resolver runs, and every discovered media URL
//! is wrapped into a same-origin download link.

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::api::middleware::ClientIp;
use crate::api::state::AppState;
use crate::api::types::{ApiError, MediaResponse};
use crate::domain::proxy::token;
use crate::domain::DomainError;

#[derive(Debug, Deserialize)]
pub struct MediaQuery {
    pub key: Option<String>,
    pub url: Option<String>,
    /// Opaque proxy token; its presence switches the request to a
    /// proxy-fetch and all other parameters are ignored.
    pub link: Option<String>,
}

pub async fn handle(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(params): Query<MediaQuery>,
    ClientIp(client_ip): ClientIp,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    if let Some(token_value) = params.link.as_deref() {
        return proxy_fetch(&state, token_value).await;
    }

    fetch_media(&state, &provider, params, &client_ip, &headers).await
}

/// Decode the token and relay the upstream bytes inline.
///
/// Failures answer with a bare status code and empty body - this branch is
/// loaded by media players, and a malformed token must not be echoed back.
async fn proxy_fetch(state: &AppState, token_value: &str) -> Result<Response, ApiError> {
    let target = token::decode(token_value).map_err(|e| {
        warn!(error = %e, "Rejecting proxy-fetch with undecodable token");
        ApiError::bare(StatusCode::INTERNAL_SERVER_ERROR)
    })?;

    let relayed = state.relay.stream(&target).await.map_err(|e| {
        warn!(error = %e, "Relay fetch failed");
        ApiError::bare(StatusCode::INTERNAL_SERVER_ERROR)
    })?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, relayed.content_type)
        .header(header::CONTENT_DISPOSITION, "inline")
        .body(Body::from_stream(relayed.stream))
        .map_err(|_| ApiError::bare(StatusCode::INTERNAL_SERVER_ERROR))
}

async fn fetch_media(
    state: &AppState,
    provider: &str,
    params: MediaQuery,
    client_ip: &str,
    headers: &HeaderMap,
) -> Result<Response, ApiError> {
    let resolver = state
        .resolvers
        .get(provider)
        .ok_or_else(|| ApiError::not_found(format!("Unknown provider '{provider}'")))?;

    let key = params
        .key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| DomainError::missing_parameter("key"))?;

    state.key_store.validate(key, client_ip).await?;

    let target = params
        .url
        .as_deref()
        .filter(|u| !u.is_empty())
        .ok_or_else(|| DomainError::missing_parameter("url"))?;

    let items = resolver.resolve(target).await.map_err(|e| {
        debug!(provider, error = %e, "Provider resolve failed");
        e
    })?;

    if items.is_empty() {
        return Err(DomainError::NoMediaFound.into());
    }

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::internal("Missing Host header"))?;

    let response = MediaResponse::build(&items, host, provider, &state.owner);
    Ok(Json(response).into_response())
}
