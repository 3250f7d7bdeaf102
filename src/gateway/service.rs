//! Router assembly and route handlers
//!
//! The two proxied endpoints share one handler; each route carries its
//! own upstream client, upstream path and 502 label. Registering a
//! third upstream is one more `proxy_route` call.

use crate::config::Settings;
use crate::error::Error;
use crate::gateway::client::UpstreamClient;
use crate::gateway::headers::{error_labels, paths, upstream_paths};
use crate::gateway::middleware::{logging_middleware, request_id_middleware};
use crate::gateway::types::{
    GatewayError, GatewayResult, Symbol, UpstreamBaseUrl, UpstreamResponse,
};
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::middleware::from_fn;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// The gateway's client-facing HTTP service
pub struct GatewayService {
    pricing: UpstreamClient,
    ml: UpstreamClient,
}

impl GatewayService {
    /// Build the service from validated settings.
    ///
    /// Base URLs are checked here so a misconfigured upstream is fatal
    /// at startup rather than at first request.
    pub fn from_settings(settings: &Settings) -> Result<Self, Error> {
        let timeout = settings.request_timeout();

        let pricing_url = UpstreamBaseUrl::try_new(settings.upstreams.pricing_base_url.clone())
            .map_err(|e| Error::InvalidUpstreamUrl(e.to_string()))?;
        let ml_url = UpstreamBaseUrl::try_new(settings.upstreams.ml_base_url.clone())
            .map_err(|e| Error::InvalidUpstreamUrl(e.to_string()))?;

        Ok(Self::new(
            UpstreamClient::new(pricing_url, timeout),
            UpstreamClient::new(ml_url, timeout),
        ))
    }

    pub fn new(pricing: UpstreamClient, ml: UpstreamClient) -> Self {
        Self { pricing, ml }
    }

    /// Create the Axum router: liveness probe, the two proxied routes
    /// and the cross-cutting layers (CORS, request id, logging).
    ///
    /// The CORS policy is permissive: the chart client is served from a
    /// different origin/port than the gateway.
    pub fn into_router(self) -> Router {
        Router::new()
            .route(paths::HEALTH, get(health_handler))
            .merge(proxy_route(
                paths::SERIES,
                self.pricing,
                upstream_paths::SERIES,
                error_labels::PRICING_UNAVAILABLE,
            ))
            .merge(proxy_route(
                paths::SIGNALS,
                self.ml,
                upstream_paths::SIGNALS,
                error_labels::ML_UNAVAILABLE,
            ))
            .layer(from_fn(logging_middleware))
            .layer(from_fn(request_id_middleware))
            .layer(CorsLayer::permissive())
    }
}

/// Per-route state for the shared proxy handler
struct RouteContext {
    client: UpstreamClient,
    upstream_path: &'static str,
    error_label: &'static str,
}

/// Register one proxied route.
///
/// The series and signals endpoints are identical apart from which
/// upstream they address and the label used when it is unreachable.
fn proxy_route(
    path: &'static str,
    client: UpstreamClient,
    upstream_path: &'static str,
    error_label: &'static str,
) -> Router {
    Router::new()
        .route(path, get(proxy_handler))
        .with_state(Arc::new(RouteContext {
            client,
            upstream_path,
            error_label,
        }))
}

#[derive(Debug, Deserialize)]
struct ProxyParams {
    symbol: Option<String>,
}

/// Shared handler for the proxied endpoints
async fn proxy_handler(
    State(ctx): State<Arc<RouteContext>>,
    Query(params): Query<ProxyParams>,
) -> GatewayResult<Response> {
    // Reject before any upstream call; the empty string counts as missing
    let symbol = params
        .symbol
        .and_then(|s| Symbol::try_new(s).ok())
        .ok_or(GatewayError::MissingSymbol)?;

    match ctx.client.fetch(ctx.upstream_path, &symbol).await {
        Ok(upstream) => Ok(passthrough_response(upstream)),
        Err(e) => Err(GatewayError::UpstreamUnavailable {
            label: ctx.error_label,
            detail: e.to_string(),
        }),
    }
}

/// Forward the upstream's status, content type and body byte-for-byte
fn passthrough_response(upstream: UpstreamResponse) -> Response {
    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = upstream.status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, upstream.content_type);
    response
}

/// Liveness probe: 204 regardless of upstream health
async fn health_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}
