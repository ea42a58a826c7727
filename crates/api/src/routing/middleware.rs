//! Host resolution middleware
//!
//! Classifies the request host once and stores the outcome in request
//! extensions, where handlers pick it up through extractors.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderName, Request},
    middleware::Next,
    response::Response,
};
use tenantry_shared::classify_request;

use super::{ProductSurface, TenantContext};
use crate::state::AppState;

/// Header set by reverse proxies with the host the client asked for
pub static X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");

/// Middleware that resolves the request host to a tenant, product or default surface
pub async fn resolve_host_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let resolution = {
        let headers = request.headers();

        // HTTP/2 requests carry the host in the :authority pseudo-header; a
        // blank Host header counts as absent
        let host = headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string)
            .or_else(|| request.uri().authority().map(|a| a.to_string()));
        let forwarded = headers.get(&X_FORWARDED_HOST).and_then(|v| v.to_str().ok());

        if forwarded.is_some() && !state.proxy.trust_proxy {
            // Client-controlled, so never above debug
            tracing::debug!(
                forwarded_host = forwarded.unwrap_or_default(),
                "Ignoring X-Forwarded-Host: proxy is not trusted"
            );
        }

        classify_request(host.as_deref(), forwarded, &state.routing, &state.proxy)
    };

    tracing::debug!(
        host = %resolution.host,
        kind = resolution.kind.as_str(),
        reason = resolution.reason().map(|r| r.as_str()),
        "Resolved request host"
    );

    let extensions = request.extensions_mut();
    if let Some(tenant) =
        TenantContext::from_resolution(&resolution, state.routing.default_tenant_slug())
    {
        extensions.insert(tenant);
    }
    if let Some(key) = resolution.product_key() {
        extensions.insert(ProductSurface {
            key: key.to_string(),
        });
    }
    extensions.insert(resolution);

    next.run(request).await
}
