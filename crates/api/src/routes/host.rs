//! Host introspection endpoints
//!
//! Lets the frontend and operators see how the current host was routed.

use axum::{Extension, Json};
use tenantry_shared::HostResolution;

use crate::routing::{ProductSurface, TenantContext};

/// Full host resolution for the current request
pub async fn current_host(Extension(resolution): Extension<HostResolution>) -> Json<HostResolution> {
    Json(resolution)
}

/// Tenant for the current request, 404 when the host has none
pub async fn current_tenant(tenant: TenantContext) -> Json<TenantContext> {
    Json(tenant)
}

/// Product for the current request, 404 outside reserved subdomains
pub async fn current_product(product: ProductSurface) -> Json<ProductSurface> {
    Json(product)
}
