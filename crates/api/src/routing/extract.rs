//! Request extractors for routed surfaces

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use serde::Serialize;
use tenantry_shared::{HostKind, HostResolution};

use crate::error::ApiError;

/// How the tenant for a request was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantSource {
    /// Tenant subdomain, e.g. acme.app.com
    Subdomain,
    /// Apex request with a configured default tenant
    DefaultTenant,
}

/// Tenant the current request belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantContext {
    pub slug: String,
    pub source: TenantSource,
}

impl TenantContext {
    /// Derive the tenant context for a resolution, if it has one
    ///
    /// Only the bare apex (a default with no reason) picks up the default
    /// tenant; hosts that fell through for a diagnostic reason never do.
    pub fn from_resolution(
        resolution: &HostResolution,
        default_tenant_slug: Option<&str>,
    ) -> Option<Self> {
        match &resolution.kind {
            HostKind::Tenant { tenant_slug } => Some(Self {
                slug: tenant_slug.clone(),
                source: TenantSource::Subdomain,
            }),
            HostKind::Default { reason: None } if resolution.base_domain.is_some() => {
                default_tenant_slug.map(|slug| Self {
                    slug: slug.to_string(),
                    source: TenantSource::DefaultTenant,
                })
            }
            _ => None,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .cloned()
            .ok_or(ApiError::TenantNotFound)
    }
}

/// Platform product addressed by a reserved subdomain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSurface {
    pub key: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for ProductSurface
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ProductSurface>()
            .cloned()
            .ok_or(ApiError::ProductNotFound)
    }
}
