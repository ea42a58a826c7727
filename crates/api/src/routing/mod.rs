//! Host-based routing for the admin application
//!
//! Every API request is classified by its Host before it reaches a handler:
//! - Tenant subdomains: acme.app.com -> tenant context for `acme`
//! - Product subdomains: admin.app.com -> the `admin` product surface
//! - Apex and anything unrecognised -> the default surface

mod extract;
mod middleware;

pub use extract::{ProductSurface, TenantContext, TenantSource};
pub use middleware::{resolve_host_middleware, X_FORWARDED_HOST};
