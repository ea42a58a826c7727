//! Tenantry API Library
//!
//! This crate contains the HTTP adapter that routes admin-app requests to a
//! tenant, a product surface or the default surface by Host.

pub mod config;
pub mod error;
pub mod routes;
pub mod routing;
pub mod state;

pub use config::Config;
pub use error::ApiError;
pub use routing::{ProductSurface, TenantContext, TenantSource};
pub use state::AppState;
