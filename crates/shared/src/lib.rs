//! Tenantry shared routing core
//!
//! Pure host-resolution rules shared by every Tenantry service: slug
//! validation, trusted-host selection and host classification. Nothing here
//! performs I/O or reads the environment.

pub mod host;
pub mod proxy;
pub mod slug;

pub use host::{
    classify_request, resolve_host, DefaultReason, HostKind, HostResolution, ResolveHostOptions,
};
pub use proxy::{resolve_trusted_host, strip_port, TrustedProxyOptions};
pub use slug::{normalize_slug, validate_slug, MAX_SLUG_LEN};
