//! Shared application state

use std::sync::Arc;

use tenantry_shared::{ResolveHostOptions, TrustedProxyOptions};

use crate::config::Config;

/// State handed to every handler and middleware
///
/// Routing options are built once here and only ever read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub routing: Arc<ResolveHostOptions>,
    pub proxy: TrustedProxyOptions,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            routing: Arc::new(config.routing_options()),
            proxy: config.proxy_options(),
        }
    }
}
