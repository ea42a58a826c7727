//! Trusted-host resolution
//!
//! Decides which of the direct `Host` header and the proxy-supplied
//! `X-Forwarded-Host` header names the host a client asked for. The forwarded
//! header is only honoured when the deployment says a proxy sits in front of
//! the app and overwrites it; otherwise any client could forge it and land in
//! another tenant's context.

use serde::{Deserialize, Serialize};

/// Static proxy trust settings, loaded once at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustedProxyOptions {
    /// Whether `X-Forwarded-Host` may override `Host`
    pub trust_proxy: bool,
}

impl TrustedProxyOptions {
    pub fn new(trust_proxy: bool) -> Self {
        Self { trust_proxy }
    }
}

/// Pick the authoritative host for a request
///
/// With `trust_proxy` set, the first comma-separated `X-Forwarded-Host` entry
/// wins when it is non-empty. Proxies append to this list, so the first entry
/// is the one furthest from us; callers behind a multi-hop chain must make
/// sure their edge proxy overwrites the header rather than appending to it.
///
/// Returns `None` when neither header carries a usable host.
pub fn resolve_trusted_host(
    host_header: Option<&str>,
    forwarded_host_header: Option<&str>,
    options: &TrustedProxyOptions,
) -> Option<String> {
    if options.trust_proxy {
        let forwarded = forwarded_host_header
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        if let Some(forwarded) = forwarded {
            return Some(forwarded.to_string());
        }
    }

    host_header
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

/// Remove a trailing `:<digits>` port suffix and lower-case the host
pub fn strip_port(host: &str) -> String {
    let host = match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
            name
        }
        _ => host,
    };
    host.to_lowercase()
}
