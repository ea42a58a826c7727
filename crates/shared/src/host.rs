//! Host classification
//!
//! Maps an authoritative host string onto one of three surfaces:
//! - Tenant subdomains: acme.app.com -> tenant `acme`
//! - Reserved product subdomains: admin.app.com -> product `admin`
//! - Everything else (apex, unknown domains, malformed hosts) -> default
//!
//! Classification is purely syntactic. Whether a tenant slug names a real,
//! active tenant is for the backend to decide.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::proxy::{resolve_trusted_host, strip_port, TrustedProxyOptions};
use crate::slug::{is_canonical_slug, normalize_slug};

/// Static routing settings, built once at startup and shared read-only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveHostOptions {
    base_domains: Vec<String>,
    reserved_subdomains: HashSet<String>,
    product_subdomains: HashMap<String, String>,
    default_tenant_slug: Option<String>,
}

impl ResolveHostOptions {
    /// Create options serving the given base domains
    ///
    /// Domains are lower-cased; blank entries and duplicates are dropped while
    /// keeping the first-seen order.
    pub fn new<I, S>(base_domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut domains: Vec<String> = Vec::new();
        for domain in base_domains {
            let domain = domain.as_ref().trim().to_lowercase();
            if !domain.is_empty() && !domains.contains(&domain) {
                domains.push(domain);
            }
        }

        Self {
            base_domains: domains,
            ..Self::default()
        }
    }

    /// Set the first-label names that are never tenant slugs
    pub fn with_reserved_subdomains<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.reserved_subdomains = labels
            .into_iter()
            .map(|label| normalize_slug(label.as_ref()))
            .filter(|label| !label.is_empty())
            .collect();
        self
    }

    /// Set the reserved-label to product-key mapping
    pub fn with_product_subdomains<I, K, V>(mut self, mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.product_subdomains = mapping
            .into_iter()
            .map(|(label, key)| (normalize_slug(label.as_ref()), key.as_ref().trim().to_string()))
            .collect();
        self
    }

    /// Set the tenant used for apex requests that still want a tenant context
    pub fn with_default_tenant_slug(mut self, slug: impl AsRef<str>) -> Self {
        self.default_tenant_slug = Some(normalize_slug(slug.as_ref()));
        self
    }

    pub fn base_domains(&self) -> &[String] {
        &self.base_domains
    }

    /// Consumed by the request adapter, never by [`resolve_host`]
    pub fn default_tenant_slug(&self) -> Option<&str> {
        self.default_tenant_slug.as_deref()
    }

    /// Check whether a label is reserved for a platform product
    pub fn is_reserved(&self, label: &str) -> bool {
        self.reserved_subdomains.contains(&normalize_slug(label))
    }

    /// Product key for a reserved label; unmapped labels map to themselves
    fn product_key(&self, label: &str) -> String {
        self.product_subdomains
            .get(label)
            .cloned()
            .unwrap_or_else(|| label.to_string())
    }

    /// Most specific base domain that `host` equals or is a subdomain of
    fn match_base_domain(&self, host: &str) -> Option<&str> {
        self.base_domains
            .iter()
            .map(String::as_str)
            .filter(|base| is_same_or_subdomain(host, base))
            .max_by_key(|base| base.len())
    }
}

fn is_same_or_subdomain(host: &str, base: &str) -> bool {
    match host.strip_suffix(base) {
        Some("") => true,
        Some(prefix) => prefix.ends_with('.'),
        None => false,
    }
}

/// Why a host fell through to the default surface
///
/// Diagnostic only: callers log it, they never branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultReason {
    /// No usable host header reached the classifier
    MissingHost,
    /// Host is outside every configured base domain
    BaseDomainNotAllowed,
    /// Nested subdomain such as a.b.app.com
    MultiLabelSubdomain,
    /// Subdomain label is not a valid slug
    InvalidSlug,
}

impl DefaultReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefaultReason::MissingHost => "missing_host",
            DefaultReason::BaseDomainNotAllowed => "base_domain_not_allowed",
            DefaultReason::MultiLabelSubdomain => "multi_label_subdomain",
            DefaultReason::InvalidSlug => "invalid_slug",
        }
    }
}

impl fmt::Display for DefaultReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which surface a host routes to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostKind {
    /// Tenant subdomain; the slug always passed validation
    Tenant { tenant_slug: String },
    /// Reserved product subdomain
    Product { product_key: String },
    /// Marketing/default surface
    Default {
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<DefaultReason>,
    },
}

impl HostKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostKind::Tenant { .. } => "tenant",
            HostKind::Product { .. } => "product",
            HostKind::Default { .. } => "default",
        }
    }
}

/// Result of classifying one request's host
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct HostResolution {
    /// Port-stripped, lower-cased host that was evaluated
    pub host: String,
    /// Matched base domain, absent when no configured domain matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_domain: Option<String>,
    #[serde(flatten)]
    pub kind: HostKind,
}

impl HostResolution {
    /// Resolution for a request that carried no usable host at all
    pub fn missing_host() -> Self {
        Self {
            host: String::new(),
            base_domain: None,
            kind: HostKind::Default {
                reason: Some(DefaultReason::MissingHost),
            },
        }
    }

    fn fallback(host: String, base_domain: Option<&str>, reason: Option<DefaultReason>) -> Self {
        Self {
            host,
            base_domain: base_domain.map(str::to_string),
            kind: HostKind::Default { reason },
        }
    }

    pub fn is_tenant(&self) -> bool {
        matches!(self.kind, HostKind::Tenant { .. })
    }

    pub fn is_product(&self) -> bool {
        matches!(self.kind, HostKind::Product { .. })
    }

    pub fn is_default(&self) -> bool {
        matches!(self.kind, HostKind::Default { .. })
    }

    pub fn tenant_slug(&self) -> Option<&str> {
        match &self.kind {
            HostKind::Tenant { tenant_slug } => Some(tenant_slug),
            _ => None,
        }
    }

    pub fn product_key(&self) -> Option<&str> {
        match &self.kind {
            HostKind::Product { product_key } => Some(product_key),
            _ => None,
        }
    }

    pub fn reason(&self) -> Option<DefaultReason> {
        match self.kind {
            HostKind::Default { reason } => reason,
            _ => None,
        }
    }
}

/// Classify an authoritative host against the routing options
///
/// Total over all inputs: anything that is not a recognised tenant or product
/// host comes back as [`HostKind::Default`].
pub fn resolve_host(raw_host: &str, options: &ResolveHostOptions) -> HostResolution {
    let host = strip_port(&raw_host.to_lowercase());

    let Some(base_domain) = options.match_base_domain(&host) else {
        return HostResolution::fallback(host, None, Some(DefaultReason::BaseDomainNotAllowed));
    };

    // Apex
    if host == base_domain {
        return HostResolution::fallback(host, Some(base_domain), None);
    }

    let subdomain = host
        .strip_suffix(base_domain)
        .and_then(|prefix| prefix.strip_suffix('.'))
        .unwrap_or_default();
    if subdomain.is_empty() {
        return HostResolution::fallback(host, Some(base_domain), None);
    }

    if subdomain.contains('.') {
        return HostResolution::fallback(
            host,
            Some(base_domain),
            Some(DefaultReason::MultiLabelSubdomain),
        );
    }

    let label = normalize_slug(subdomain);

    // Reserved names win over tenant slugs
    if options.reserved_subdomains.contains(&label) {
        let product_key = options.product_key(&label);
        return HostResolution {
            base_domain: Some(base_domain.to_string()),
            host,
            kind: HostKind::Product { product_key },
        };
    }

    if !is_canonical_slug(&label) {
        return HostResolution::fallback(host, Some(base_domain), Some(DefaultReason::InvalidSlug));
    }

    HostResolution {
        base_domain: Some(base_domain.to_string()),
        host,
        kind: HostKind::Tenant { tenant_slug: label },
    }
}

/// Classify a request from its raw `Host` and `X-Forwarded-Host` values
pub fn classify_request(
    host_header: Option<&str>,
    forwarded_host_header: Option<&str>,
    options: &ResolveHostOptions,
    proxy: &TrustedProxyOptions,
) -> HostResolution {
    match resolve_trusted_host(host_header, forwarded_host_header, proxy) {
        Some(host) => resolve_host(&host, options),
        None => HostResolution::missing_host(),
    }
}
