//! Application configuration

use std::env;

use tenantry_shared::{normalize_slug, validate_slug, ResolveHostOptions, TrustedProxyOptions};

/// Reserved product subdomains used when `RESERVED_SUBDOMAINS` is unset
pub const DEFAULT_RESERVED_SUBDOMAINS: &[&str] = &["admin", "api", "billing"];

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_address: String,

    // Host routing
    pub base_domains: Vec<String>, // e.g. ["app.com", "localtest.me"] for *.app.com routing
    pub reserved_subdomains: Vec<String>,
    pub product_subdomains: Vec<(String, String)>,
    pub default_tenant_slug: Option<String>,

    // Proxy
    pub trust_proxy: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_domains = parse_list(
            &env::var("BASE_DOMAINS").unwrap_or_else(|_| "localhost".to_string()),
        );
        if base_domains.is_empty() {
            return Err(ConfigError::Missing("BASE_DOMAINS"));
        }
        if let Some(bad) = base_domains.iter().find(|d| !is_plausible_domain(d)) {
            return Err(ConfigError::InvalidBaseDomain(bad.clone()));
        }

        let reserved_subdomains = match env::var("RESERVED_SUBDOMAINS") {
            Ok(value) => parse_list(&value),
            Err(_) => DEFAULT_RESERVED_SUBDOMAINS
                .iter()
                .map(|label| label.to_string())
                .collect(),
        };

        let product_subdomains = match env::var("PRODUCT_SUBDOMAINS") {
            Ok(value) => parse_product_mapping(&value)?,
            Err(_) => reserved_subdomains
                .iter()
                .map(|label| (label.clone(), label.clone()))
                .collect(),
        };
        let reserved = ResolveHostOptions::default().with_reserved_subdomains(&reserved_subdomains);

        if let Some((label, _)) = product_subdomains
            .iter()
            .find(|(label, _)| !reserved.is_reserved(label))
        {
            return Err(ConfigError::UnreservedProduct(label.clone()));
        }

        let default_tenant_slug = match env::var("DEFAULT_TENANT_SLUG") {
            Ok(value) if !value.trim().is_empty() => {
                let slug = normalize_slug(&value);
                if !validate_slug(&slug) || reserved.is_reserved(&slug) {
                    return Err(ConfigError::InvalidDefaultTenant(value));
                }
                Some(slug)
            }
            _ => None,
        };

        let trust_proxy = match env::var("TRUST_PROXY") {
            Ok(value) => parse_flag(&value).ok_or(ConfigError::InvalidFlag("TRUST_PROXY"))?,
            Err(_) => false,
        };

        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            base_domains,
            reserved_subdomains,
            product_subdomains,
            default_tenant_slug,
            trust_proxy,
        })
    }

    /// Build the classifier options for this configuration
    pub fn routing_options(&self) -> ResolveHostOptions {
        let options = ResolveHostOptions::new(&self.base_domains)
            .with_reserved_subdomains(&self.reserved_subdomains)
            .with_product_subdomains(
                self.product_subdomains
                    .iter()
                    .map(|(label, key)| (label, key)),
            );

        match &self.default_tenant_slug {
            Some(slug) => options.with_default_tenant_slug(slug),
            None => options,
        }
    }

    pub fn proxy_options(&self) -> TrustedProxyOptions {
        TrustedProxyOptions::new(self.trust_proxy)
    }
}

/// Split a comma-separated list, dropping blanks and lower-casing entries
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Parse `label=key` pairs, e.g. `admin=console,api=api`
fn parse_product_mapping(value: &str) -> Result<Vec<(String, String)>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((label, key)) if !label.trim().is_empty() && !key.trim().is_empty() => {
                Ok((normalize_slug(label), key.trim().to_string()))
            }
            _ => Err(ConfigError::InvalidProductMapping(pair.to_string())),
        })
        .collect()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Reject entries that are clearly not a bare domain (ports, paths, empty labels)
fn is_plausible_domain(domain: &str) -> bool {
    domain.split('.').all(|label| {
        !label.is_empty()
            && label
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid base domain: {0}")]
    InvalidBaseDomain(String),
    #[error("Invalid product subdomain mapping (expected label=key): {0}")]
    InvalidProductMapping(String),
    #[error("Product subdomain is not reserved: {0}")]
    UnreservedProduct(String),
    #[error("Invalid default tenant slug: {0}")]
    InvalidDefaultTenant(String),
    #[error("Invalid boolean value for {0}")]
    InvalidFlag(&'static str),
}
