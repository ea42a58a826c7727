//! Host classification scenarios
//!
//! Golden cases for the routing core plus property-style sweeps over the
//! configured base domains and reserved labels.

#![allow(clippy::unwrap_used)]

use tenantry_shared::{
    classify_request, normalize_slug, resolve_host, DefaultReason, HostKind, ResolveHostOptions,
    TrustedProxyOptions,
};

// ============================================================================
// Test Utilities
// ============================================================================

const BASE_DOMAINS: &[&str] = &["app.com", "localtest.me"];
const RESERVED: &[&str] = &["admin", "api", "billing"];

fn options() -> ResolveHostOptions {
    ResolveHostOptions::new(BASE_DOMAINS)
        .with_reserved_subdomains(RESERVED)
        .with_product_subdomains(RESERVED.iter().map(|label| (*label, *label)))
}

fn tenant(slug: &str) -> HostKind {
    HostKind::Tenant {
        tenant_slug: slug.to_string(),
    }
}

fn fallback(reason: Option<DefaultReason>) -> HostKind {
    HostKind::Default { reason }
}

// ============================================================================
// Golden Cases
// ============================================================================

#[test]
fn test_golden_apex_is_default() {
    assert_eq!(resolve_host("app.com", &options()).kind, fallback(None));
}

#[test]
fn test_golden_tenant_subdomain() {
    let res = resolve_host("acme.app.com", &options());
    assert_eq!(res.kind, tenant("acme"));
    assert_eq!(res.base_domain.as_deref(), Some("app.com"));
}

#[test]
fn test_golden_product_subdomain() {
    let res = resolve_host("admin.app.com", &options());
    assert_eq!(
        res.kind,
        HostKind::Product {
            product_key: "admin".to_string()
        }
    );
}

#[test]
fn test_golden_underscore_is_invalid() {
    let res = resolve_host("bad_slug.app.com", &options());
    assert_eq!(res.kind, fallback(Some(DefaultReason::InvalidSlug)));
}

#[test]
fn test_golden_second_base_domain() {
    let res = resolve_host("tenant1.localtest.me", &options());
    assert_eq!(res.kind, tenant("tenant1"));
    assert_eq!(res.base_domain.as_deref(), Some("localtest.me"));
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_foreign_hosts_are_not_allowed() {
    let hosts = [
        "example.org",
        "APP.COM.evil.io",
        "evilapp.com",
        "acme.evilapp.com:443",
        "localtest.me.attacker.net",
        "",
        "localhost",
        "127.0.0.1:3000",
    ];
    for host in hosts {
        let res = resolve_host(host, &options());
        assert_eq!(
            res.kind,
            fallback(Some(DefaultReason::BaseDomainNotAllowed)),
            "host {:?}",
            host
        );
        assert!(res.base_domain.is_none());
    }
}

#[test]
fn test_every_base_domain_apex_is_default() {
    for base in BASE_DOMAINS {
        for host in [base.to_string(), base.to_uppercase(), format!("{}:8443", base)] {
            let res = resolve_host(&host, &options());
            assert_eq!(res.kind, fallback(None), "host {:?}", host);
            assert_eq!(res.base_domain.as_deref(), Some(*base));
        }
    }
}

#[test]
fn test_reserved_labels_are_products_on_every_base_domain() {
    for base in BASE_DOMAINS {
        for label in RESERVED {
            let res = resolve_host(&format!("{}.{}", label, base), &options());
            assert_eq!(res.product_key(), Some(*label), "label {} on {}", label, base);

            let shouting = resolve_host(&format!("{}.{}", label.to_uppercase(), base), &options());
            assert_eq!(shouting.product_key(), Some(*label));
        }
    }
}

#[test]
fn test_reserved_label_shadows_valid_slug() {
    // `billing` is a perfectly good slug, but reservation runs first
    assert!(tenantry_shared::validate_slug("billing"));
    let res = resolve_host("billing.localtest.me", &options());
    assert!(res.is_product());
    assert_eq!(res.tenant_slug(), None);
}

#[test]
fn test_valid_slugs_are_tenants() {
    let long = "a".repeat(63);
    let slugs = ["a", "9", "acme", "Acme", "tenant-1", "x1-y2-z3", long.as_str()];
    for base in BASE_DOMAINS {
        for slug in slugs {
            let res = resolve_host(&format!("{}.{}", slug, base), &options());
            assert_eq!(res.kind, tenant(&normalize_slug(slug)), "slug {:?}", slug);
        }
    }
}

#[test]
fn test_invalid_slugs_fall_back() {
    let long = "a".repeat(64);
    let slugs = ["-acme", "acme-", "-", "bad_slug", "acme!", "caf\u{e9}", long.as_str()];
    for base in BASE_DOMAINS {
        for slug in slugs {
            let res = resolve_host(&format!("{}.{}", slug, base), &options());
            assert_eq!(
                res.kind,
                fallback(Some(DefaultReason::InvalidSlug)),
                "slug {:?}",
                slug
            );
            assert_eq!(res.base_domain.as_deref(), Some(*base));
        }
    }
}

#[test]
fn test_multi_label_subdomains_fall_back() {
    for host in [
        "a.b.app.com",
        "acme.admin.app.com",
        "admin.acme.app.com",
        "bad_slug.acme.localtest.me",
        "x.y.z.localtest.me:3000",
    ] {
        let res = resolve_host(host, &options());
        assert_eq!(
            res.kind,
            fallback(Some(DefaultReason::MultiLabelSubdomain)),
            "host {:?}",
            host
        );
    }
}

#[test]
fn test_port_is_ignored() {
    for host in ["acme.app.com", "admin.app.com", "app.com", "a.b.app.com", "nope.io"] {
        assert_eq!(
            resolve_host(&format!("{}:3000", host), &options()),
            resolve_host(host, &options()),
            "host {:?}",
            host
        );
    }
}

#[test]
fn test_resolution_is_deterministic() {
    let opts = options();
    for host in ["acme.app.com", "admin.localtest.me", "x.y.app.com", "bad_slug.app.com"] {
        assert_eq!(resolve_host(host, &opts), resolve_host(host, &opts));
    }
}

// ============================================================================
// Request Classification
// ============================================================================

#[test]
fn test_untrusted_proxy_cannot_spoof_tenant() {
    let proxy = TrustedProxyOptions::new(false);
    let res = classify_request(
        Some("app.com"),
        Some("victim.app.com"),
        &options(),
        &proxy,
    );
    assert_eq!(res.kind, fallback(None));
    assert_eq!(res.host, "app.com");
}

#[test]
fn test_trusted_proxy_uses_first_forwarded_entry() {
    let proxy = TrustedProxyOptions::new(true);
    let res = classify_request(
        Some("10.0.0.4:8080"),
        Some("Acme.App.com:443, edge.internal"),
        &options(),
        &proxy,
    );
    assert_eq!(res.kind, tenant("acme"));
    assert_eq!(res.host, "acme.app.com");
}

#[test]
fn test_resolution_serializes_flat() {
    let res = resolve_host("acme.app.com", &options());
    let json = serde_json::to_value(&res).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "host": "acme.app.com",
            "base_domain": "app.com",
            "kind": "tenant",
            "tenant_slug": "acme",
        })
    );

    let res = resolve_host("nope.io", &options());
    let json = serde_json::to_value(&res).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "host": "nope.io",
            "kind": "default",
            "reason": "base_domain_not_allowed",
        })
    );
}
