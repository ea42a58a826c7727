//! Tenant slug rules
//!
//! A slug is the single hostname label that identifies a tenant, e.g. `acme`
//! in `acme.app.com`. Slugs follow DNS label syntax restricted to lower-case
//! ASCII: `[a-z0-9]`, optionally followed by up to 61 `[a-z0-9-]` characters
//! and a closing `[a-z0-9]`.

/// Maximum length of a slug (the DNS label limit)
pub const MAX_SLUG_LEN: usize = 63;

/// Normalize a candidate slug: trim surrounding whitespace and lower-case it
pub fn normalize_slug(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Check whether a label is an acceptable tenant slug once normalized
pub fn validate_slug(label: &str) -> bool {
    is_canonical_slug(&normalize_slug(label))
}

/// Check an already-normalized label against the slug grammar
pub(crate) fn is_canonical_slug(slug: &str) -> bool {
    let bytes = slug.as_bytes();
    if bytes.is_empty() || bytes.len() > MAX_SLUG_LEN {
        return false;
    }

    let is_edge = |b: &u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    let (first, last) = (&bytes[0], &bytes[bytes.len() - 1]);
    if !is_edge(first) || !is_edge(last) {
        return false;
    }

    bytes.iter().all(|b| is_edge(b) || *b == b'-')
}
