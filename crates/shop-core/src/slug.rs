//! # Slug Derivation
//!
//! URL-safe identifiers derived from human-readable names. Uniqueness across
//! the catalog is enforced at the storage layer by suffixing a counter on
//! collision (`charizard`, `charizard-1`, ...).

/// Derive a URL-safe slug from a name.
///
/// Lowercases, keeps ASCII alphanumerics, and collapses everything else into
/// single hyphens. Leading/trailing hyphens are trimmed.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Append a numeric suffix to a base slug (`charizard` + 1 -> `charizard-1`)
pub fn with_suffix(base: &str, counter: u32) -> String {
    format!("{}-{}", base, counter)
}
