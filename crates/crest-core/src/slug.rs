//! Deterministic event identifiers derived from a year and a display name.

/// Derive the stable store identifier for a `(year, name)` pair.
///
/// The name is lowercased; every maximal run of characters outside
/// `[a-z0-9]` collapses to a single underscore; leading and trailing
/// underscores are stripped; the numeric year is prefixed with an
/// underscore separator.
///
/// Deterministic by construction. Identifier collisions are intentional:
/// the store resolves them last-write-wins, never by suffixing.
#[must_use]
pub fn make_id(year: i32, name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_sep = false;

    for c in name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            slug.push(c);
            pending_sep = false;
        } else {
            pending_sep = true;
        }
    }

    format!("{year}_{slug}")
}
