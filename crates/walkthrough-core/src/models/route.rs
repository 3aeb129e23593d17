//! Route pattern matching.

/// Matches a host route against a pattern whose segments may be `*`.
///
/// Segment counts must agree; a `*` segment matches any single non-empty
/// segment. Trailing slashes are ignored.
///
/// ```rust
/// use walkthrough_core::models::route_matches;
///
/// assert!(route_matches("/app/meetings/*", "/app/meetings/mtg-001"));
/// assert!(!route_matches("/app/meetings/*", "/app/meetings"));
/// assert!(route_matches("/app/settings", "/app/settings/"));
/// ```
pub fn route_matches(pattern: &str, path: &str) -> bool {
    let pattern: Vec<&str> = segments(pattern).collect();
    let path: Vec<&str> = segments(path).collect();

    pattern.len() == path.len()
        && pattern
            .iter()
            .zip(&path)
            .all(|(expected, actual)| *expected == "*" || expected == actual)
}

fn segments(route: &str) -> impl Iterator<Item = &str> {
    route.split('/').filter(|segment| !segment.is_empty())
}
