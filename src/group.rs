//! Ansible group name rules
//!
//! Ansible group names cannot contain dashes or periods and cannot start
//! with a digit.

/// Name of the built-in group holding every host
pub const ALL_GROUP: &str = "all";

/// Top-level key reserved for host variables
pub const META_KEY: &str = "_meta";

/// Sanitize a candidate group name
///
/// Replaces `-` and `.` with `_`. Returns `None` when the result is empty,
/// starts with a numeric character (any Unicode digit, not only ASCII), or
/// collides with the reserved `_meta` key; callers skip the grouping in that
/// case.
pub fn sanitize_group_name(name: &str) -> Option<String> {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '-' | '.' => '_',
            other => other,
        })
        .collect();

    match sanitized.chars().next() {
        None => None,
        Some(first) if first.is_numeric() => None,
        Some(_) if sanitized == META_KEY => None,
        Some(_) => Some(sanitized),
    }
}
