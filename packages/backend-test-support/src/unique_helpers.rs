//! ULID-suffixed fixture values so parallel tests never collide on unique columns.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("room");
/// let b = unique_str("room");
/// assert_ne!(a, b);
/// assert!(a.starts_with("room-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Short display name that still fits the 64-char column: `{prefix}-{last 8 of ulid}`.
pub fn unique_display_name(prefix: &str) -> String {
    let ulid = Ulid::new().to_string();
    format!("{}-{}", prefix, &ulid[ulid.len() - 8..])
}
