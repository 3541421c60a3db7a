//! Unique fixture names.
//!
//! Team names are unique per series in the backend; ULID suffixes keep tests
//! sharing a database file from colliding.

use ulid::Ulid;

/// Two distinct team names sharing a prefix.
///
/// ```
/// use backend_test_support::unique_helpers::unique_team_names;
///
/// let (blue, red) = unique_team_names("ws");
/// assert_ne!(blue, red);
/// assert!(blue.starts_with("ws "));
/// ```
pub fn unique_team_names(prefix: &str) -> (String, String) {
    let suffix = Ulid::new();
    (
        format!("{prefix} Blue {suffix}"),
        format!("{prefix} Red {suffix}"),
    )
}
