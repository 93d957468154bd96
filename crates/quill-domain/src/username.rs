//! Username validation rules for the account principal.

/// Validate a username: 1–150 chars, ASCII alphanumeric plus `@ . + - _`.
///
/// The charset matches what the accounts schema accepts for the login
/// name; anything else must be rejected before it reaches persistence.
pub fn validate_username(username: &str) -> bool {
    if username.is_empty() || username.len() > 150 {
        return false;
    }
    username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}
