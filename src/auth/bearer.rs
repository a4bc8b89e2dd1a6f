//! Bearer token header formatting (RFC 6750).

/// Trims a raw access token, returning `None` if nothing is left.
///
/// Token stores sometimes hold an empty string after a sign-out; such a token
/// is treated the same as a missing one.
pub fn normalize_token(raw: &str) -> Option<&str> {
    let token = raw.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Formats a token into a Bearer authentication header value.
///
/// # Examples
///
/// ```
/// use stravakit::auth::bearer::bearer_token;
///
/// assert_eq!(bearer_token("83ebeabdec09f6670863766f792ead24d61fe3f9"),
///            "Bearer 83ebeabdec09f6670863766f792ead24d61fe3f9");
/// ```
pub fn bearer_token(token: &str) -> String {
    format!("Bearer {}", token)
}
