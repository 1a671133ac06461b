//! Locale cookie reading and `Set-Cookie` formatting.

pub const DEFAULT_COOKIE_NAME: &str = "NEXT_LOCALE";
pub const DEFAULT_MAX_AGE_SECS: u64 = 365 * 24 * 3600; // 1 year

/// Find a cookie by exact name in a `Cookie` request header.
/// The first matching pair wins.
pub fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    for part in header.split(';') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix(name) {
            if let Some(value) = value.strip_prefix('=') {
                return Some(value.trim());
            }
        }
    }
    None
}

/// Build the `Set-Cookie` header value carrying the decided locale.
pub fn locale_cookie(name: &str, locale: &str, max_age_secs: u64) -> String {
    format!("{name}={locale}; Path=/; Max-Age={max_age_secs}; SameSite=Lax")
}
