//! Per-request locale decision.
//!
//! Priority: path segment > cookie > `Accept-Language` > default. A path that
//! already starts with a supported locale is always served as-is; anything
//! else is redirected to its locale-prefixed form.

use crate::accept_language;
use crate::locale::SupportedLocales;

/// The three inputs a decision is computed from.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestContext<'a> {
    /// URL path, starting with `/`. No query string.
    pub path: &'a str,
    /// Raw locale cookie value, if the cookie was sent.
    pub cookie: Option<&'a str>,
    /// Raw `Accept-Language` header, if sent.
    pub accept_language: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleDecision {
    /// Path already carries `locale`. `set_cookie` is true when the stored
    /// cookie was missing, invalid or different.
    PassThrough { locale: String, set_cookie: bool },
    /// Path carries no locale; send the client to `location`.
    Redirect { locale: String, location: String },
}

impl LocaleDecision {
    pub fn locale(&self) -> &str {
        match self {
            LocaleDecision::PassThrough { locale, .. } => locale,
            LocaleDecision::Redirect { locale, .. } => locale,
        }
    }

    /// Whether the response must carry a `Set-Cookie` for the locale.
    pub fn sets_cookie(&self) -> bool {
        match self {
            LocaleDecision::PassThrough { set_cookie, .. } => *set_cookie,
            LocaleDecision::Redirect { .. } => true,
        }
    }
}

/// Decide the locale for one request. Pure and infallible.
pub fn resolve(ctx: &RequestContext<'_>, locales: &SupportedLocales) -> LocaleDecision {
    let cookie_locale = ctx.cookie.and_then(|c| locales.get(c.trim()));

    if let Some(path_locale) = path_locale(ctx.path, locales) {
        return LocaleDecision::PassThrough {
            locale: path_locale.to_string(),
            set_cookie: cookie_locale != Some(path_locale),
        };
    }

    let decided = cookie_locale
        .or_else(|| {
            ctx.accept_language
                .and_then(|header| accept_language::best_match(header, locales))
        })
        .unwrap_or_else(|| locales.default_locale());

    LocaleDecision::Redirect {
        locale: decided.to_string(),
        location: localized_path(decided, ctx.path),
    }
}

/// The supported locale named by the segment right after the leading `/`.
/// `//en/x` has an empty first segment and is not localized.
pub fn path_locale<'a>(path: &str, locales: &'a SupportedLocales) -> Option<&'a str> {
    let first = path.strip_prefix('/')?.split('/').next()?;
    locales.get(first)
}

/// Prefix `path` with `/<locale>`. The root path maps to exactly `/<locale>`.
pub fn localized_path(locale: &str, path: &str) -> String {
    if path == "/" || path.is_empty() {
        format!("/{locale}")
    } else if path.starts_with('/') {
        format!("/{locale}{path}")
    } else {
        format!("/{locale}/{path}")
    }
}
