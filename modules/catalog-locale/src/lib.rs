//! Locale routing for the catalog site.
//!
//! Every page request is resolved to one supported locale using a priority
//! chain: a locale already present in the path, then the locale cookie, then
//! the `Accept-Language` header, then the configured default. The resolver is
//! a pure function of the request's path, cookie and header; hosting it in an
//! HTTP stack is left to `catalog-web`.

pub mod accept_language;
pub mod config;
pub mod cookie;
pub mod error;
pub mod locale;
pub mod matcher;
pub mod resolver;

pub use config::{CookieSettings, LocaleConfig};
pub use error::{LocaleError, LocaleResult};
pub use locale::SupportedLocales;
pub use matcher::PathMatcher;
pub use resolver::{resolve, LocaleDecision, RequestContext};
