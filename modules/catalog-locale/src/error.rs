//! Typed errors for locale configuration.

use thiserror::Error;

/// Errors raised while building the locale configuration.
///
/// Request handling never produces these: a bad cookie or header degrades to
/// the next resolution tier instead.
#[derive(Debug, Error)]
pub enum LocaleError {
    /// No supported locales were configured
    #[error("supported locale set is empty")]
    EmptyLocaleSet,

    /// Locale code is not 2-8 ASCII letters
    #[error("invalid locale code: {code:?}")]
    InvalidCode { code: String },

    /// Same code listed twice
    #[error("duplicate locale code: {code}")]
    DuplicateCode { code: String },

    /// Default locale missing from the supported set
    #[error("default locale {code} is not in the supported set")]
    UnsupportedDefault { code: String },

    /// Exclusion pattern failed to compile
    #[error("invalid exclusion pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type alias for locale configuration.
pub type LocaleResult<T> = std::result::Result<T, LocaleError>;
