//! Paths that bypass locale routing: static assets, API routes, the CMS
//! studio and well-known files.

use regex::Regex;

use crate::error::{LocaleError, LocaleResult};

pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &[
    "/api",
    "/_next/static",
    "/_next/image",
    "/studio",
    "/locales",
    "/static",
    "/assets",
];

pub const DEFAULT_EXCLUDED_FILES: &[&str] = &["/favicon.ico", "/sitemap.xml", "/robots.txt"];

/// Deny-list matcher deciding which request paths skip the locale resolver.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    prefixes: Vec<String>,
    files: Vec<String>,
    patterns: Vec<Regex>,
}

impl Default for PathMatcher {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_EXCLUDED_PREFIXES.iter().map(|s| s.to_string()).collect(),
            files: DEFAULT_EXCLUDED_FILES.iter().map(|s| s.to_string()).collect(),
            patterns: Vec::new(),
        }
    }
}

impl PathMatcher {
    /// Matcher with no exclusions at all.
    pub fn empty() -> Self {
        Self {
            prefixes: Vec::new(),
            files: Vec::new(),
            patterns: Vec::new(),
        }
    }

    pub fn new<P, F, R>(prefixes: P, files: F, patterns: R) -> LocaleResult<Self>
    where
        P: IntoIterator,
        P::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        let mut matcher = Self::empty();
        for prefix in prefixes {
            matcher = matcher.with_prefix(prefix);
        }
        for file in files {
            matcher = matcher.with_file(file);
        }
        for pattern in patterns {
            matcher = matcher.with_pattern(pattern.as_ref())?;
        }
        Ok(matcher)
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let prefix = prefix.trim_end_matches('/');
        if !prefix.is_empty() {
            self.prefixes.push(prefix.to_string());
        }
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.files.push(file.into());
        self
    }

    pub fn with_pattern(mut self, pattern: &str) -> LocaleResult<Self> {
        let regex = Regex::new(pattern).map_err(|source| LocaleError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.patterns.push(regex);
        Ok(self)
    }

    /// True when `path` must bypass locale routing.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.files.iter().any(|f| f == path)
            || self.prefixes.iter().any(|p| has_segment_prefix(path, p))
            || self.patterns.iter().any(|r| r.is_match(path))
    }
}

/// `/api` matches `/api` and `/api/...` but not `/apiary`.
fn has_segment_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
