//! `Accept-Language` header parsing.
//!
//! Entries are ranked by quality, highest first. Entries with equal quality
//! keep the order they were listed in the header, so the client's first
//! listed language wins a tie. There is no secondary ordering.

use std::cmp::Ordering;

use crate::locale::SupportedLocales;

/// One ranked entry of an `Accept-Language` header.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePreference {
    /// Primary subtag, lowercased (`en-US` becomes `en`).
    pub tag: String,
    pub quality: f32,
}

/// Parse a header into preferences sorted by descending quality.
///
/// Never fails: empty entries are skipped and a malformed quality counts as 1.0.
pub fn parse(header: &str) -> Vec<LanguagePreference> {
    let mut prefs: Vec<LanguagePreference> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = primary_subtag(parts.next()?)?;
            let quality = parts
                .find_map(|param| param.trim().strip_prefix("q="))
                .map(parse_quality)
                .unwrap_or(1.0);
            Some(LanguagePreference { tag, quality })
        })
        .collect();

    // sort_by is stable: ties keep header order
    prefs.sort_by(|a, b| b.quality.partial_cmp(&a.quality).unwrap_or(Ordering::Equal));
    prefs
}

/// First preference, in ranked order, that names a supported locale.
pub fn best_match<'a>(header: &str, locales: &'a SupportedLocales) -> Option<&'a str> {
    parse(header)
        .iter()
        .find_map(|pref| locales.get(&pref.tag))
}

fn primary_subtag(raw: &str) -> Option<String> {
    let primary = raw.trim().split(['-', '_']).next()?.trim();
    if primary.is_empty() {
        return None;
    }
    Some(primary.to_ascii_lowercase())
}

fn parse_quality(raw: &str) -> f32 {
    match raw.trim().parse::<f32>() {
        Ok(q) if q.is_finite() => q,
        _ => 1.0,
    }
}
