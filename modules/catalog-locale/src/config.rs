use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cookie::{DEFAULT_COOKIE_NAME, DEFAULT_MAX_AGE_SECS};
use crate::locale::SupportedLocales;
use crate::matcher::{PathMatcher, DEFAULT_EXCLUDED_FILES, DEFAULT_EXCLUDED_PREFIXES};

const DEFAULT_LOCALES: &[&str] = &["fr", "en"];
const DEFAULT_LOCALE: &str = "fr";

/// Locale cookie name and lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieSettings {
    pub name: String,
    pub max_age_secs: u64,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_COOKIE_NAME.to_string(),
            max_age_secs: DEFAULT_MAX_AGE_SECS,
        }
    }
}

/// Immutable locale routing configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    pub locales: SupportedLocales,
    pub cookie: CookieSettings,
    pub matcher: PathMatcher,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

/// Optional TOML overlay. Every field may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub locales: LocalesSection,
    #[serde(default)]
    pub cookie: CookieSection,
    #[serde(default)]
    pub routing: RoutingSection,
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalesSection {
    pub supported: Option<Vec<String>>,
    pub default: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CookieSection {
    pub name: Option<String>,
    pub max_age_secs: Option<u64>,
}

/// `exclude_prefixes` and `exclude_files` replace the built-in lists when set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingSection {
    pub exclude_prefixes: Option<Vec<String>>,
    pub exclude_files: Option<Vec<String>>,
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl LocaleConfig {
    /// Load from the process environment (after reading `.env`), overlaid on
    /// the TOML file named by `LOCALE_CONFIG` when set.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let file = match env::var("LOCALE_CONFIG") {
            Ok(path) => load_file_config(Path::new(&path))?,
            Err(_) => FileConfig::default(),
        };

        Self::from_sources(file, |key| env::var(key).ok())
    }

    /// Merge order: built-in defaults, then `file`, then variables returned by
    /// `lookup`.
    pub fn from_sources<F>(file: FileConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let supported: Vec<String> = match lookup("SUPPORTED_LOCALES") {
            Some(raw) => split_list(&raw),
            None => file
                .locales
                .supported
                .unwrap_or_else(|| DEFAULT_LOCALES.iter().map(|s| s.to_string()).collect()),
        };
        let default = lookup("DEFAULT_LOCALE")
            .or(file.locales.default)
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        let locales = SupportedLocales::new(&supported, &default)
            .context("Invalid locale configuration")?;

        let cookie = CookieSettings {
            name: lookup("LOCALE_COOKIE_NAME")
                .or(file.cookie.name)
                .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string()),
            max_age_secs: match lookup("LOCALE_COOKIE_MAX_AGE") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .context("LOCALE_COOKIE_MAX_AGE must be a number of seconds")?,
                None => file.cookie.max_age_secs.unwrap_or(DEFAULT_MAX_AGE_SECS),
            },
        };
        anyhow::ensure!(!cookie.name.trim().is_empty(), "Locale cookie name must not be empty");

        let prefixes = file.routing.exclude_prefixes.unwrap_or_else(|| {
            DEFAULT_EXCLUDED_PREFIXES.iter().map(|s| s.to_string()).collect()
        });
        let files = file
            .routing
            .exclude_files
            .unwrap_or_else(|| DEFAULT_EXCLUDED_FILES.iter().map(|s| s.to_string()).collect());
        let mut patterns = file.routing.exclude_patterns;
        if let Some(raw) = lookup("LOCALE_EXCLUDE_PATTERNS") {
            patterns.extend(split_list(&raw));
        }
        let matcher = PathMatcher::new(prefixes, files, &patterns)
            .context("Invalid locale routing exclusions")?;

        Ok(Self {
            locales,
            cookie,
            matcher,
            web_host: lookup("WEB_HOST")
                .or(file.server.host)
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            web_port: match lookup("WEB_PORT") {
                Some(raw) => raw.trim().parse().context("WEB_PORT must be a number")?,
                None => file.server.port.unwrap_or(3000),
            },
        })
    }
}

/// Load and parse a TOML config file.
pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: FileConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
