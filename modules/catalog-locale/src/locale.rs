use crate::error::{LocaleError, LocaleResult};

/// The fixed set of locale codes the site is translated into.
///
/// Codes are lowercase ASCII and keep their configured order. One member is
/// the default. Built once at startup and shared read-only across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedLocales {
    codes: Vec<String>,
    default: usize,
}

impl SupportedLocales {
    /// Validate and lowercase `codes`; `default` must be one of them.
    pub fn new<I, S>(codes: I, default: &str) -> LocaleResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for code in codes {
            let code = code.as_ref().trim();
            if !is_valid_code(code) {
                return Err(LocaleError::InvalidCode {
                    code: code.to_string(),
                });
            }
            let code = code.to_ascii_lowercase();
            if normalized.contains(&code) {
                return Err(LocaleError::DuplicateCode { code });
            }
            normalized.push(code);
        }

        if normalized.is_empty() {
            return Err(LocaleError::EmptyLocaleSet);
        }

        let wanted = default.trim().to_ascii_lowercase();
        let default = normalized
            .iter()
            .position(|c| *c == wanted)
            .ok_or(LocaleError::UnsupportedDefault {
                code: default.to_string(),
            })?;

        Ok(Self {
            codes: normalized,
            default,
        })
    }

    /// Returns the stored code if `candidate` is exactly a supported locale.
    pub fn get(&self, candidate: &str) -> Option<&str> {
        self.codes
            .iter()
            .find(|c| c.as_str() == candidate)
            .map(String::as_str)
    }

    /// Whether `candidate` is exactly a supported locale.
    pub fn contains(&self, candidate: &str) -> bool {
        self.get(candidate).is_some()
    }

    /// Locale used when neither cookie nor header decides.
    pub fn default_locale(&self) -> &str {
        &self.codes[self.default]
    }

    /// Supported codes in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn is_valid_code(code: &str) -> bool {
    (2..=8).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_alphabetic())
}
