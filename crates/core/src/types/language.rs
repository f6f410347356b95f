//! Language registry
//!
//! The set of supported languages is fixed at compile time. Codes are matched
//! case-insensitively against a static table.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language supported by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Spanish,
    French,
    Portuguese,
}

/// (language, code, display name)
const REGISTRY: [(Language, &str, &str); 4] = [
    (Language::English, "en", "English"),
    (Language::Spanish, "es", "Spanish"),
    (Language::French, "fr", "French"),
    (Language::Portuguese, "pt", "Portuguese"),
];

impl Language {
    /// Resolves a two-letter code to a language
    ///
    /// Matching is exact apart from ASCII case. Surrounding whitespace is not
    /// trimmed.
    pub fn resolve(code: &str) -> Result<Self> {
        REGISTRY
            .iter()
            .find(|(_, c, _)| c.eq_ignore_ascii_case(code))
            .map(|(lang, _, _)| *lang)
            .ok_or_else(|| AppError::UnsupportedLanguage {
                code: code.to_string(),
            })
    }

    /// Returns the (code, name) pair for this language
    pub fn display(self) -> (&'static str, &'static str) {
        REGISTRY
            .iter()
            .find(|(lang, _, _)| *lang == self)
            .map(|(_, code, name)| (*code, *name))
            .unwrap_or(("", ""))
    }

    /// Two-letter code, as stored in the database
    pub fn code(self) -> &'static str {
        self.display().0
    }

    /// Human readable name
    pub fn name(self) -> &'static str {
        self.display().1
    }

    /// All supported languages in registry order
    pub fn all() -> impl Iterator<Item = Language> {
        REGISTRY.iter().map(|(lang, _, _)| *lang)
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::resolve(s)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (code, name) = self.display();
        write!(f, "{} - {}", code, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_codes() {
        assert_eq!(Language::resolve("en").unwrap(), Language::English);
        assert_eq!(Language::resolve("es").unwrap(), Language::Spanish);
        assert_eq!(Language::resolve("fr").unwrap(), Language::French);
        assert_eq!(Language::resolve("pt").unwrap(), Language::Portuguese);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(Language::resolve("EN").unwrap(), Language::English);
        assert_eq!(Language::resolve("Pt").unwrap(), Language::Portuguese);
    }

    #[test]
    fn test_resolve_unknown_code() {
        let err = Language::resolve("xx").unwrap_err();
        assert!(matches!(err, AppError::UnsupportedLanguage { ref code } if code == "xx"));

        assert!(Language::resolve("").is_err());
        assert!(Language::resolve(" en").is_err());
        assert!(Language::resolve("eng").is_err());
    }

    #[test]
    fn test_display_pairs() {
        assert_eq!(Language::English.display(), ("en", "English"));
        assert_eq!(Language::Spanish.code(), "es");
        assert_eq!(Language::French.name(), "French");
        assert_eq!(Language::Portuguese.to_string(), "pt - Portuguese");
    }

    #[test]
    fn test_code_round_trips_through_resolve() {
        for lang in Language::all() {
            assert_eq!(Language::resolve(lang.code()).unwrap(), lang);
        }
        assert_eq!(Language::all().count(), 4);
    }

    #[test]
    fn test_from_str() {
        let lang: Language = "fr".parse().unwrap();
        assert_eq!(lang, Language::French);
        assert!("de".parse::<Language>().is_err());
    }
}
