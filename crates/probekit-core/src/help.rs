//! Localized help text
//!
//! Processors describe themselves through a help key rather than a literal
//! string. The catalog resolves a key for the active language, falling back
//! to English and finally to the key itself.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Help key for the tool change processor
pub const TOOL_CHANGE_HELP_KEY: &str = "sender.help.tool-change";

/// Languages with built-in help text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    En,
    /// German
    De,
    /// Spanish
    Es,
    /// French
    Fr,
}

impl Default for Language {
    fn default() -> Self {
        Self::En
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::En => write!(f, "en"),
            Self::De => write!(f, "de"),
            Self::Es => write!(f, "es"),
            Self::Fr => write!(f, "fr"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    /// Accepts bare codes ("de") as well as POSIX locale names ("de_DE.UTF-8")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .split(['_', '-', '.', '@'])
            .next()
            .unwrap_or_default()
            .to_lowercase();

        match primary.as_str() {
            "en" | "c" | "posix" => Ok(Self::En),
            "de" => Ok(Self::De),
            "es" => Ok(Self::Es),
            "fr" => Ok(Self::Fr),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}

/// Keyed store of translated help strings
#[derive(Debug, Clone, Default)]
pub struct HelpCatalog {
    entries: HashMap<(Language, String), String>,
}

impl HelpCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog populated with the built-in translations
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog
            .insert(
                Language::En,
                TOOL_CHANGE_HELP_KEY,
                "Moves to a park position on a tool change (T#M6), pauses so the tool can be \
                 swapped, then moves to the probe location and runs the tool measurement.",
            )
            .insert(
                Language::De,
                TOOL_CHANGE_HELP_KEY,
                "Fährt bei einem Werkzeugwechsel (T#M6) in eine Parkposition, pausiert für den \
                 Werkzeugtausch und fährt anschließend zum Taster, um das Werkzeug zu vermessen.",
            )
            .insert(
                Language::Es,
                TOOL_CHANGE_HELP_KEY,
                "En un cambio de herramienta (T#M6) se mueve a una posición de aparcamiento, \
                 pausa para cambiar la herramienta y luego va a la sonda para medirla.",
            )
            .insert(
                Language::Fr,
                TOOL_CHANGE_HELP_KEY,
                "Lors d'un changement d'outil (T#M6), se déplace vers une position de parking, \
                 fait une pause pour changer l'outil puis va au palpeur pour le mesurer.",
            );
        catalog
    }

    /// Shared catalog with the built-in translations
    pub fn global() -> &'static HelpCatalog {
        static CATALOG: OnceLock<HelpCatalog> = OnceLock::new();
        CATALOG.get_or_init(HelpCatalog::builtin)
    }

    /// Add or replace a translation
    pub fn insert(
        &mut self,
        language: Language,
        key: impl Into<String>,
        text: impl Into<String>,
    ) -> &mut Self {
        self.entries.insert((language, key.into()), text.into());
        self
    }

    /// Resolve a key for a language
    ///
    /// Falls back to English, then to the key itself, so callers always get
    /// something printable.
    pub fn get<'a>(&'a self, language: Language, key: &'a str) -> &'a str {
        self.lookup(language, key)
            .or_else(|| self.lookup(Language::En, key))
            .unwrap_or_else(|| {
                tracing::debug!("No help text for '{}' ({})", key, language);
                key
            })
    }

    fn lookup(&self, language: Language, key: &str) -> Option<&str> {
        self.entries
            .get(&(language, key.to_string()))
            .map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_locale_names() {
        assert_eq!("de".parse::<Language>(), Ok(Language::De));
        assert_eq!("de_DE.UTF-8".parse::<Language>(), Ok(Language::De));
        assert_eq!("fr-CA".parse::<Language>(), Ok(Language::Fr));
        assert_eq!("C".parse::<Language>(), Ok(Language::En));
        assert!("xx_YY".parse::<Language>().is_err());
    }

    #[test]
    fn test_builtin_tool_change_help() {
        let catalog = HelpCatalog::builtin();
        let en = catalog.get(Language::En, TOOL_CHANGE_HELP_KEY);
        let de = catalog.get(Language::De, TOOL_CHANGE_HELP_KEY);
        assert!(en.contains("T#M6"));
        assert_ne!(en, de);
    }

    #[test]
    fn test_fallback_to_english_then_key() {
        let mut catalog = HelpCatalog::new();
        catalog.insert(Language::En, "only.english", "English text");

        assert_eq!(catalog.get(Language::Fr, "only.english"), "English text");
        assert_eq!(catalog.get(Language::De, "missing.key"), "missing.key");
    }
}
