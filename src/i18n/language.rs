//! Language type: validated handle into the language registry.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};
use std::fmt;

/// A validated language.
///
/// Only languages present in the registry can be constructed, so holders of a
/// `Language` never need to re-check the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "ru")
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };
    pub const RUSSIAN: Language = Language { code: "ru" };
    pub const UZBEK: Language = Language { code: "uz" };

    /// Create a Language from its canonical code.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is in the registry
    /// * `Err` if the code is unknown
    ///
    /// # Example
    /// ```ignore
    /// let russian = Language::from_code("ru")?;
    /// ```
    pub fn from_code(code: &str) -> Result<Language> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) => Ok(Language { code: config.code }),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Resolve any alias a user may type ("ru", "Russian", "русский", ...).
    ///
    /// Returns `None` when the token matches no alias.
    pub fn resolve(token: &str) -> Option<Language> {
        LanguageRegistry::get()
            .resolve(token)
            .map(|config| Language { code: config.code })
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the language code is not found in the registry. This cannot
    /// happen for a Language built through `from_code`, `resolve` or the
    /// constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// English name of the language (e.g., "Russian").
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Native name of the language (e.g., "Русский").
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Flag and Uzbek name shown in result titles (e.g., "🇷🇺 Rus tili").
    pub fn label(&self) -> &'static str {
        self.config().label
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}
