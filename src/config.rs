use crate::i18n::Language;
use crate::query::{ParsePolicy, SingleTokenPolicy, UnresolvedPolicy};
use crate::translation::DEFAULT_TRANSLATE_API_URL;
use anyhow::{Context, Result};
use std::time::Duration;
use thiserror::Error;

/// Placeholder shipped in deployment templates; treated as "not set".
const TOKEN_PLACEHOLDER: &str = "YOUR_BOT_TOKEN_HERE";

const DEFAULT_SECONDARY_LANGUAGES: &str = "en,ru,uz,tr,de,fr";

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required secret is absent from the environment.
    #[error("{0} environment variable is not set")]
    MissingCredential(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub bot_token: String,
    pub telegram_api_url: String,
    pub poll_timeout_secs: u64,

    // Translation
    pub translate_api_url: String,
    pub translate_timeout: Duration,
    pub default_language: Language,
    pub secondary_languages: Vec<Language>,
    pub max_secondary_translations: usize,

    // Query parsing
    pub parse_policy: ParsePolicy,

    // Health server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let bot_token = std::env::var("BOT_TOKEN")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty() && v != TOKEN_PLACEHOLDER)
            .ok_or(ConfigError::MissingCredential("BOT_TOKEN"))?;

        let default_language = match std::env::var("DEFAULT_LANGUAGE") {
            Ok(code) => Language::resolve(&code)
                .with_context(|| format!("DEFAULT_LANGUAGE '{}' is not a known language", code))?,
            Err(_) => Language::ENGLISH,
        };

        let secondary_languages = parse_language_list(
            &std::env::var("SECONDARY_LANGUAGES")
                .unwrap_or_else(|_| DEFAULT_SECONDARY_LANGUAGES.to_string()),
        )
        .context("Invalid SECONDARY_LANGUAGES")?;

        let single_token = match std::env::var("SINGLE_TOKEN_POLICY") {
            Ok(v) => v
                .parse::<SingleTokenPolicy>()
                .context("Invalid SINGLE_TOKEN_POLICY")?,
            Err(_) => SingleTokenPolicy::default(),
        };
        let unresolved = match std::env::var("UNRESOLVED_LANGUAGE_POLICY") {
            Ok(v) => v
                .parse::<UnresolvedPolicy>()
                .context("Invalid UNRESOLVED_LANGUAGE_POLICY")?,
            Err(_) => UnresolvedPolicy::default(),
        };

        Ok(Self {
            // Telegram
            bot_token,
            telegram_api_url: std::env::var("TELEGRAM_API_URL")
                .unwrap_or_else(|_| "https://api.telegram.org".to_string()),
            poll_timeout_secs: std::env::var("POLL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),

            // Translation
            translate_api_url: std::env::var("TRANSLATE_API_URL")
                .unwrap_or_else(|_| DEFAULT_TRANSLATE_API_URL.to_string()),
            translate_timeout: Duration::from_secs(
                std::env::var("TRANSLATE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .filter(|&secs: &u64| secs > 0)
                    .unwrap_or(10),
            ),
            default_language,
            secondary_languages,
            max_secondary_translations: std::env::var("MAX_SECONDARY_TRANSLATIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),

            // Query parsing
            parse_policy: ParsePolicy {
                single_token,
                unresolved,
            },

            // Health server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10000),
        })
    }
}

/// Parse a comma-separated list of languages (codes or aliases).
///
/// Blank entries are skipped and duplicates keep their first position.
pub fn parse_language_list(value: &str) -> Result<Vec<Language>> {
    let mut languages = Vec::new();
    for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let language = Language::resolve(token)
            .with_context(|| format!("'{}' is not a known language", token))?;
        if !languages.contains(&language) {
            languages.push(language);
        }
    }
    Ok(languages)
}
