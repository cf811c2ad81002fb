//! Inline query parsing.
//!
//! A query is `"<language> <text>"`: the first whitespace-delimited word names
//! the target language and everything after the first whitespace run is the
//! text to translate. What happens when the query is a single word, or when
//! the first word is not a language, is decided by [`ParsePolicy`].

use crate::i18n::Language;
use anyhow::{bail, Result};
use std::str::FromStr;
use thiserror::Error;

/// Why a query could not be turned into a translation request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The query is empty or whitespace only.
    #[error("query is empty")]
    EmptyInput,

    /// The query has no text to translate (single word under `SingleTokenPolicy::Reject`).
    #[error("query has no text to translate")]
    MissingPayload,

    /// The first word is not a known language (under `UnresolvedPolicy::Reject`).
    #[error("unknown language: '{0}'")]
    UnresolvedLanguage(String),
}

/// What to do with a query that is a single word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SingleTokenPolicy {
    /// Translate the word into the default language.
    #[default]
    TranslateToDefault,
    /// Report the query as having no text.
    Reject,
}

/// What to do when the first word of a multi-word query is not a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnresolvedPolicy {
    /// Translate the whole query into the default language.
    #[default]
    FallbackToDefault,
    /// Report the unknown language token.
    Reject,
}

impl FromStr for SingleTokenPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Self::TranslateToDefault),
            "reject" => Ok(Self::Reject),
            other => bail!(
                "Invalid single-token policy '{}'. Expected 'default' or 'reject'",
                other
            ),
        }
    }
}

impl FromStr for UnresolvedPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Self::FallbackToDefault),
            "reject" => Ok(Self::Reject),
            other => bail!(
                "Invalid unresolved-language policy '{}'. Expected 'default' or 'reject'",
                other
            ),
        }
    }
}

/// Parsing behavior for ambiguous queries.
///
/// The default (`TranslateToDefault`, `FallbackToDefault`) never rejects a
/// non-empty query: anything that does not start with a language is
/// translated as a whole into the default language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParsePolicy {
    pub single_token: SingleTokenPolicy,
    pub unresolved: UnresolvedPolicy,
}

impl ParsePolicy {
    /// Reject every query that does not start with a known language and
    /// carry some text after it.
    pub fn strict() -> Self {
        Self {
            single_token: SingleTokenPolicy::Reject,
            unresolved: UnresolvedPolicy::Reject,
        }
    }
}

/// A query ready to be translated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Target language
    pub target: Language,
    /// Text to translate
    pub payload: String,
    /// `true` if the target is the default language rather than one the user named
    pub defaulted: bool,
}

/// Splits raw inline query text into a target language and a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryParser {
    default_language: Language,
    policy: ParsePolicy,
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new(Language::ENGLISH, ParsePolicy::default())
    }
}

impl QueryParser {
    pub fn new(default_language: Language, policy: ParsePolicy) -> Self {
        Self {
            default_language,
            policy,
        }
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    pub fn policy(&self) -> ParsePolicy {
        self.policy
    }

    /// Parse a raw inline query.
    ///
    /// # Returns
    /// * `Ok(ParsedQuery)` with a target language and non-empty payload
    /// * `Err(QueryError)` if there is nothing to translate under the policy
    pub fn parse(&self, raw: &str) -> Result<ParsedQuery, QueryError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QueryError::EmptyInput);
        }

        let Some((token, rest)) = split_first_word(trimmed) else {
            return match self.policy.single_token {
                SingleTokenPolicy::TranslateToDefault => Ok(self.defaulted(trimmed)),
                SingleTokenPolicy::Reject => Err(QueryError::MissingPayload),
            };
        };

        match Language::resolve(token) {
            Some(target) => Ok(ParsedQuery {
                target,
                payload: rest.to_string(),
                defaulted: false,
            }),
            None => match self.policy.unresolved {
                UnresolvedPolicy::FallbackToDefault => Ok(self.defaulted(trimmed)),
                UnresolvedPolicy::Reject => {
                    Err(QueryError::UnresolvedLanguage(token.to_string()))
                }
            },
        }
    }

    fn defaulted(&self, payload: &str) -> ParsedQuery {
        ParsedQuery {
            target: self.default_language,
            payload: payload.to_string(),
            defaulted: true,
        }
    }
}

/// Split trimmed text on its first whitespace run.
///
/// Returns `None` when the text is a single word.
fn split_first_word(text: &str) -> Option<(&str, &str)> {
    let boundary = text.find(char::is_whitespace)?;
    let (first, rest) = text.split_at(boundary);
    Some((first, rest.trim_start()))
}
