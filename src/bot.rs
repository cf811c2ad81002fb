//! Inline query handling and the update loop.
//!
//! Every update is handled on its own task. Nothing is shared between
//! requests except the read-only language registry and the HTTP clients, so
//! a failure while answering one user never affects another.

use crate::config::Config;
use crate::i18n::{BotStrings, Language};
use crate::query::{ParsedQuery, QueryError, QueryParser, UnresolvedPolicy};
use crate::telegram::{InlineQuery, InlineQueryResult, Message, TelegramClient, Update};
use crate::translation::{translate_query, GoogleTranslator, TranslationResult, Translator};
use anyhow::Result;
use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const THUMB_TRANSLATE: &str = "https://img.icons8.com/color/96/000000/translate.png";
const THUMB_PRIMARY: &str = "https://img.icons8.com/color/96/000000/check.png";
const THUMB_SECONDARY: &str = "https://img.icons8.com/color/96/000000/language.png";
const THUMB_COMBINED: &str = "https://img.icons8.com/color/96/000000/copy.png";

/// Characters of a translation shown in a result's description line
const DESCRIPTION_CHARS: usize = 100;

/// Characters of each side shown in the combined result's description
const COMBINED_PREVIEW_CHARS: usize = 50;

/// Pause after a failed `getUpdates` call before polling again
const POLL_ERROR_DELAY: Duration = Duration::from_secs(5);

/// Used in help text until the bot's real username is known
const FALLBACK_USERNAME: &str = "your_bot_name";

pub struct Bot {
    telegram: TelegramClient,
    translator: Arc<dyn Translator>,
    parser: QueryParser,
    secondary_languages: Vec<Language>,
    max_secondary: usize,
    username: String,
    poll_error_delay: Duration,
}

impl Bot {
    /// Create a bot with no secondary translations.
    pub fn new(telegram: TelegramClient, translator: Arc<dyn Translator>, parser: QueryParser) -> Self {
        Self {
            telegram,
            translator,
            parser,
            secondary_languages: Vec::new(),
            max_secondary: 0,
            username: FALLBACK_USERNAME.to_string(),
            poll_error_delay: POLL_ERROR_DELAY,
        }
    }

    /// Wire up the production Telegram client and Google translator.
    pub fn from_config(config: &Config, client: reqwest::Client) -> Self {
        let telegram = TelegramClient::new(client.clone(), &config.telegram_api_url, &config.bot_token);
        let translator = GoogleTranslator::new(
            client,
            config.translate_api_url.clone(),
            config.translate_timeout,
        );
        let parser = QueryParser::new(config.default_language, config.parse_policy);

        Self::new(telegram, Arc::new(translator), parser).with_secondary_languages(
            config.secondary_languages.clone(),
            config.max_secondary_translations,
        )
    }

    /// Languages offered in addition to the requested one.
    ///
    /// The requested language is skipped and at most `max` others are used.
    pub fn with_secondary_languages(mut self, languages: Vec<Language>, max: usize) -> Self {
        self.secondary_languages = languages;
        self.max_secondary = max;
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn with_poll_error_delay(mut self, delay: Duration) -> Self {
        self.poll_error_delay = delay;
        self
    }

    pub fn telegram(&self) -> &TelegramClient {
        &self.telegram
    }

    /// Secondary targets for a query whose primary target is `primary`.
    pub fn secondary_targets(&self, primary: Language) -> Vec<Language> {
        self.secondary_languages
            .iter()
            .copied()
            .filter(|&lang| lang != primary)
            .take(self.max_secondary)
            .collect()
    }

    /// Build the result candidates for one inline query text.
    ///
    /// Never fails: parse errors and provider failures become explanatory
    /// results for the user.
    pub async fn inline_results(&self, raw_query: &str) -> Vec<InlineQueryResult> {
        let strings = BotStrings::get();

        let query = match self.parser.parse(raw_query) {
            Ok(query) => query,
            Err(QueryError::EmptyInput) => return vec![usage_hint(strings)],
            Err(QueryError::MissingPayload) => return vec![no_text(strings)],
            Err(QueryError::UnresolvedLanguage(token)) => {
                return vec![unknown_language(strings, &token)]
            }
        };

        debug!(
            "Parsed query: target={} defaulted={} chars={}",
            query.target,
            query.defaulted,
            query.payload.chars().count()
        );

        let primary = match translate_query(self.translator.as_ref(), &query).await {
            Ok(result) => result,
            Err(e) => {
                error!("Translation to {} failed: {}", query.target, e);
                return vec![translation_failed(strings)];
            }
        };

        let mut results = vec![primary_article(&primary)];
        results.extend(self.secondary_articles(&query).await);
        results.push(combined_article(strings, &primary));
        results
    }

    /// Translate into every secondary language concurrently.
    ///
    /// Each failure is logged and dropped on its own.
    async fn secondary_articles(&self, query: &ParsedQuery) -> Vec<InlineQueryResult> {
        let targets = self.secondary_targets(query.target);
        if targets.is_empty() {
            return Vec::new();
        }

        let translator = self.translator.as_ref();
        let translations = join_all(targets.into_iter().map(|lang| async move {
            (lang, translator.translate(&query.payload, lang).await)
        }))
        .await;

        translations
            .into_iter()
            .filter_map(|(lang, result)| match result {
                Ok(text) => Some(
                    InlineQueryResult::article(lang.label(), preview(&text, DESCRIPTION_CHARS), text)
                        .with_thumbnail(THUMB_SECONDARY),
                ),
                Err(e) => {
                    warn!("Secondary translation to {} failed: {}", lang, e);
                    None
                }
            })
            .collect()
    }

    /// Language that text without a leading language is translated into, if
    /// such text is accepted at all.
    fn untagged_fallback(&self) -> Option<Language> {
        match self.parser.policy().unresolved {
            UnresolvedPolicy::FallbackToDefault => Some(self.parser.default_language()),
            UnresolvedPolicy::Reject => None,
        }
    }

    /// Dispatch one update from Telegram.
    pub async fn handle_update(&self, update: Update) -> Result<()> {
        if let Some(inline_query) = update.inline_query {
            return self.handle_inline_query(inline_query).await;
        }
        if let Some(message) = update.message {
            return self.handle_message(message).await;
        }
        Ok(())
    }

    async fn handle_inline_query(&self, inline_query: InlineQuery) -> Result<()> {
        info!("Inline query {} from {}", inline_query.id, inline_query.from.id);

        let results = self.inline_results(&inline_query.query).await;
        self.telegram
            .answer_inline_query(&inline_query.id, &results)
            .await
    }

    async fn handle_message(&self, message: Message) -> Result<()> {
        let Some(text) = message.text.as_deref() else {
            return Ok(());
        };

        match command_name(text) {
            Some("/start") | Some("/help") => {
                info!("Sending help to chat {}", message.chat.id);
                let help = BotStrings::get().help_for(&self.username, self.untagged_fallback());
                self.telegram.send_html(message.chat.id, &help).await
            }
            _ => Ok(()),
        }
    }

    /// Long-poll Telegram until `shutdown` resolves.
    ///
    /// Transport errors are logged and polling resumes after a fixed pause.
    pub async fn run_polling<F>(self: Arc<Self>, poll_timeout_secs: u64, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut offset: Option<i64> = None;

        info!("Polling Telegram for updates");

        loop {
            let polled = tokio::select! {
                _ = &mut shutdown => break,
                polled = self.telegram.get_updates(offset, poll_timeout_secs) => polled,
            };

            match polled {
                Ok(updates) => {
                    for update in updates {
                        offset = Some(update.update_id + 1);

                        let bot = Arc::clone(&self);
                        tokio::spawn(async move {
                            let update_id = update.update_id;
                            if let Err(e) = bot.handle_update(update).await {
                                error!("Failed to handle update {}: {:#}", update_id, e);
                            }
                        });
                    }
                }
                Err(e) => {
                    error!(
                        "Failed to fetch updates (retry in {:?}): {:#}",
                        self.poll_error_delay, e
                    );
                    tokio::select! {
                        _ = &mut shutdown => break,
                        _ = tokio::time::sleep(self.poll_error_delay) => {}
                    }
                }
            }
        }

        info!("Update loop stopped");
    }
}

/// Extract the command from a message like "/start@my_bot arg".
fn command_name(text: &str) -> Option<&str> {
    let first = text.split_whitespace().next()?;
    if !first.starts_with('/') {
        return None;
    }
    first.split('@').next()
}

/// First `max` characters of `text`.
fn preview(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn usage_hint(strings: &BotStrings) -> InlineQueryResult {
    InlineQueryResult::article(
        strings.usage_title,
        strings.usage_description,
        strings.usage_message,
    )
    .with_thumbnail(THUMB_TRANSLATE)
}

fn no_text(strings: &BotStrings) -> InlineQueryResult {
    InlineQueryResult::article(
        strings.no_text_title,
        strings.no_text_description,
        strings.no_text_message,
    )
}

fn unknown_language(strings: &BotStrings, token: &str) -> InlineQueryResult {
    InlineQueryResult::article(
        strings.unknown_language_title,
        strings.unknown_language_description.replace("{token}", token),
        strings.usage_message,
    )
}

fn translation_failed(strings: &BotStrings) -> InlineQueryResult {
    InlineQueryResult::article(
        strings.failure_title,
        strings.failure_description,
        strings.failure_message,
    )
}

fn primary_article(result: &TranslationResult) -> InlineQueryResult {
    InlineQueryResult::article(
        format!("{} ✅", result.target.label()),
        preview(&result.translated_text, DESCRIPTION_CHARS),
        result.translated_text.clone(),
    )
    .with_thumbnail(THUMB_PRIMARY)
}

fn combined_article(strings: &BotStrings, result: &TranslationResult) -> InlineQueryResult {
    InlineQueryResult::article(
        strings.combined_title,
        format!(
            "{} → {}",
            preview(&result.source_text, COMBINED_PREVIEW_CHARS),
            preview(&result.translated_text, COMBINED_PREVIEW_CHARS)
        ),
        format!("{}\n\n{}", result.source_text, result.translated_text),
    )
    .with_thumbnail(THUMB_COMBINED)
}
