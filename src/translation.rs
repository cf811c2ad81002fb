use crate::i18n::Language;
use crate::query::ParsedQuery;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::debug;

/// Public endpoint of the Google translate web API (`client=gtx`)
pub const DEFAULT_TRANSLATE_API_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Failure of the external translation provider.
///
/// Every variant is treated the same way by the bot: the user gets one
/// "translation failed, try again" result.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("translation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("translation API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("unexpected translation response: {0}")]
    InvalidResponse(String),

    #[error("translation response was empty")]
    Empty,

    #[error("translation timed out after {0:?}")]
    Timeout(Duration),
}

/// A translation provider. The source language is always detected by the
/// provider.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslateError>;
}

/// Outcome of translating one parsed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub target: Language,
    pub source_text: String,
    pub translated_text: String,
}

/// Translate a parsed query into its target language.
pub async fn translate_query(
    translator: &dyn Translator,
    query: &ParsedQuery,
) -> Result<TranslationResult, TranslateError> {
    let translated_text = translator.translate(&query.payload, query.target).await?;

    Ok(TranslationResult {
        target: query.target,
        source_text: query.payload.clone(),
        translated_text,
    })
}

/// Translator backed by the Google translate `gtx` endpoint.
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_url: String,
    timeout: Duration,
}

impl GoogleTranslator {
    /// # Arguments
    /// * `client` - Shared HTTP client
    /// * `api_url` - Endpoint, normally [`DEFAULT_TRANSLATE_API_URL`]
    /// * `timeout` - Upper bound on a single provider call
    pub fn new(client: reqwest::Client, api_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            timeout,
        }
    }

    async fn request(&self, text: &str, target: Language) -> Result<String, TranslateError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(TranslateError::Api { status, body });
        }

        let body: serde_json::Value = response.json().await?;
        extract_translation(&body)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslateError> {
        debug!("Translating {} chars to {}", text.chars().count(), target);

        timeout(self.timeout, self.request(text, target))
            .await
            .map_err(|_| TranslateError::Timeout(self.timeout))?
    }
}

/// Pull the translated text out of a `gtx` response.
///
/// The response is a nested array whose first element lists sentence
/// segments as `[translated, original, ...]`; the translation is the
/// concatenation of every segment's first field.
fn extract_translation(body: &serde_json::Value) -> Result<String, TranslateError> {
    let segments = body
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| TranslateError::InvalidResponse(truncate_for_log(body)))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|s| s.as_str()))
        .collect();

    if translated.trim().is_empty() {
        return Err(TranslateError::Empty);
    }

    Ok(translated)
}

fn truncate_for_log(body: &serde_json::Value) -> String {
    let text = body.to_string();
    match text.char_indices().nth(200) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn gtx_response(segments: &[(&str, &str)]) -> serde_json::Value {
        let segments: Vec<_> = segments
            .iter()
            .map(|(translated, original)| serde_json::json!([translated, original, null, null, 10]))
            .collect();
        serde_json::json!([segments, null, "en"])
    }

    fn translator_for(server: &MockServer, timeout: Duration) -> GoogleTranslator {
        GoogleTranslator::new(
            reqwest::Client::new(),
            format!("{}/translate_a/single", server.uri()),
            timeout,
        )
    }

    // ==================== Response Parsing Tests ====================

    #[test]
    fn test_extract_single_segment() {
        let body = gtx_response(&[("Привет", "Hello")]);
        assert_eq!(extract_translation(&body).unwrap(), "Привет");
    }

    #[test]
    fn test_extract_concatenates_segments() {
        let body = gtx_response(&[("Привет. ", "Hello. "), ("Как дела?", "How are you?")]);
        assert_eq!(extract_translation(&body).unwrap(), "Привет. Как дела?");
    }

    #[test]
    fn test_extract_skips_non_string_segments() {
        let body = serde_json::json!([[["Salom", "Hello"], [null, null, "Salom"]], null, "en"]);
        assert_eq!(extract_translation(&body).unwrap(), "Salom");
    }

    #[test]
    fn test_extract_invalid_shape() {
        let body = serde_json::json!({"error": "nope"});
        assert!(matches!(
            extract_translation(&body),
            Err(TranslateError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_extract_empty() {
        let body = serde_json::json!([[], null, "en"]);
        assert!(matches!(extract_translation(&body), Err(TranslateError::Empty)));
    }

    #[test]
    fn test_truncate_for_log_limits_length() {
        let body = serde_json::Value::String("x".repeat(500));
        let truncated = truncate_for_log(&body);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
    }

    // ==================== Integration Tests with Wiremock ====================

    #[tokio::test]
    async fn test_translate_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("client", "gtx"))
            .and(query_param("sl", "auto"))
            .and(query_param("tl", "ru"))
            .and(query_param("q", "Hello"))
            .respond_with(ResponseTemplate::new(200).set_body_json(gtx_response(&[("Привет", "Hello")])))
            .expect(1)
            .mount(&server)
            .await;

        let translator = translator_for(&server, Duration::from_secs(5));
        let result = translator
            .translate("Hello", Language::RUSSIAN)
            .await
            .expect("Should succeed");

        assert_eq!(result, "Привет");
    }

    #[tokio::test]
    async fn test_translate_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .mount(&server)
            .await;

        let translator = translator_for(&server, Duration::from_secs(5));
        let err = translator
            .translate("Hello", Language::RUSSIAN)
            .await
            .unwrap_err();

        match err {
            TranslateError::Api { status, body } => {
                assert_eq!(status, 429);
                assert!(body.contains("Too Many Requests"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_translate_malformed_json() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>captcha</html>"))
            .mount(&server)
            .await;

        let translator = translator_for(&server, Duration::from_secs(5));
        let err = translator
            .translate("Hello", Language::RUSSIAN)
            .await
            .unwrap_err();

        assert!(matches!(err, TranslateError::Http(_)));
    }

    #[tokio::test]
    async fn test_translate_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(gtx_response(&[("Привет", "Hello")]))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let translator = translator_for(&server, Duration::from_millis(100));
        let err = translator
            .translate("Hello", Language::RUSSIAN)
            .await
            .unwrap_err();

        assert!(matches!(err, TranslateError::Timeout(d) if d == Duration::from_millis(100)));
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_translate_unreachable_provider() {
        let translator = GoogleTranslator::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1/translate_a/single",
            Duration::from_secs(5),
        );

        let result = translator.translate("Hello", Language::RUSSIAN).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_translate_query_carries_source_and_target() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("tl", "uz"))
            .respond_with(ResponseTemplate::new(200).set_body_json(gtx_response(&[("Salom", "Hello")])))
            .mount(&server)
            .await;

        let translator = translator_for(&server, Duration::from_secs(5));
        let query = ParsedQuery {
            target: Language::UZBEK,
            payload: "Hello".to_string(),
            defaulted: false,
        };

        let result = translate_query(&translator, &query).await.unwrap();
        assert_eq!(
            result,
            TranslationResult {
                target: Language::UZBEK,
                source_text: "Hello".to_string(),
                translated_text: "Salom".to_string(),
            }
        );
    }
}
