use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

// Telegram update types
#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub inline_query: Option<InlineQuery>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: String,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(default, rename = "type")]
    pub chat_type: String,
}

#[derive(Debug, Deserialize)]
pub struct InlineQuery {
    pub id: String,
    pub from: User,
    pub query: String,
    #[serde(default)]
    pub offset: String,
}

/// Envelope every Bot API method responds with.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// One selectable inline result (`InlineQueryResultArticle`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineQueryResult {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub input_message_content: InputTextMessageContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputTextMessageContent {
    pub message_text: String,
}

impl InlineQueryResult {
    /// Build an article result with a fresh random id.
    pub fn article(
        title: impl Into<String>,
        description: impl Into<String>,
        message_text: impl Into<String>,
    ) -> Self {
        Self {
            kind: "article",
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: Some(description.into()),
            input_message_content: InputTextMessageContent {
                message_text: message_text.into(),
            },
            thumbnail_url: None,
        }
    }

    pub fn with_thumbnail(mut self, url: &str) -> Self {
        self.thumbnail_url = Some(url.to_string());
        self
    }

    pub fn message_text(&self) -> &str {
        &self.input_message_content.message_text
    }
}

#[derive(Debug, Serialize)]
struct GetUpdatesRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u64,
    allowed_updates: &'a [&'a str],
}

#[derive(Debug, Serialize)]
struct AnswerInlineQueryRequest<'a> {
    inline_query_id: &'a str,
    results: &'a [InlineQueryResult],
    cache_time: u32,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
}

/// Upper bound on every Bot API call except `getUpdates`
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Slack added to the long-poll timeout for the `getUpdates` HTTP request
const POLL_SLACK_SECS: u64 = 10;

/// Minimal Telegram Bot API client.
#[derive(Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
}

impl TelegramClient {
    /// # Arguments
    /// * `api_url` - Bot API root, normally `https://api.telegram.org`
    /// * `bot_token` - Token issued by @BotFather
    pub fn new(client: reqwest::Client, api_url: &str, bot_token: &str) -> Self {
        Self {
            client,
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), bot_token),
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    /// Override [`REQUEST_TIMEOUT`] for calls other than `getUpdates`.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Call a Bot API method and unwrap its `{ok, result}` envelope.
    ///
    /// The error never includes the request URL, which carries the token.
    async fn call<B, T>(&self, method: &str, body: &B, timeout: Duration) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, method))
            .json(body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| e.without_url())
            .with_context(|| format!("Failed to send {} request to Telegram API", method))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| e.without_url())
            .with_context(|| format!("Failed to read {} response from Telegram API", method))?;

        let envelope: ApiResponse<T> = serde_json::from_str(&text).with_context(|| {
            format!("Telegram API error ({}) on {}: {}", status, method, text)
        })?;

        if !envelope.ok {
            anyhow::bail!(
                "Telegram API error ({}) on {}: {}",
                status,
                method,
                envelope.description.unwrap_or_default()
            );
        }

        envelope
            .result
            .with_context(|| format!("Telegram API returned no result for {}", method))
    }

    /// Long-poll for new updates.
    ///
    /// # Arguments
    /// * `offset` - First update id to return; acknowledges everything before it
    /// * `timeout_secs` - How long Telegram may hold the request open
    pub async fn get_updates(&self, offset: Option<i64>, timeout_secs: u64) -> Result<Vec<Update>> {
        let request = GetUpdatesRequest {
            offset,
            timeout: timeout_secs,
            allowed_updates: &["message", "inline_query"],
        };

        // Leave the HTTP timeout some slack over the long-poll timeout
        let http_timeout = Duration::from_secs(timeout_secs.saturating_add(POLL_SLACK_SECS));
        self.call("getUpdates", &request, http_timeout).await
    }

    /// Answer an inline query. Results are never cached by Telegram.
    pub async fn answer_inline_query(
        &self,
        inline_query_id: &str,
        results: &[InlineQueryResult],
    ) -> Result<()> {
        let request = AnswerInlineQueryRequest {
            inline_query_id,
            results,
            cache_time: 0,
        };

        let _: bool = self
            .call("answerInlineQuery", &request, self.request_timeout)
            .await?;
        Ok(())
    }

    /// Send an HTML-formatted message to a chat.
    pub async fn send_html(&self, chat_id: i64, text: &str) -> Result<()> {
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode: "HTML",
            disable_web_page_preview: true,
        };

        let _: serde_json::Value = self
            .call("sendMessage", &request, self.request_timeout)
            .await?;
        Ok(())
    }

    /// Username of the bot itself (without '@').
    pub async fn get_me(&self) -> Result<String> {
        let me: User = self
            .call("getMe", &serde_json::json!({}), self.request_timeout)
            .await?;
        me.username
            .context("Telegram getMe returned a bot without a username")
    }
}
