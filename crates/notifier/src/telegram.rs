use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use penugasan_common::config::AppConfig;
use penugasan_common::error::{AppError, AppResult};
use penugasan_common::types::Notifier;

/// Telegram's legacy Markdown mode; the message template uses `*bold*` labels.
pub const PARSE_MODE: &str = "Markdown";

/// JSON body of a `sendMessage` call.
#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
    pub parse_mode: &'a str,
}

/// Envelope every Bot API response is wrapped in.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Delivers messages through the Telegram Bot API.
pub struct TelegramNotifier {
    client: Client,
    api_url: String,
    bot_token: String,
}

impl TelegramNotifier {
    pub fn new(client: Client, api_url: impl Into<String>, bot_token: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            bot_token: bot_token.into(),
        }
    }

    pub fn from_config(client: Client, config: &AppConfig) -> Self {
        Self::new(
            client,
            config.telegram_api_url.clone(),
            config.telegram_bot_token.clone(),
        )
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_url.trim_end_matches('/'),
            self.bot_token
        )
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, chat_id: &str, message: &str) -> AppResult<()> {
        let request = SendMessageRequest {
            chat_id,
            text: message,
            parse_mode: PARSE_MODE,
        };

        // The URL embeds the bot token, so it is stripped from transport errors.
        let response = self
            .client
            .post(self.send_message_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Delivery(format!("Request failed: {}", e.without_url())))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<ApiResponse>(&body).ok();

        if !status.is_success() {
            let detail = parsed
                .and_then(|r| r.description)
                .unwrap_or(body);
            return Err(AppError::Delivery(format!("Telegram returned {status}: {detail}")));
        }

        match parsed {
            Some(ApiResponse { ok: true, .. }) => {
                tracing::info!(chat_id, "Message sent to Telegram");
                Ok(())
            }
            Some(ApiResponse { description, .. }) => Err(AppError::Delivery(format!(
                "Telegram rejected message: {}",
                description.unwrap_or_else(|| "no description".to_string())
            ))),
            None => Err(AppError::Delivery(format!(
                "Unexpected Telegram response: {body}"
            ))),
        }
    }
}
