use std::fmt;
use std::path::PathBuf;

/// Default location of the sent-ID file, relative to the working directory.
pub const DEFAULT_SENT_IDS_FILE: &str = "id_sent.json";
pub const DEFAULT_NOTION_API_URL: &str = "https://api.notion.com";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Application configuration loaded once at process start.
#[derive(Clone)]
pub struct AppConfig {
    /// Notion database holding the assignment pages
    pub notion_database_id: String,

    /// Notion integration secret
    pub notion_api_key: String,

    /// Telegram bot token used for `sendMessage`
    pub telegram_bot_token: String,

    /// JSON file listing page IDs that were already delivered
    pub sent_ids_file: PathBuf,

    /// Base URL of the Notion API (overridable for testing)
    pub notion_api_url: String,

    /// Base URL of the Telegram Bot API (overridable for testing)
    pub telegram_api_url: String,

    /// Per-request timeout for outbound HTTP calls, in seconds (default: 30)
    pub http_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables, reading `.env` first if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| anyhow::anyhow!("{key} environment variable is required"))
        };

        Ok(Self {
            notion_database_id: require("NOTION_DATABASE_ID")?,
            notion_api_key: require("NOTION_API_KEY")?,
            telegram_bot_token: require("TELEGRAM_BOT_TOKEN")?,
            sent_ids_file: get("SENT_IDS_FILE")
                .unwrap_or_else(|| DEFAULT_SENT_IDS_FILE.to_string())
                .into(),
            notion_api_url: get("NOTION_API_URL")
                .unwrap_or_else(|| DEFAULT_NOTION_API_URL.to_string()),
            telegram_api_url: get("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            http_timeout_secs: get("HTTP_TIMEOUT_SECS")
                .map(|v| v.trim().parse())
                .transpose()
                .map_err(|_| anyhow::anyhow!("HTTP_TIMEOUT_SECS must be a valid u64"))?
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
        })
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("notion_database_id", &self.notion_database_id)
            .field("notion_api_key", &"<redacted>")
            .field("telegram_bot_token", &"<redacted>")
            .field("sent_ids_file", &self.sent_ids_file)
            .field("notion_api_url", &self.notion_api_url)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}
