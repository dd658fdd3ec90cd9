use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use penugasan_common::config::AppConfig;
use penugasan_common::error::{AppError, AppResult};
use penugasan_common::types::{Record, RecordSource};
use penugasan_decoders::decode_page;

/// API version pinned in the `Notion-Version` header.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Raw body of a database query response.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Reads assignment pages from one Notion database.
///
/// Each fetch is a single unfiltered query; only the first page of results is
/// returned.
pub struct NotionClient {
    client: Client,
    api_url: String,
    database_id: String,
    api_key: String,
}

impl NotionClient {
    pub fn new(
        client: Client,
        api_url: impl Into<String>,
        database_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            database_id: database_id.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(client: Client, config: &AppConfig) -> Self {
        Self::new(
            client,
            config.notion_api_url.clone(),
            config.notion_database_id.clone(),
            config.notion_api_key.clone(),
        )
    }

    fn query_url(&self) -> String {
        format!(
            "{}/v1/databases/{}/query",
            self.api_url.trim_end_matches('/'),
            self.database_id
        )
    }

    /// Run the database query and return the undecoded response.
    pub async fn query_database(&self) -> AppResult<QueryResponse> {
        let response = self
            .client
            .post(self.query_url())
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(&json!({}))
            .send()
            .await
            .map_err(|e| AppError::Source(format!("Notion request failed: {e}")))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(AppError::Source(format!(
                "Notion returned {status}: {body}"
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| AppError::Source(format!("Failed to parse Notion response: {e}")))
    }
}

#[async_trait]
impl RecordSource for NotionClient {
    async fn fetch_records(&self) -> AppResult<Vec<Record>> {
        let response = self.query_database().await?;

        if response.has_more {
            tracing::warn!(
                next_cursor = response.next_cursor.as_deref().unwrap_or_default(),
                "Notion reported more results; only the first page is processed"
            );
        }

        let total = response.results.len();
        let records: Vec<Record> = response.results.into_iter().filter_map(decode_page).collect();

        tracing::debug!(
            database_id = %self.database_id,
            pages = total,
            records = records.len(),
            "Fetched Notion records"
        );

        Ok(records)
    }
}
