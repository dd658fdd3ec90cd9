use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// Placeholder emitted for any field that is absent or malformed.
pub const NO_DATA: &str = "Tidak ada data";

/// A single text run inside a rich-text or title property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    pub plain_text: Option<String>,
}

impl TextFragment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            plain_text: Some(text.into()),
        }
    }
}

/// Payload of a date property or a date-typed formula result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateValue {
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// Computed result of a formula property, tagged by its declared result type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulaResult {
    String {
        #[serde(default)]
        string: Option<String>,
    },
    Number {
        #[serde(default)]
        number: Option<serde_json::Number>,
    },
    Boolean {
        #[serde(default)]
        boolean: Option<bool>,
    },
    Date {
        #[serde(default)]
        date: Option<DateValue>,
    },
}

/// A Notion page property, decoded once from its `type`-tagged JSON form.
///
/// Property kinds the relay never reads collapse into `Unsupported`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    RichText {
        #[serde(default)]
        rich_text: Vec<TextFragment>,
    },
    Title {
        #[serde(default)]
        title: Vec<TextFragment>,
    },
    Date {
        #[serde(default)]
        date: Option<DateValue>,
    },
    Number {
        #[serde(default)]
        number: Option<serde_json::Number>,
    },
    Formula {
        #[serde(default)]
        formula: Option<FormulaResult>,
    },
    #[serde(other)]
    Unsupported,
}

/// One task-assignment page fetched from the source database.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub properties: HashMap<String, PropertyValue>,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            properties: HashMap::new(),
        }
    }

    /// Builder-style helper, mostly for tests and fakes.
    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }
}

/// Anything that can produce the current batch of assignment records.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch all records visible in a single query. Failures are never partial.
    async fn fetch_records(&self) -> AppResult<Vec<Record>>;
}

/// A channel that delivers a rendered message to one recipient.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `message` to `chat_id`. `Ok` means the endpoint confirmed receipt.
    async fn send(&self, chat_id: &str, message: &str) -> AppResult<()>;
}
