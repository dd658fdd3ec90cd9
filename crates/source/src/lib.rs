//! Record source backed by a Notion database query.

pub mod notion;

pub use notion::NotionClient;
