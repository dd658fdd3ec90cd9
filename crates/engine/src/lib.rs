pub mod formatter;
pub mod processor;
pub mod sent_store;

pub use formatter::format_message;
pub use processor::{Outcome, Relay, RunSummary};
pub use sent_store::SentStore;
