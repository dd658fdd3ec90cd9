//! Decoding of Notion database pages into typed records, and extraction of
//! display-ready assignment fields from them.

pub mod assignment;
pub mod datetime;
pub mod extract;
pub mod property;


pub use assignment::Assignment;
pub use property::{decode_page, decode_property};
