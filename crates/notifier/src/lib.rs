//! Message delivery channels.
//!
//! Only Telegram is implemented. Delivery is a single attempt; callers decide
//! what a failure means for the record being sent.

pub mod telegram;

pub use telegram::TelegramNotifier;
