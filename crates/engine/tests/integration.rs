//! Integration tests for the relay pipeline.
//!
//! The source and notifier are in-memory fakes; the sent-ID file is a real
//! file in a temporary directory.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use penugasan_common::error::{AppError, AppResult};
use penugasan_common::types::{Notifier, PropertyValue, Record, RecordSource, TextFragment};
use penugasan_engine::{Outcome, Relay, RunSummary, SentStore};

// ============================================================
// Shared helpers
// ============================================================

struct FakeSource {
    records: Option<Vec<Record>>,
}

impl FakeSource {
    fn with(records: Vec<Record>) -> Self {
        Self {
            records: Some(records),
        }
    }

    fn failing() -> Self {
        Self { records: None }
    }
}

#[async_trait]
impl RecordSource for FakeSource {
    async fn fetch_records(&self) -> AppResult<Vec<Record>> {
        self.records
            .clone()
            .ok_or_else(|| AppError::Source("connection refused".to_string()))
    }
}

/// (chat_id, message) for every attempted delivery.
type Sent = Arc<Mutex<Vec<(String, String)>>>;

#[derive(Default)]
struct FakeNotifier {
    sent: Sent,
    failing_chats: HashSet<String>,
}

impl FakeNotifier {
    fn failing_for(chat_id: &str) -> Self {
        Self {
            failing_chats: HashSet::from([chat_id.to_string()]),
            ..Default::default()
        }
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn send(&self, chat_id: &str, message: &str) -> AppResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((chat_id.to_string(), message.to_string()));
        if self.failing_chats.contains(chat_id) {
            return Err(AppError::Delivery("chat not found".to_string()));
        }
        Ok(())
    }
}

fn text(value: &str) -> PropertyValue {
    PropertyValue::RichText {
        rich_text: vec![TextFragment::new(value)],
    }
}

fn assignment(id: &str, send_task_id: &str, chat_id: &str) -> Record {
    Record::new(id)
        .with_property("ID Kirim Tugas", text(send_task_id))
        .with_property("ID Telegram (As)", text(chat_id))
        .with_property(
            "Activities Name",
            PropertyValue::Title {
                title: vec![TextFragment::new("Pengecoran Lantai 2")],
            },
        )
}

fn read_ids(path: &Path) -> Vec<String> {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

async fn run_once(source: FakeSource, notifier: FakeNotifier, path: &Path) -> (RunSummary, Sent) {
    let sent = notifier.sent.clone();
    let store = SentStore::load(path).unwrap();
    let mut relay = Relay::new(source, notifier, store);
    let summary = relay.run().await;
    (summary, sent)
}

// ============================================================
// Tests
// ============================================================

#[tokio::test]
async fn test_new_record_is_delivered_and_recorded() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("id_sent.json");

    let source = FakeSource::with(vec![assignment("rec_1", "T1", "123456")]);
    let (summary, sent) = run_once(source, FakeNotifier::default(), &path).await;

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "123456");
    assert!(sent[0].1.contains("*PENUGASAN*"));
    assert!(sent[0].1.contains("Pengecoran Lantai 2"));

    assert_eq!(read_ids(&path), vec!["rec_1"]);
    assert_eq!(
        summary,
        RunSummary {
            fetched: 1,
            delivered: 1,
            skipped: 0,
            failed: 0
        }
    );
}

#[tokio::test]
async fn test_already_sent_record_is_skipped_and_file_unchanged() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("id_sent.json");
    std::fs::write(&path, "[\"rec_1\"]").unwrap();

    let source = FakeSource::with(vec![assignment("rec_1", "T1", "123456")]);
    let (summary, sent) = run_once(source, FakeNotifier::default(), &path).await;

    assert!(sent.lock().unwrap().is_empty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[\"rec_1\"]");
    assert_eq!(summary.skipped, 1);
}

#[tokio::test]
async fn test_second_run_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("id_sent.json");
    let records = vec![
        assignment("rec_1", "T1", "111"),
        assignment("rec_2", "T2", "222"),
    ];

    let (first, _) = run_once(FakeSource::with(records.clone()), FakeNotifier::default(), &path).await;
    assert_eq!(first.delivered, 2);

    let (second, sent) = run_once(FakeSource::with(records), FakeNotifier::default(), &path).await;
    assert_eq!(second.delivered, 0);
    assert_eq!(second.skipped, 2);
    assert!(sent.lock().unwrap().is_empty());
    assert_eq!(read_ids(&path), vec!["rec_1", "rec_2"]);
}

#[tokio::test]
async fn test_missing_recipient_fields_are_not_sent_or_recorded() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("id_sent.json");

    let no_task = Record::new("rec_a").with_property("ID Telegram (As)", text("111"));
    let no_chat = Record::new("rec_b").with_property("ID Kirim Tugas", text("T2"));
    let empty_chat = Record::new("rec_c")
        .with_property("ID Kirim Tugas", text("T3"))
        .with_property(
            "ID Telegram (As)",
            PropertyValue::RichText { rich_text: vec![] },
        );

    let mention_chat = Record::new("rec_d")
        .with_property("ID Kirim Tugas", text("T4"))
        .with_property(
            "ID Telegram (As)",
            PropertyValue::RichText {
                rich_text: vec![TextFragment::default()],
            },
        );

    let source = FakeSource::with(vec![no_task, no_chat, empty_chat, mention_chat]);
    let (summary, sent) = run_once(source, FakeNotifier::default(), &path).await;

    assert!(sent.lock().unwrap().is_empty());
    assert!(!path.exists());
    assert_eq!(summary.skipped, 4);
}

#[tokio::test]
async fn test_failed_delivery_is_not_recorded_and_loop_continues() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("id_sent.json");

    let source = FakeSource::with(vec![
        assignment("rec_1", "T1", "404"),
        assignment("rec_2", "T2", "222"),
    ]);
    let (summary, sent) = run_once(source, FakeNotifier::failing_for("404"), &path).await;

    assert_eq!(sent.lock().unwrap().len(), 2);
    assert_eq!(read_ids(&path), vec!["rec_2"]);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.delivered, 1);

    // The failed record is retried on the next run.
    let source = FakeSource::with(vec![
        assignment("rec_1", "T1", "404"),
        assignment("rec_2", "T2", "222"),
    ]);
    let (summary, sent) = run_once(source, FakeNotifier::default(), &path).await;
    assert_eq!(summary.delivered, 1);
    assert_eq!(sent.lock().unwrap()[0].0, "404");
    assert_eq!(read_ids(&path), vec!["rec_2", "rec_1"]);
}

#[tokio::test]
async fn test_source_failure_sends_nothing() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("id_sent.json");

    let (summary, sent) = run_once(FakeSource::failing(), FakeNotifier::default(), &path).await;

    assert_eq!(summary, RunSummary::default());
    assert!(sent.lock().unwrap().is_empty());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_empty_source_sends_nothing() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("id_sent.json");

    let (summary, sent) = run_once(FakeSource::with(vec![]), FakeNotifier::default(), &path).await;

    assert_eq!(summary, RunSummary::default());
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_records_delivered_in_source_order() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("id_sent.json");

    let source = FakeSource::with(vec![
        assignment("rec_3", "T3", "333"),
        assignment("rec_1", "T1", "111"),
        assignment("rec_2", "T2", "222"),
    ]);
    let (_, sent) = run_once(source, FakeNotifier::default(), &path).await;

    let chats: Vec<String> = sent.lock().unwrap().iter().map(|(c, _)| c.clone()).collect();
    assert_eq!(chats, vec!["333", "111", "222"]);
    assert_eq!(read_ids(&path), vec!["rec_3", "rec_1", "rec_2"]);
}

#[tokio::test]
async fn test_save_failure_still_dedupes_within_run() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();
    let path = blocker.join("id_sent.json");

    let notifier = FakeNotifier::default();
    let sent = notifier.sent.clone();
    let mut relay = Relay::new(
        FakeSource::with(vec![]),
        notifier,
        SentStore::empty(&path),
    );

    let record = assignment("rec_1", "T1", "111");
    assert_eq!(relay.process_record(&record).await, Outcome::Delivered);
    assert_eq!(relay.process_record(&record).await, Outcome::AlreadySent);

    assert_eq!(sent.lock().unwrap().len(), 1);
    assert!(relay.store().contains("rec_1"));
    assert!(!path.exists());
}
