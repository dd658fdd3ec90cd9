//! Relay pipeline.
//!
//! One pass over the source:
//! 1. Fetch all records (a failed fetch or empty result ends the pass quietly)
//! 2. Extract assignment fields from each record
//! 3. Skip records already sent or lacking a send-task ID / Telegram ID
//! 4. Format, deliver, then record and persist the ID on confirmed delivery

use penugasan_common::types::{Notifier, Record, RecordSource};
use penugasan_decoders::Assignment;

use crate::formatter::format_message;
use crate::sent_store::SentStore;

/// What happened to a single record during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Delivered,
    AlreadySent,
    MissingRecipient,
    Failed,
}

/// Counters for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: usize,
    pub delivered: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Drives records from a `RecordSource` to a `Notifier`, deduplicated by a `SentStore`.
pub struct Relay<S, N> {
    source: S,
    notifier: N,
    store: SentStore,
}

impl<S: RecordSource, N: Notifier> Relay<S, N> {
    pub fn new(source: S, notifier: N, store: SentStore) -> Self {
        Self {
            source,
            notifier,
            store,
        }
    }

    /// Run one full pass. Never fails: every error is logged and counted.
    pub async fn run(&mut self) -> RunSummary {
        let mut summary = RunSummary::default();

        let records = match self.source.fetch_records().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching records, nothing to send");
                return summary;
            }
        };

        if records.is_empty() {
            tracing::info!("No data found.");
            return summary;
        }

        summary.fetched = records.len();

        for record in &records {
            match self.process_record(record).await {
                Outcome::Delivered => summary.delivered += 1,
                Outcome::AlreadySent | Outcome::MissingRecipient => summary.skipped += 1,
                Outcome::Failed => summary.failed += 1,
            }
        }

        tracing::info!(
            fetched = summary.fetched,
            delivered = summary.delivered,
            skipped = summary.skipped,
            failed = summary.failed,
            "Processing completed."
        );

        summary
    }

    /// Process one record through eligibility, delivery and persistence.
    pub async fn process_record(&mut self, record: &Record) -> Outcome {
        if self.store.contains(&record.id) {
            tracing::debug!(record_id = %record.id, "Already sent, skipping");
            return Outcome::AlreadySent;
        }

        let assignment = Assignment::from_record(record);
        if !assignment.is_deliverable() {
            tracing::debug!(
                record_id = %record.id,
                "Missing send-task ID or Telegram ID, skipping"
            );
            return Outcome::MissingRecipient;
        }

        let message = format_message(&assignment);

        if let Err(e) = self.notifier.send(&assignment.telegram_id, &message).await {
            tracing::error!(
                record_id = %record.id,
                chat_id = %assignment.telegram_id,
                error = %e,
                "Error sending message"
            );
            return Outcome::Failed;
        }

        // Only a confirmed delivery is recorded, so failures are retried next run.
        self.store.insert(record.id.clone());
        if let Err(e) = self.store.save() {
            tracing::error!(
                record_id = %record.id,
                path = %self.store.path().display(),
                error = %e,
                "Failed to persist sent IDs"
            );
        }

        Outcome::Delivered
    }

    pub fn store(&self) -> &SentStore {
        &self.store
    }
}
