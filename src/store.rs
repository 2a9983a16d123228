//! In-memory crash record store.
//!
//! Stands in for the persistence collaborator: it assigns ids and
//! `created_at` timestamps and answers history queries. Records live for
//! the lifetime of the process.

use crate::alerts::{CrashRecord, CrashReport};
use chrono::Utc;
use tokio::sync::RwLock;

/// Process-wide store of persisted crash records.
#[derive(Debug, Default)]
pub struct CrashStore {
    records: RwLock<Vec<CrashRecord>>,
}

impl CrashStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist a crash report, assigning the next sequential id and the
    /// server-clock `created_at`. Returns the stored record.
    pub async fn insert(&self, report: CrashReport) -> CrashRecord {
        let mut records = self.records.write().await;
        let record = CrashRecord {
            id: records.len() as i64 + 1,
            detection_timestamp: report.detection_timestamp,
            video_filename: report.video_filename,
            created_at: Utc::now(),
        };
        records.push(record.clone());
        record
    }

    /// Historical crash records, newest detection first.
    pub async fn history(&self, skip: usize, limit: usize) -> Vec<CrashRecord> {
        let records = self.records.read().await;
        let mut sorted: Vec<CrashRecord> = records.clone();
        sorted.sort_by(|a, b| b.detection_timestamp.cmp(&a.detection_timestamp));
        sorted.into_iter().skip(skip).take(limit).collect()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether no records have been stored yet.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
