//! In-memory RecordRepository implementation.

use async_trait::async_trait;
use foresight_core::error::Result;
use foresight_core::record::{RecordKind, RecordPayload, RecordRepository, StoredRecord};
use tokio::sync::RwLock;

/// Record store that lives for the duration of the process.
///
/// Records are kept in insertion order, which also serves as the tie-breaker
/// for chat messages created within the same instant.
#[derive(Default)]
pub struct InMemoryRecordRepository {
    records: RwLock<Vec<StoredRecord>>,
}

impl InMemoryRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all kinds.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Snapshot of every record, in insertion order.
    pub async fn list_all(&self) -> Vec<StoredRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepository {
    async fn put(&self, user_id: &str, payload: RecordPayload) -> Result<String> {
        let record = StoredRecord::new(user_id, payload);
        let id = record.id.clone();
        self.records.write().await.push(record);
        Ok(id)
    }

    async fn get(&self, kind: RecordKind, id: &str) -> Result<Option<StoredRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|record| record.id == id && record.kind() == kind)
            .cloned())
    }

    async fn list_chat_by_user(&self, user_id: &str) -> Result<Vec<StoredRecord>> {
        let mut messages: Vec<StoredRecord> = self
            .records
            .read()
            .await
            .iter()
            .filter(|record| record.kind() == RecordKind::ChatMessage && record.user_id == user_id)
            .cloned()
            .collect();

        // Stable sort keeps insertion order for equal timestamps
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }
}
