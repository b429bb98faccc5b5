//! JSON directory RecordRepository implementation.

use crate::storage::AtomicJsonFile;
use async_trait::async_trait;
use foresight_core::error::{ForesightError, Result};
use foresight_core::record::{RecordKind, RecordPayload, RecordRepository, StoredRecord};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Record store keeping one pretty-printed JSON file per record.
///
/// Directory structure:
/// ```text
/// base_dir/
/// ├── startup_analysis/
/// │   └── <uuid>.json
/// ├── design_roast/
/// │   └── <uuid>.json
/// └── chat_message/
///     └── <uuid>.json
/// ```
pub struct JsonDirRecordRepository {
    base_dir: PathBuf,
}

impl JsonDirRecordRepository {
    /// Creates the repository rooted at `base_dir`, creating it if needed.
    pub async fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        tokio::fs::create_dir_all(&base_dir).await.map_err(|e| {
            ForesightError::io(format!(
                "Failed to create record storage at {}: {}",
                base_dir.display(),
                e
            ))
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn kind_dir(&self, kind: RecordKind) -> PathBuf {
        self.base_dir.join(kind.as_ref())
    }

    fn record_file(&self, kind: RecordKind, id: &Uuid) -> AtomicJsonFile<StoredRecord> {
        AtomicJsonFile::new(self.kind_dir(kind).join(format!("{id}.json")))
    }
}

#[async_trait]
impl RecordRepository for JsonDirRecordRepository {
    async fn put(&self, user_id: &str, payload: RecordPayload) -> Result<String> {
        let record = StoredRecord::new(user_id, payload);
        let uuid = Uuid::parse_str(&record.id)
            .map_err(|e| ForesightError::internal(format!("Generated invalid record id: {e}")))?;

        self.record_file(record.kind(), &uuid)
            .save(&record)
            .await
            .map_err(|e| ForesightError::data_access(format!("Failed to save record: {e}")))?;

        Ok(record.id)
    }

    async fn get(&self, kind: RecordKind, id: &str) -> Result<Option<StoredRecord>> {
        // Anything that is not a UUID cannot name a record file
        let Ok(uuid) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        self.record_file(kind, &uuid)
            .load()
            .await
            .map_err(|e| ForesightError::data_access(format!("Failed to load record {id}: {e}")))
    }

    async fn list_chat_by_user(&self, user_id: &str) -> Result<Vec<StoredRecord>> {
        let dir = self.kind_dir(RecordKind::ChatMessage);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ForesightError::data_access(format!("Failed to list chat messages: {e}"))),
        };

        let mut messages = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            match AtomicJsonFile::<StoredRecord>::new(&path).load().await {
                Ok(Some(record)) if record.user_id == user_id => messages.push(record),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(
                        "[JsonDirRecordRepository] Skipping unreadable record {}: {}",
                        path.display(),
                        e
                    );
                }
            }
        }

        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use foresight_core::analysis::StartupAnalysis;
    use foresight_core::record::ChatSender;
    use tempfile::TempDir;

    async fn create_test_repository() -> (JsonDirRecordRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonDirRecordRepository::new(temp_dir.path().join("records"))
            .await
            .unwrap();
        (repo, temp_dir)
    }

    fn startup_payload() -> RecordPayload {
        RecordPayload::StartupAnalysis {
            idea: "Drone dog walking".to_string(),
            result: StartupAnalysis {
                analysis: "Niche but fun.".to_string(),
                market_fit: 42,
                tech_stack: vec!["Rust".to_string()],
                competitors: vec!["Rover".to_string()],
                emoji: "🤔".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_put_and_get_roundtrip() {
        let (repo, _temp_dir) = create_test_repository().await;

        let id = repo.put("user-1", startup_payload()).await.unwrap();
        let found = repo
            .get(RecordKind::StartupAnalysis, &id)
            .await
            .unwrap()
            .expect("record should exist");

        assert_eq!(found.payload, startup_payload());
        assert!(repo.base_dir().join("startup_analysis").join(format!("{id}.json")).exists());
    }

    #[tokio::test]
    async fn test_get_rejects_wrong_kind_and_non_uuid_ids() {
        let (repo, _temp_dir) = create_test_repository().await;
        let id = repo.put("user-1", startup_payload()).await.unwrap();

        assert!(repo.get(RecordKind::DesignRoast, &id).await.unwrap().is_none());
        assert!(repo.get(RecordKind::StartupAnalysis, "../secret").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_chat_history_sorted_by_created_at() {
        let (repo, _temp_dir) = create_test_repository().await;

        // Write records with explicit timestamps out of order
        let now = Utc::now();
        for (offset, text) in [(2, "third"), (0, "first"), (1, "second")] {
            let mut record = StoredRecord::new(
                "user-1",
                RecordPayload::ChatMessage {
                    sender: ChatSender::User,
                    message: text.to_string(),
                },
            );
            record.created_at = now + Duration::seconds(offset);
            let uuid = Uuid::parse_str(&record.id).unwrap();
            repo.record_file(RecordKind::ChatMessage, &uuid)
                .save(&record)
                .await
                .unwrap();
        }
        repo.put(
            "user-2",
            RecordPayload::ChatMessage {
                sender: ChatSender::Past,
                message: "someone else".to_string(),
            },
        )
        .await
        .unwrap();

        let history = repo.list_chat_by_user("user-1").await.unwrap();
        let texts: Vec<_> = history
            .iter()
            .map(|record| match &record.payload {
                RecordPayload::ChatMessage { message, .. } => message.clone(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_empty_store_has_no_history() {
        let (repo, _temp_dir) = create_test_repository().await;
        assert!(repo.list_chat_by_user("nobody").await.unwrap().is_empty());
    }
}
