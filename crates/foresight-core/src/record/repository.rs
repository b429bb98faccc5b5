//! Record repository trait.
//!
//! Defines the interface for record persistence operations.

use super::model::{RecordKind, RecordPayload, StoredRecord};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for pipeline results.
///
/// This trait decouples the analysis pipeline from the concrete store
/// (in-memory map, JSON files, a document database).
///
/// # Implementation Notes
///
/// Implementations should handle:
/// - Id generation (use [`StoredRecord::new`])
/// - Concurrent writers from independent requests
/// - Stable chronological ordering for chat history
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Stores a new record for a user.
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The id of the created record
    /// - `Err(_)`: Error occurred during the write
    async fn put(&self, user_id: &str, payload: RecordPayload) -> Result<String>;

    /// Finds a record by kind and id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(StoredRecord))`: Record found
    /// - `Ok(None)`: No record of that kind has this id
    /// - `Err(_)`: Error occurred during retrieval
    async fn get(&self, kind: RecordKind, id: &str) -> Result<Option<StoredRecord>>;

    /// Lists a user's chat messages, oldest first.
    async fn list_chat_by_user(&self, user_id: &str) -> Result<Vec<StoredRecord>>;
}
