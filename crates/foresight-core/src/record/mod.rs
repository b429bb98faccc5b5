//! Stored record domain module.
//!
//! Records are what the pipeline leaves behind when a request carries a user
//! id. They are written once and never updated or deleted.
//!
//! # Module Structure
//!
//! - `model`: `StoredRecord`, its payloads and kinds
//! - `repository`: Repository trait for record persistence

mod model;
mod repository;

// Re-export public API
pub use model::{ChatSender, RecordKind, RecordPayload, StoredRecord};
pub use repository::RecordRepository;
