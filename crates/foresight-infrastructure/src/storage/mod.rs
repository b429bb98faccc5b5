//! Low-level file storage helpers.

pub mod atomic_json;

pub use atomic_json::AtomicJsonFile;
