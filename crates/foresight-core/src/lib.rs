pub mod analysis;
pub mod config;
pub mod error;
pub mod generation;
pub mod persona;
pub mod record;
pub mod secret;

// Re-export common error type
pub use error::{ForesightError, Result};
