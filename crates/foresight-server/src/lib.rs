//! HTTP surface of Foresight.
//!
//! # Module Structure
//!
//! - `app`: Settings resolution, service construction and router state
//! - `routes`: The axum router and its handlers
//! - `error`: Mapping of service errors to HTTP responses

pub mod app;
pub mod error;
pub mod routes;

pub use app::AppState;
pub use error::ApiError;
pub use routes::router;
