//! Agent service API
//!
//! Contains the HTTP client, the typed wire payloads, and the error type for
//! every service operation.

pub mod client;
pub mod error;
pub mod payload;

pub use client::AgentClient;
pub use error::{ApiError, ApiResult};
