//! Shared types for the Peque platform
//!
//! Common types used across multiple crates including error types,
//! response structures, domain models and sync payloads.

pub mod error;
pub mod message;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use message::SyncPayload;
