//! Sync messages published on the in-process change feed
//!
//! Every successful mutation publishes a [`SyncPayload`] so that any
//! connected consumer (admin screens, future websocket bridge) can
//! reconcile its local copy with the authoritative server state instead
//! of assuming its own optimistic update succeeded.

use serde::{Deserialize, Serialize};

/// Resource change notification
///
/// `version` is a per-resource monotonically increasing counter so
/// consumers can detect stale or out-of-order notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncPayload {
    /// Resource type ("appointment", "subcategory", "inventory_product", ...)
    pub resource: String,
    /// Monotonic per-resource version
    pub version: u64,
    /// Change type ("created", "updated", "deleted")
    pub action: String,
    /// Resource ID
    pub id: String,
    /// Resource data (None for deletions)
    pub data: Option<serde_json::Value>,
}
