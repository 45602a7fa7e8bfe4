//! Admin note model

use serde::{Deserialize, Serialize};

/// Single process-wide free-text note
///
/// Publicly readable, writable only by staff. Upsert-only: the table holds
/// exactly one row and no history is retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AdminNote {
    pub note: String,
    pub updated_at: i64,
}

/// Update payload for the admin note
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminNoteUpdate {
    pub note: String,
}
