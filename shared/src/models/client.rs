//! Client model

use serde::{Deserialize, Serialize};

/// Client entity (客户)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create client payload (inline creation during booking)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCreate {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

/// Minimal client record returned by phone search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ClientSummary {
    pub id: i64,
    pub name: String,
}
