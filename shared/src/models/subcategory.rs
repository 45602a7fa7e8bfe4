//! Subcategory model

use serde::{Deserialize, Serialize};

/// Product classification unit used by the intake wizard
///
/// `purchasing_enabled` is an admin toggle: when false, no new booking may
/// reference this subcategory. Historical appointment items are unaffected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Subcategory {
    pub id: i64,
    pub name: String,
    /// Denormalized parent category name
    pub category_name: String,
    pub is_clothing: bool,
    pub purchasing_enabled: bool,
    pub created_at: i64,
    pub updated_at: i64,
}
