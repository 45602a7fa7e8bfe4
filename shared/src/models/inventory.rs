//! Inventory models (POS side)

use serde::{Deserialize, Serialize};

/// Inventory product
///
/// Created by the external valuation/intake process; this workflow only
/// mutates `quantity`. The `valuation` column is an opaque JSON payload
/// (condition, pricing tiers) owned by the valuation subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InventoryProduct {
    pub id: i64,
    pub sku: String,
    pub description: String,
    pub quantity: i64,
    pub location: Option<String>,
    pub final_sale_price: f64,
    pub category_name: String,
    pub subcategory_name: String,
    /// Opaque valuation metadata, stored as JSON text
    pub valuation: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Operator-initiated quantity correction payload
///
/// `quantity` is the new absolute quantity, not a delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantityAdjust {
    pub quantity: i64,
    pub reason: Option<String>,
}

/// Audit row recorded for every quantity correction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InventoryAdjustment {
    pub id: i64,
    pub product_id: i64,
    pub old_quantity: i64,
    pub new_quantity: i64,
    pub reason: Option<String>,
    pub operator_id: String,
    pub operator_name: String,
    pub created_at: i64,
}
