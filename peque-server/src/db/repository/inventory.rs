//! Inventory Repository

use super::{RepoError, RepoResult};
use shared::models::{InventoryAdjustment, InventoryProduct};
use sqlx::SqlitePool;

const PRODUCT_SELECT: &str = "SELECT id, sku, description, quantity, location, final_sale_price, category_name, subcategory_name, valuation, created_at, updated_at FROM inventory_product";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<InventoryProduct>> {
    let sql = format!("{} ORDER BY created_at DESC", PRODUCT_SELECT);
    let rows = sqlx::query_as::<_, InventoryProduct>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<InventoryProduct>> {
    let sql = format!("{} WHERE id = ?", PRODUCT_SELECT);
    let row = sqlx::query_as::<_, InventoryProduct>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// 调整商品数量 (绝对值，不是增量)，同事务写入审计记录
///
/// 非负校验在处理函数层完成，负数不会到达这里；数据库的
/// CHECK 约束是最后一道防线。返回更新后的商品记录，调用方
/// 以它为准刷新本地副本。
pub async fn adjust_quantity(
    pool: &SqlitePool,
    product_id: i64,
    new_quantity: i64,
    reason: Option<&str>,
    operator_id: &str,
    operator_name: &str,
) -> RepoResult<InventoryProduct> {
    let now = shared::util::now_millis();

    let mut tx = pool.begin().await?;

    let old_quantity: Option<i64> =
        sqlx::query_scalar("SELECT quantity FROM inventory_product WHERE id = ?")
            .bind(product_id)
            .fetch_optional(&mut *tx)
            .await?;

    let Some(old_quantity) = old_quantity else {
        return Err(RepoError::NotFound(format!(
            "Inventory product {product_id} not found"
        )));
    };

    sqlx::query("UPDATE inventory_product SET quantity = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(new_quantity)
        .bind(now)
        .bind(product_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        "INSERT INTO inventory_adjustment (id, product_id, old_quantity, new_quantity, reason, operator_id, operator_name, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(shared::util::snowflake_id())
    .bind(product_id)
    .bind(old_quantity)
    .bind(new_quantity)
    .bind(reason)
    .bind(operator_id)
    .bind(operator_name)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    find_by_id(pool, product_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to reload adjusted product".into()))
}

/// 某商品的调整审计记录 (新的在前)
pub async fn list_adjustments(
    pool: &SqlitePool,
    product_id: i64,
) -> RepoResult<Vec<InventoryAdjustment>> {
    let rows = sqlx::query_as::<_, InventoryAdjustment>(
        "SELECT id, product_id, old_quantity, new_quantity, reason, operator_id, operator_name, created_at FROM inventory_adjustment WHERE product_id = ? ORDER BY created_at DESC",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
