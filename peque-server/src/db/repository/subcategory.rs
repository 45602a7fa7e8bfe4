//! Subcategory Repository

use super::{RepoError, RepoResult};
use shared::models::Subcategory;
use sqlx::SqlitePool;

const SUBCATEGORY_SELECT: &str = "SELECT id, name, category_name, is_clothing, purchasing_enabled, created_at, updated_at FROM subcategory";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Subcategory>> {
    let sql = format!("{} ORDER BY category_name, name", SUBCATEGORY_SELECT);
    let rows = sqlx::query_as::<_, Subcategory>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Subcategory>> {
    let sql = format!("{} WHERE id = ?", SUBCATEGORY_SELECT);
    let row = sqlx::query_as::<_, Subcategory>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// 按 ID 批量查询 (预约提交时关联购物车条目)
pub async fn find_by_ids(pool: &SqlitePool, ids: &[i64]) -> RepoResult<Vec<Subcategory>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!("{} WHERE id IN ({})", SUBCATEGORY_SELECT, placeholders);

    let mut query = sqlx::query_as::<_, Subcategory>(&sql);
    for id in ids {
        query = query.bind(id);
    }

    let rows = query.fetch_all(pool).await?;
    Ok(rows)
}

/// 翻转停收开关，返回更新后的记录
///
/// 只影响未来的预约提交，历史预约条目不受影响。
pub async fn toggle_purchasing(pool: &SqlitePool, id: i64) -> RepoResult<Subcategory> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE subcategory SET purchasing_enabled = NOT purchasing_enabled, updated_at = ? WHERE id = ?",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Subcategory {id} not found")));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Subcategory {id} not found")))
}
