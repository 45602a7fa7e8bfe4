//! Client Repository

use super::{RepoError, RepoResult};
use shared::models::{Client, ClientCreate, ClientSummary};
use sqlx::SqlitePool;

const CLIENT_SELECT: &str =
    "SELECT id, name, phone, email, created_at, updated_at FROM client";

/// 搜索结果上限，避免过宽的片段扫出整表
const SEARCH_LIMIT: i64 = 20;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Client>> {
    let sql = format!("{} WHERE id = ?", CLIENT_SELECT);
    let row = sqlx::query_as::<_, Client>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// 按电话号码片段搜索，返回最小投影 (id, name)
///
/// 片段长度检查在处理函数层完成；这里假定片段已经足够长。
pub async fn search(pool: &SqlitePool, phone_fragment: &str) -> RepoResult<Vec<ClientSummary>> {
    let pattern = format!("%{phone_fragment}%");
    let rows = sqlx::query_as::<_, ClientSummary>(
        "SELECT id, name FROM client WHERE phone LIKE ? ORDER BY created_at DESC LIMIT ?",
    )
    .bind(&pattern)
    .bind(SEARCH_LIMIT)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: ClientCreate) -> RepoResult<Client> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO client (id, name, phone, email, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create client".into()))
}
