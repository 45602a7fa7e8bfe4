//! Admin Note Repository
//!
//! 单行表 (id 恒为 1)，只做 upsert 和读取，不保留历史。

use super::{RepoError, RepoResult};
use shared::models::AdminNote;
use sqlx::SqlitePool;

pub async fn get(pool: &SqlitePool) -> RepoResult<AdminNote> {
    let row = sqlx::query_as::<_, AdminNote>("SELECT note, updated_at FROM admin_note WHERE id = 1")
        .fetch_optional(pool)
        .await?;
    row.ok_or_else(|| RepoError::Database("admin_note row missing (schema not seeded)".into()))
}

pub async fn set(pool: &SqlitePool, note: &str) -> RepoResult<AdminNote> {
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO admin_note (id, note, updated_at) VALUES (1, ?1, ?2) ON CONFLICT(id) DO UPDATE SET note = excluded.note, updated_at = excluded.updated_at",
    )
    .bind(note)
    .bind(now)
    .execute(pool)
    .await?;

    get(pool).await
}
