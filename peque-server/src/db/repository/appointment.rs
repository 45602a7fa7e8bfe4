//! Appointment Repository

use super::{RepoError, RepoResult};
use shared::models::{
    Appointment, AppointmentDetail, AppointmentItemDetail, AppointmentItemInput, AppointmentStats,
    AppointmentStatus, AppointmentWithClient, Client,
};
use sqlx::SqlitePool;

const APPOINTMENT_SELECT: &str = "SELECT id, appointment_date, start_time, status, client_id, total_items, cancellation_reason, created_at, updated_at FROM appointment";

const APPOINTMENT_WITH_CLIENT_SELECT: &str = "SELECT a.id, a.appointment_date, a.start_time, a.status, a.client_id, c.name as client_name, c.phone as client_phone, a.total_items, a.cancellation_reason, a.created_at, a.updated_at FROM appointment a JOIN client c ON a.client_id = c.id";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Appointment>> {
    let sql = format!("{} WHERE id = ?", APPOINTMENT_SELECT);
    let row = sqlx::query_as::<_, Appointment>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// 预约详情：预约记录 + 客户 + 条目 (含子类目名)
pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<Option<AppointmentDetail>> {
    let Some(appointment) = find_by_id(pool, id).await? else {
        return Ok(None);
    };

    let client = sqlx::query_as::<_, Client>(
        "SELECT id, name, phone, email, created_at, updated_at FROM client WHERE id = ?",
    )
    .bind(appointment.client_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| {
        RepoError::Database(format!(
            "Appointment {} references missing client {}",
            id, appointment.client_id
        ))
    })?;

    let items = sqlx::query_as::<_, AppointmentItemDetail>(
        "SELECT ai.subcategory_id, s.name as subcategory_name, s.is_clothing, ai.quantity, ai.is_excellent_quality FROM appointment_item ai JOIN subcategory s ON ai.subcategory_id = s.id WHERE ai.appointment_id = ? ORDER BY ai.id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(AppointmentDetail {
        appointment,
        client,
        items,
    }))
}

/// 某日期所有未取消预约占用的开始时间
pub async fn find_taken_starts(pool: &SqlitePool, date: &str) -> RepoResult<Vec<String>> {
    let rows = sqlx::query_scalar::<_, String>(
        "SELECT start_time FROM appointment WHERE appointment_date = ? AND status != 'cancelled' ORDER BY start_time",
    )
    .bind(date)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// 创建预约 (单事务)
///
/// 事务内先重查时段占用，再插入预约与条目。即便重查通过，
/// `idx_appointment_slot` 唯一索引仍是最终防线，并发竞争的
/// 失败方会收到 [`RepoError::Duplicate`]。
pub async fn create(
    pool: &SqlitePool,
    client_id: i64,
    date: &str,
    start_time: &str,
    items: &[AppointmentItemInput],
) -> RepoResult<Appointment> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let total_items: i64 = items.iter().map(|i| i.quantity).sum();

    let mut tx = pool.begin().await?;

    let occupied: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM appointment WHERE appointment_date = ? AND start_time = ? AND status != 'cancelled'",
    )
    .bind(date)
    .bind(start_time)
    .fetch_one(&mut *tx)
    .await?;

    if occupied > 0 {
        return Err(RepoError::Duplicate(format!(
            "Slot {date} {start_time} is already booked"
        )));
    }

    sqlx::query(
        "INSERT INTO appointment (id, appointment_date, start_time, status, client_id, total_items, created_at, updated_at) VALUES (?1, ?2, ?3, 'scheduled', ?4, ?5, ?6, ?6)",
    )
    .bind(id)
    .bind(date)
    .bind(start_time)
    .bind(client_id)
    .bind(total_items)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for item in items {
        sqlx::query(
            "INSERT INTO appointment_item (id, appointment_id, subcategory_id, quantity, is_excellent_quality) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(shared::util::snowflake_id())
        .bind(id)
        .bind(item.subcategory_id)
        .bind(item.quantity)
        .bind(item.is_excellent_quality)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create appointment".into()))
}

/// 取消预约 (要求当前状态为 scheduled)
///
/// UPDATE 自带状态守卫，返回 0 行表示预约已处于终态 (或不存在)，
/// 由调用方区分这两种情况。
pub async fn cancel(pool: &SqlitePool, id: i64, reason: &str) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE appointment SET status = 'cancelled', cancellation_reason = ?1, updated_at = ?2 WHERE id = ?3 AND status = 'scheduled'",
    )
    .bind(reason)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// 推进预约状态 (completed / no_show，要求当前状态为 scheduled)
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: AppointmentStatus,
) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE appointment SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = 'scheduled'",
    )
    .bind(status.as_str())
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// 后台预约列表 (可选过滤: 日期范围、状态)
pub async fn list(
    pool: &SqlitePool,
    date_from: Option<&str>,
    date_to: Option<&str>,
    status: Option<AppointmentStatus>,
) -> RepoResult<Vec<AppointmentWithClient>> {
    let mut sql = format!("{} WHERE 1=1", APPOINTMENT_WITH_CLIENT_SELECT);
    if date_from.is_some() {
        sql.push_str(" AND a.appointment_date >= ?");
    }
    if date_to.is_some() {
        sql.push_str(" AND a.appointment_date <= ?");
    }
    if status.is_some() {
        sql.push_str(" AND a.status = ?");
    }
    sql.push_str(" ORDER BY a.appointment_date DESC, a.start_time DESC");

    let mut query = sqlx::query_as::<_, AppointmentWithClient>(&sql);
    if let Some(from) = date_from {
        query = query.bind(from);
    }
    if let Some(to) = date_to {
        query = query.bind(to);
    }
    if let Some(status) = status {
        query = query.bind(status.as_str());
    }

    let rows = query.fetch_all(pool).await?;
    Ok(rows)
}

/// 仪表盘统计：今日 / 本周预约数 + 各状态计数
///
/// 每次按需全量聚合，不做增量物化。
pub async fn stats(
    pool: &SqlitePool,
    today: &str,
    week_start: &str,
    week_end: &str,
) -> RepoResult<AppointmentStats> {
    let today_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM appointment WHERE appointment_date = ?")
            .bind(today)
            .fetch_one(pool)
            .await?;

    let week_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM appointment WHERE appointment_date >= ? AND appointment_date <= ?",
    )
    .bind(week_start)
    .bind(week_end)
    .fetch_one(pool)
    .await?;

    let by_status = sqlx::query_as::<_, (String, i64)>(
        "SELECT status, COUNT(*) FROM appointment GROUP BY status",
    )
    .fetch_all(pool)
    .await?;

    let mut stats = AppointmentStats {
        today: today_count,
        this_week: week_count,
        scheduled: 0,
        completed: 0,
        cancelled: 0,
        no_show: 0,
    };
    for (status, count) in by_status {
        match status.as_str() {
            "scheduled" => stats.scheduled = count,
            "completed" => stats.completed = count,
            "cancelled" => stats.cancelled = count,
            "no_show" => stats.no_show = count,
            _ => {}
        }
    }
    Ok(stats)
}
