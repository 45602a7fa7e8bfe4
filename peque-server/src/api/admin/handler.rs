//! Admin Moderation API Handlers (预约后台)

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{self as repo};
use crate::utils::{AppError, AppResult, ErrorCode, time};
use shared::models::{
    AdminNote, AdminNoteUpdate, Appointment, AppointmentCancel, AppointmentDetail,
    AppointmentStats, AppointmentStatus, AppointmentStatusUpdate, AppointmentWithClient,
    Subcategory,
};

const RESOURCE_APPOINTMENT: &str = "appointment";
const RESOURCE_SUBCATEGORY: &str = "subcategory";
const RESOURCE_ADMIN_NOTE: &str = "admin_note";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub status: Option<String>,
}

/// GET /api/appointments/admin - 过滤预约列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<AppointmentWithClient>>> {
    if let Some(from) = query.date_from.as_deref() {
        time::parse_date(from)?;
    }
    if let Some(to) = query.date_to.as_deref() {
        time::parse_date(to)?;
    }
    let status = query
        .status
        .as_deref()
        .map(|s| {
            s.parse::<AppointmentStatus>()
                .map_err(|e| AppError::validation(e.to_string()))
        })
        .transpose()?;

    let appointments = repo::appointment::list(
        &state.pool,
        query.date_from.as_deref(),
        query.date_to.as_deref(),
        status,
    )
    .await?;
    Ok(Json(appointments))
}

/// GET /api/appointments/admin/{id} - 预约详情 (含客户与条目)
pub async fn get_detail(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppointmentDetail>> {
    let detail = repo::appointment::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::AppointmentNotFound))?;
    Ok(Json(detail))
}

/// 加载预约并检查仍可流转 (scheduled)
async fn load_transitionable(state: &ServerState, id: i64) -> AppResult<Appointment> {
    let appointment = repo::appointment::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::AppointmentNotFound))?;

    let current: AppointmentStatus = appointment
        .status
        .parse()
        .map_err(|e: shared::models::UnknownStatus| AppError::internal(e.to_string()))?;
    if current.is_terminal() {
        return Err(AppError::new(ErrorCode::AppointmentTerminalState)
            .with_detail("status", appointment.status.clone()));
    }
    Ok(appointment)
}

/// PUT /api/appointments/admin/{id}/cancel - 取消预约
///
/// 要求非空原因；预约已处于终态时报错而不是静默跳过。
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<AppointmentCancel>,
) -> AppResult<Json<Appointment>> {
    let reason = payload.reason.trim();
    if reason.is_empty() {
        return Err(AppError::new(ErrorCode::CancellationReasonRequired));
    }

    load_transitionable(&state, id).await?;

    // UPDATE 自带状态守卫；并发下失败方在这里收到终态错误
    let cancelled = repo::appointment::cancel(&state.pool, id, reason).await?;
    if !cancelled {
        return Err(AppError::new(ErrorCode::AppointmentTerminalState));
    }

    let appointment = repo::appointment::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::AppointmentNotFound))?;

    state
        .broadcast_sync(
            RESOURCE_APPOINTMENT,
            "updated",
            &id.to_string(),
            Some(&appointment),
        )
        .await;

    tracing::info!("Appointment {} cancelled by {}", id, user.username);

    Ok(Json(appointment))
}

/// PUT /api/appointments/admin/{id}/status - 推进到 completed / no_show
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<AppointmentStatusUpdate>,
) -> AppResult<Json<Appointment>> {
    // 取消走专用接口 (要求原因)；这里只接受 completed / no_show
    if !matches!(
        payload.status,
        AppointmentStatus::Completed | AppointmentStatus::NoShow
    ) {
        return Err(AppError::new(ErrorCode::InvalidStatusTransition)
            .with_detail("status", payload.status.as_str()));
    }

    load_transitionable(&state, id).await?;

    let updated = repo::appointment::update_status(&state.pool, id, payload.status).await?;
    if !updated {
        return Err(AppError::new(ErrorCode::AppointmentTerminalState));
    }

    let appointment = repo::appointment::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::AppointmentNotFound))?;

    state
        .broadcast_sync(
            RESOURCE_APPOINTMENT,
            "updated",
            &id.to_string(),
            Some(&appointment),
        )
        .await;

    tracing::info!(
        "Appointment {} marked {} by {}",
        id,
        payload.status,
        user.username
    );

    Ok(Json(appointment))
}

/// PUT /api/appointments/admin/subcategories/{id}/toggle - 翻转停收开关
///
/// 只影响未来的预约提交，不追溯历史预约条目。
pub async fn toggle_subcategory(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Subcategory>> {
    let subcategory = repo::subcategory::toggle_purchasing(&state.pool, id)
        .await
        .map_err(|e| match e {
            repo::RepoError::NotFound(_) => AppError::new(ErrorCode::SubcategoryNotFound),
            other => AppError::from(other),
        })?;

    state
        .broadcast_sync(
            RESOURCE_SUBCATEGORY,
            "updated",
            &id.to_string(),
            Some(&subcategory),
        )
        .await;

    tracing::info!(
        "Subcategory '{}' purchasing_enabled={} (by {})",
        subcategory.name,
        subcategory.purchasing_enabled,
        user.username
    );

    Ok(Json(subcategory))
}

/// PUT /api/appointments/admin/note - 更新店长留言
pub async fn set_admin_note(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Json(payload): Json<AdminNoteUpdate>,
) -> AppResult<Json<AdminNote>> {
    let note = repo::note::set(&state.pool, &payload.note).await?;

    state
        .broadcast_sync(RESOURCE_ADMIN_NOTE, "updated", "1", Some(&note))
        .await;

    Ok(Json(note))
}

/// GET /api/appointments/admin/stats - 今日/本周/各状态计数
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<AppointmentStats>> {
    let today = time::today_in_tz(state.config.business_timezone);
    let (week_start, week_end) = time::week_bounds(today);

    let stats = repo::appointment::stats(
        &state.pool,
        &today.format("%Y-%m-%d").to_string(),
        &week_start.format("%Y-%m-%d").to_string(),
        &week_end.format("%Y-%m-%d").to_string(),
    )
    .await?;
    Ok(Json(stats))
}
