//! Appointment Booking API Handlers (顾客预约向导)

use std::collections::{HashMap, HashSet};

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::booking::{self, EligibilityEntry, Slot};
use crate::core::ServerState;
use crate::db::repository::{self as repo, RepoError};
use crate::utils::{AppError, AppResult, ErrorCode, time};
use shared::models::{
    AdminNote, AppointmentCreate, AppointmentDetail, Client, ClientCreate, ClientSummary,
    Subcategory,
};

const RESOURCE_APPOINTMENT: &str = "appointment";

/// GET /api/appointments/subcategories - 预约向导的子类目列表
pub async fn list_subcategories(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<Subcategory>>> {
    let subcategories = repo::subcategory::find_all(&state.pool).await?;
    Ok(Json(subcategories))
}

#[derive(Debug, Deserialize)]
pub struct AvailableDatesQuery {
    pub weeks_ahead: Option<u32>,
}

/// GET /api/appointments/available-dates - 可预约日期 (周二/周四)
pub async fn available_dates(
    State(state): State<ServerState>,
    Query(query): Query<AvailableDatesQuery>,
) -> AppResult<Json<Vec<String>>> {
    let today = time::today_in_tz(state.config.business_timezone);
    let weeks = query.weeks_ahead.unwrap_or(booking::DEFAULT_WEEKS_AHEAD);

    let dates = booking::bookable_dates(today, weeks)
        .into_iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    Ok(Json(dates))
}

/// GET /api/appointments/slots/{date} - 某日期的时段与可用性
///
/// 不可预约的星期返回空列表而不是错误。每次调用都从预约表
/// 重新推导占用情况，不做缓存；查询当天时已过去的时段不可用。
pub async fn slots_for_date(
    State(state): State<ServerState>,
    Path(date): Path<String>,
) -> AppResult<Json<Vec<Slot>>> {
    let parsed = time::parse_date(&date)?;
    let now = time::now_in_tz(state.config.business_timezone);

    let taken: HashSet<String> = repo::appointment::find_taken_starts(&state.pool, &date)
        .await?
        .into_iter()
        .collect();

    Ok(Json(booking::slots_for_date(
        parsed,
        &taken,
        now.date_naive(),
        now.time(),
    )))
}

#[derive(Debug, Deserialize)]
pub struct ClientSearchQuery {
    #[serde(default)]
    pub phone: String,
}

/// 触发搜索的最短片段长度
const MIN_SEARCH_FRAGMENT: usize = 3;

/// GET /api/appointments/clients/search?phone= - 按电话片段搜索客户
///
/// 片段不足 3 个字符直接返回空列表，不下发查询。
pub async fn search_clients(
    State(state): State<ServerState>,
    Query(query): Query<ClientSearchQuery>,
) -> AppResult<Json<Vec<ClientSummary>>> {
    let fragment = query.phone.trim();
    if fragment.len() < MIN_SEARCH_FRAGMENT {
        return Ok(Json(Vec::new()));
    }

    let clients = repo::client::search(&state.pool, fragment).await?;
    Ok(Json(clients))
}

/// GET /api/appointments/admin-note - 店长留言 (公共可读)
pub async fn get_admin_note(State(state): State<ServerState>) -> AppResult<Json<AdminNote>> {
    let note = repo::note::get(&state.pool).await?;
    Ok(Json(note))
}

/// POST /api/appointments - 提交预约
///
/// 校验顺序：日期/时段 → 条目数量 → 收货资格 → 客户解析 →
/// 入库 (事务 + 唯一索引兜底并发竞争)。任何一步失败都不会留下
/// 半写入的状态。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AppointmentCreate>,
) -> AppResult<Json<AppointmentDetail>> {
    let date = time::parse_date(&payload.appointment_date)?;
    let now = time::now_in_tz(state.config.business_timezone);
    let today = now.date_naive();

    if date < today || !booking::availability::is_bookable_weekday(date) {
        return Err(AppError::new(ErrorCode::DateNotBookable)
            .with_detail("appointment_date", payload.appointment_date.clone()));
    }

    let start = time::parse_start_time(&payload.start_time)?;
    if !booking::is_valid_slot_start(&payload.start_time)
        || booking::is_past_slot(date, start, today, now.time())
    {
        return Err(AppError::new(ErrorCode::SlotNotAvailable)
            .with_detail("start_time", payload.start_time.clone()));
    }

    if payload.items.iter().any(|item| item.quantity < 1) {
        return Err(AppError::validation("Item quantity must be at least 1"));
    }

    // 关联子类目并做资格校验
    let entries = load_eligibility_entries(&state, &payload).await?;
    booking::validate(&entries).map_err(AppError::from)?;

    // 客户解析：已有客户按 ID 验证存在，新客户内联创建
    let client = resolve_or_create_client(&state, &payload).await?;

    let appointment = repo::appointment::create(
        &state.pool,
        client.id,
        &payload.appointment_date,
        &payload.start_time,
        &payload.items,
    )
    .await
    .map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::SlotAlreadyBooked),
        other => AppError::from(other),
    })?;

    let detail = repo::appointment::find_detail(&state.pool, appointment.id)
        .await?
        .ok_or_else(|| AppError::database("Created appointment vanished"))?;

    state
        .broadcast_sync(
            RESOURCE_APPOINTMENT,
            "created",
            &appointment.id.to_string(),
            Some(&detail),
        )
        .await;

    tracing::info!(
        "Appointment {} booked for {} {} ({} items)",
        appointment.id,
        appointment.appointment_date,
        appointment.start_time,
        appointment.total_items
    );

    Ok(Json(detail))
}

/// 将购物车条目与子类目记录关联成资格校验输入
async fn load_eligibility_entries(
    state: &ServerState,
    payload: &AppointmentCreate,
) -> AppResult<Vec<EligibilityEntry>> {
    let ids: Vec<i64> = payload.items.iter().map(|i| i.subcategory_id).collect();
    let subcategories = repo::subcategory::find_by_ids(&state.pool, &ids).await?;
    let by_id: HashMap<i64, &Subcategory> =
        subcategories.iter().map(|s| (s.id, s)).collect();

    payload
        .items
        .iter()
        .map(|item| {
            let subcategory = by_id.get(&item.subcategory_id).ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::SubcategoryNotFound,
                    format!("Subcategory {} not found", item.subcategory_id),
                )
            })?;
            Ok(EligibilityEntry {
                subcategory_name: subcategory.name.clone(),
                is_clothing: subcategory.is_clothing,
                purchasing_enabled: subcategory.purchasing_enabled,
                quantity: item.quantity,
                is_excellent_quality: item.is_excellent_quality,
            })
        })
        .collect()
}

/// 客户解析：existing → 验证存在；new → name/phone 必填后创建
///
/// 电话号码唯一；重复电话的"新客户"提交返回冲突，提示改走搜索选择。
async fn resolve_or_create_client(
    state: &ServerState,
    payload: &AppointmentCreate,
) -> AppResult<Client> {
    if let Some(client_id) = payload.client_id {
        return repo::client::find_by_id(&state.pool, client_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::ClientNotFound,
                    format!("Client {client_id} not found"),
                )
            });
    }

    let name = payload
        .client_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::new(ErrorCode::ClientNameRequired))?;
    let phone = payload
        .client_phone
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::new(ErrorCode::ClientPhoneRequired))?;

    let client = repo::client::create(
        &state.pool,
        ClientCreate {
            name: name.to_string(),
            phone: phone.to_string(),
            email: payload
                .client_email
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        },
    )
    .await
    .map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::ClientPhoneDuplicate)
            .with_detail("phone", phone.to_string()),
        other => AppError::from(other),
    })?;

    Ok(client)
}
