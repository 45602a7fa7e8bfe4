//! Inventory API Handlers (POS 库存)

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{self as repo, RepoError};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{InventoryAdjustment, InventoryProduct, QuantityAdjust};

const RESOURCE_INVENTORY: &str = "inventory";

/// GET /api/inventory - 商品列表
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<InventoryProduct>>> {
    let products = repo::inventory::find_all(&state.pool).await?;
    Ok(Json(products))
}

/// GET /api/inventory/{id} - 单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<InventoryProduct>> {
    let product = repo::inventory::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
    Ok(Json(product))
}

/// PUT /api/inventory/{id}/quantity - 调整商品数量 (管理级角色)
///
/// 校验顺序固定：角色 → 数量非负 → 入库。两项校验任一失败都
/// 不会触碰持久层。成功时返回权威的新商品记录，调用方以它
/// 替换本地副本；失败时本地副本保持原样。
pub async fn adjust_quantity(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<QuantityAdjust>,
) -> AppResult<Json<InventoryProduct>> {
    user.require_elevated()?;

    if payload.quantity < 0 {
        return Err(AppError::new(ErrorCode::InvalidQuantity)
            .with_detail("quantity", payload.quantity));
    }

    let product = repo::inventory::adjust_quantity(
        &state.pool,
        id,
        payload.quantity,
        payload.reason.as_deref(),
        &user.id,
        &user.username,
    )
    .await
    .map_err(|e| match e {
        RepoError::NotFound(_) => AppError::new(ErrorCode::ProductNotFound),
        other => AppError::from(other),
    })?;

    state
        .broadcast_sync(RESOURCE_INVENTORY, "updated", &id.to_string(), Some(&product))
        .await;

    tracing::info!(
        "Inventory {} quantity set to {} by {} ({})",
        product.sku,
        product.quantity,
        user.username,
        user.role
    );

    Ok(Json(product))
}

/// GET /api/inventory/{id}/adjustments - 数量调整审计记录
pub async fn list_adjustments(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<InventoryAdjustment>>> {
    if repo::inventory::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::new(ErrorCode::ProductNotFound));
    }
    let adjustments = repo::inventory::list_adjustments(&state.pool, id).await?;
    Ok(Json(adjustments))
}
