//! POS 库存 API 模块
//!
//! 员工路由；数量调整额外要求管理级角色。

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/inventory", inventory_routes())
}

fn inventory_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/quantity", put(handler::adjust_quantity))
        .route("/{id}/adjustments", get(handler::list_adjustments))
}
