//! 顾客预约向导 API 模块
//!
//! 公共路由 (无需认证)：顾客在预约页面依次拉取子类目、可预约
//! 日期、时段，搜索/登记客户信息，最后提交预约。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/appointments", appointment_routes())
}

fn appointment_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/subcategories", get(handler::list_subcategories))
        .route("/available-dates", get(handler::available_dates))
        .route("/slots/{date}", get(handler::slots_for_date))
        .route("/clients/search", get(handler::search_clients))
        .route("/admin-note", get(handler::get_admin_note))
}
