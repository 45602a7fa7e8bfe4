//! 预约后台管理 API 模块
//!
//! 员工路由 (需要有效令牌)：预约列表/详情、取消、状态推进、
//! 子类目停收开关、店长留言、仪表盘统计。

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/appointments/admin", admin_routes())
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/stats", get(handler::stats))
        .route("/note", put(handler::set_admin_note))
        .route("/subcategories/{id}/toggle", put(handler::toggle_subcategory))
        .route("/{id}", get(handler::get_detail))
        .route("/{id}/cancel", put(handler::cancel))
        .route("/{id}/status", put(handler::update_status))
}
