//! 预约后台管理集成测试
//!
//! 状态生命周期 (取消 / 完成 / 爽约)、终态保护、列表过滤与统计。

mod common;

use common::{booking_payload_as, next_tuesday, send, staff_token, test_app};
use http::StatusCode;
use serde_json::json;

/// 通过公共 API 建一条预约，返回其 ID (电话唯一，每条预约换一个号码)
async fn book(app: &axum::Router, date: &str, start: &str, phone: &str) -> i64 {
    let payload = booking_payload_as(
        "Marta García",
        phone,
        date,
        start,
        json!([{"subcategory_id": 6, "quantity": 5, "is_excellent_quality": true}]),
    );
    let (status, detail) = send(app, "POST", "/api/appointments", None, Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    detail["id"].as_i64().unwrap()
}

#[tokio::test]
async fn staff_routes_reject_anonymous_and_bad_tokens() {
    let (app, _state) = test_app().await;

    let (status, body) = send(&app, "GET", "/api/appointments/admin", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, _) = send(
        &app,
        "GET",
        "/api/appointments/admin",
        Some("not-a-jwt"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn cancel_requires_reason_and_frees_the_slot() {
    let (app, state) = test_app().await;
    let date = next_tuesday(&state);
    let id = book(&app, &date, "10:00", "616000001").await;
    let token = staff_token(&state, "employee");

    // 空原因被拒
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/appointments/admin/{id}/cancel"),
        Some(&token),
        Some(json!({"reason": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4006);

    // 有原因的取消成功
    let (status, cancelled) = send(
        &app,
        "PUT",
        &format!("/api/appointments/admin/{id}/cancel"),
        Some(&token),
        Some(json!({"reason": "Cliente no puede venir"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");
    assert_eq!(cancelled["cancellation_reason"], "Cliente no puede venir");

    // 取消的预约不再占用时段，可以再次预订
    let (_, slots) = send(
        &app,
        "GET",
        &format!("/api/appointments/slots/{date}"),
        None,
        None,
    )
    .await;
    let ten = slots
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["start"] == "10:00")
        .unwrap();
    assert_eq!(ten["is_available"], true);

    let second = book(&app, &date, "10:00", "616000002").await;
    assert_ne!(second, id);
}

#[tokio::test]
async fn terminal_appointments_cannot_be_cancelled_again() {
    let (app, state) = test_app().await;
    let date = next_tuesday(&state);
    let id = book(&app, &date, "16:30", "616000003").await;
    let token = staff_token(&state, "manager");

    // 先标记完成
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/appointments/admin/{id}/status"),
        Some(&token),
        Some(json!({"status": "completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "completed");

    // 再取消必须失败，且状态保持不变
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/appointments/admin/{id}/cancel"),
        Some(&token),
        Some(json!({"reason": "demasiado tarde"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4002);

    let status_in_db: String =
        sqlx::query_scalar("SELECT status FROM appointment WHERE id = ?")
            .bind(id)
            .fetch_one(&state.pool)
            .await
            .unwrap();
    assert_eq!(status_in_db, "completed");
}

#[tokio::test]
async fn status_endpoint_only_accepts_completed_and_no_show() {
    let (app, state) = test_app().await;
    let date = next_tuesday(&state);
    let id = book(&app, &date, "17:00", "616000004").await;
    let token = staff_token(&state, "manager");

    // cancelled 必须走取消接口
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/appointments/admin/{id}/status"),
        Some(&token),
        Some(json!({"status": "cancelled"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4007);

    // no_show 正常
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/appointments/admin/{id}/status"),
        Some(&token),
        Some(json!({"status": "no_show"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "no_show");

    // 终态之后不能再推进
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/appointments/admin/{id}/status"),
        Some(&token),
        Some(json!({"status": "completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4002);
}

#[tokio::test]
async fn list_filters_by_status_and_detail_joins_client_and_items() {
    let (app, state) = test_app().await;
    let date = next_tuesday(&state);
    let first = book(&app, &date, "10:00", "616123456").await;
    let second = book(&app, &date, "10:30", "616999888").await;
    let token = staff_token(&state, "employee");

    // 取消第二条
    send(
        &app,
        "PUT",
        &format!("/api/appointments/admin/{second}/cancel"),
        Some(&token),
        Some(json!({"reason": "duplicado"})),
    )
    .await;

    let (status, all) = send(&app, "GET", "/api/appointments/admin", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, scheduled) = send(
        &app,
        "GET",
        "/api/appointments/admin?status=scheduled",
        Some(&token),
        None,
    )
    .await;
    let scheduled = scheduled.as_array().unwrap();
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0]["id"].as_i64().unwrap(), first);
    assert_eq!(scheduled[0]["client_name"], "Marta García");

    // 日期范围外为空
    let (_, none) = send(
        &app,
        "GET",
        "/api/appointments/admin?date_from=2020-01-01&date_to=2020-12-31",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(none.as_array().unwrap().len(), 0);

    // 详情联查客户与条目
    let (status, detail) = send(
        &app,
        "GET",
        &format!("/api/appointments/admin/{first}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["client"]["phone"], "616123456");
    assert_eq!(detail["items"][0]["quantity"], 5);
}

#[tokio::test]
async fn stats_count_by_window_and_status() {
    let (app, state) = test_app().await;
    let date = next_tuesday(&state);
    let first = book(&app, &date, "10:00", "616000005").await;
    book(&app, &date, "10:30", "616000006").await;
    let token = staff_token(&state, "manager");

    send(
        &app,
        "PUT",
        &format!("/api/appointments/admin/{first}/cancel"),
        Some(&token),
        Some(json!({"reason": "baja"})),
    )
    .await;

    let (status, stats) = send(
        &app,
        "GET",
        "/api/appointments/admin/stats",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["scheduled"], 1);
    assert_eq!(stats["cancelled"], 1);
    assert_eq!(stats["completed"], 0);
    // 下一个周二可能落在本周也可能在下周，只验证上界
    assert!(stats["this_week"].as_i64().unwrap() <= 2);
}

#[tokio::test]
async fn server_state_initializes_a_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let config = peque_server::core::Config::with_overrides(
        dir.path().to_string_lossy().to_string(),
        0,
    );

    let state = peque_server::core::ServerState::initialize(&config)
        .await
        .expect("initialize should create dirs, open the db and migrate");

    // 迁移已应用：种子子类目可查
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subcategory")
        .fetch_one(&state.pool)
        .await
        .unwrap();
    assert_eq!(count, 13);
    assert!(dir.path().join("database").join("peque.db").exists());
}
