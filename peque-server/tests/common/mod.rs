//! 集成测试公共设施
//!
//! 内存 SQLite + 真实 Router，请求通过 `tower::ServiceExt::oneshot`
//! 直接打到路由上，不占用端口。

// 各测试二进制只用到部分助手
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use peque_server::core::{Config, ServerState, build_router};
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

/// 内存数据库连接池
///
/// max_connections 必须是 1：每个内存 SQLite 连接各自是一个独立
/// 数据库，多连接会导致迁移和查询看到不同的库。
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

/// 构造测试用服务器状态 (内存库 + 随机开发密钥)
pub async fn test_state() -> ServerState {
    let pool = test_pool().await;
    let config = Config::with_overrides("/tmp/peque-test", 0);
    ServerState::new(config, pool)
}

pub async fn test_app() -> (Router, ServerState) {
    let state = test_state().await;
    let app = build_router(state.clone());
    (app, state)
}

/// 签发员工令牌 (角色字符串按上游认证服务的原样传入)
pub fn staff_token(state: &ServerState, role: &str) -> String {
    state
        .jwt_service
        .generate_token("emp-1", "laura", role)
        .expect("failed to generate test token")
}

/// 发送一个请求，返回 (状态码, JSON body)
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// 预约提交 payload (默认新客户)
pub fn booking_payload(date: &str, start: &str, items: Value) -> Value {
    booking_payload_as("Marta García", "616123456", date, start, items)
}

/// 指定客户姓名/电话的预约提交 payload
///
/// 电话唯一，同一测试里的第二个新客户要换一个号码。
pub fn booking_payload_as(
    name: &str,
    phone: &str,
    date: &str,
    start: &str,
    items: Value,
) -> Value {
    serde_json::json!({
        "client_id": null,
        "client_name": name,
        "client_phone": phone,
        "client_email": null,
        "appointment_date": date,
        "start_time": start,
        "items": items,
    })
}

/// 种一个库存商品，返回其 ID
pub async fn seed_product(pool: &SqlitePool, sku: &str, quantity: i64) -> i64 {
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO inventory_product (id, sku, description, quantity, final_sale_price, category_name, subcategory_name, created_at, updated_at) VALUES (?1, ?2, 'Carrito gemelar', ?3, 120.0, 'Puericultura', 'Carritos', 0, 0)",
    )
    .bind(id)
    .bind(sku)
    .bind(quantity)
    .execute(pool)
    .await
    .expect("failed to seed product");
    id
}

/// 下一个周二 (相对业务时区的今天)，保证预约日期总在未来
pub fn next_tuesday(state: &ServerState) -> String {
    use chrono::{Datelike, Duration, Weekday};
    let mut date = chrono::Utc::now()
        .with_timezone(&state.config.business_timezone)
        .date_naive()
        + Duration::days(1);
    while date.weekday() != Weekday::Tue {
        date += Duration::days(1);
    }
    date.format("%Y-%m-%d").to_string()
}
