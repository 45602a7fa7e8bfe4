//! 顾客预约流程集成测试
//!
//! 覆盖预约向导的完整链路：子类目 → 可预约日期 → 时段 → 提交，
//! 以及时段竞争、资格校验失败、客户搜索等分支。

mod common;

use common::{booking_payload, booking_payload_as, next_tuesday, send, staff_token, test_app};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn booking_happy_path_creates_appointment_and_claims_slot() {
    let (app, state) = test_app().await;
    let date = next_tuesday(&state);

    // 子类目目录是公共的
    let (status, subcategories) = send(&app, "GET", "/api/appointments/subcategories", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(subcategories.as_array().unwrap().len() >= 13);

    // 可预约日期只有周二/周四
    let (status, dates) = send(
        &app,
        "GET",
        "/api/appointments/available-dates?weeks_ahead=2",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(dates.as_array().unwrap().iter().any(|d| d == date.as_str()));

    // 提交前时段全部可用
    let (status, slots) = send(
        &app,
        "GET",
        &format!("/api/appointments/slots/{date}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let slot = &slots.as_array().unwrap()[0];
    assert_eq!(slot["start"], "10:00");
    assert_eq!(slot["is_available"], true);

    // 玩具 5 件，达标
    let payload = booking_payload(
        &date,
        "10:00",
        json!([{"subcategory_id": 6, "quantity": 5, "is_excellent_quality": true}]),
    );
    let (status, detail) = send(&app, "POST", "/api/appointments", None, Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["status"], "scheduled");
    assert_eq!(detail["total_items"], 5);
    assert_eq!(detail["client"]["name"], "Marta García");
    assert_eq!(detail["items"][0]["subcategory_name"], "Juguetes");

    // 时段被占用
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
    assert_eq!(ten["is_available"], false);
}

#[tokio::test]
async fn concurrent_bookings_for_same_slot_yield_one_success_one_conflict() {
    let (app, state) = test_app().await;
    let date = next_tuesday(&state);

    // 两个不同的客户争同一个时段
    let payload = |name: &str, phone: &str| {
        booking_payload_as(
            name,
            phone,
            &date,
            "11:00",
            json!([{"subcategory_id": 1, "quantity": 20, "is_excellent_quality": true}]),
        )
    };

    let (first, second) = tokio::join!(
        send(
            &app,
            "POST",
            "/api/appointments",
            None,
            Some(payload("Marta García", "616111222")),
        ),
        send(
            &app,
            "POST",
            "/api/appointments",
            None,
            Some(payload("Ana Ruiz", "616333444")),
        ),
    );

    let statuses = [first.0, second.0];
    assert!(statuses.contains(&StatusCode::OK));
    assert!(statuses.contains(&StatusCode::CONFLICT));

    let loser = if first.0 == StatusCode::CONFLICT {
        &first.1
    } else {
        &second.1
    };
    assert_eq!(loser["code"], 4003);

    // 数据库里恰好一条未取消的预约占用该时段
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM appointment WHERE appointment_date = ? AND start_time = '11:00' AND status != 'cancelled'",
    )
    .bind(&date)
    .fetch_one(&state.pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn ineligible_cart_is_rejected_before_persistence() {
    let (app, state) = test_app().await;
    let date = next_tuesday(&state);

    // 服装 19 件，差一件
    let payload = booking_payload(
        &date,
        "10:00",
        json!([{"subcategory_id": 1, "quantity": 19, "is_excellent_quality": true}]),
    );
    let (status, body) = send(&app, "POST", "/api/appointments", None, Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 5004);

    // 品相不佳优先于数量不足
    let payload = booking_payload(
        &date,
        "10:00",
        json!([{"subcategory_id": 1, "quantity": 100, "is_excellent_quality": false}]),
    );
    let (status, body) = send(&app, "POST", "/api/appointments", None, Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 5002);

    // 没有预约、没有客户被写入
    let appointments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM appointment")
        .fetch_one(&state.pool)
        .await
        .unwrap();
    assert_eq!(appointments, 0);
}

#[tokio::test]
async fn disabled_subcategory_rejects_booking_and_names_it() {
    let (app, state) = test_app().await;
    let date = next_tuesday(&state);
    let token = staff_token(&state, "manager");

    // 员工停收 Juguetes (id 6)
    let (status, toggled) = send(
        &app,
        "PUT",
        "/api/appointments/admin/subcategories/6/toggle",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["purchasing_enabled"], false);

    let payload = booking_payload(
        &date,
        "10:00",
        json!([
            {"subcategory_id": 6, "quantity": 5, "is_excellent_quality": true},
            {"subcategory_id": 1, "quantity": 20, "is_excellent_quality": true},
        ]),
    );
    let (status, body) = send(&app, "POST", "/api/appointments", None, Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 5003);
    assert!(body["message"].as_str().unwrap().contains("Juguetes"));
}

#[tokio::test]
async fn off_schedule_date_and_time_are_rejected() {
    let (app, state) = test_app().await;
    let date = next_tuesday(&state);

    // 周三不可预约
    let wednesday = {
        let d = chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").unwrap()
            + chrono::Duration::days(1);
        d.format("%Y-%m-%d").to_string()
    };
    let payload = booking_payload(
        &wednesday,
        "10:00",
        json!([{"subcategory_id": 6, "quantity": 5, "is_excellent_quality": true}]),
    );
    let (status, body) = send(&app, "POST", "/api/appointments", None, Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4005);

    // 不在时段网格上的开始时间
    let payload = booking_payload(
        &date,
        "15:00",
        json!([{"subcategory_id": 6, "quantity": 5, "is_excellent_quality": true}]),
    );
    let (status, body) = send(&app, "POST", "/api/appointments", None, Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4004);

    // 不可预约星期的时段列表为空，而不是报错
    let (status, slots) = send(
        &app,
        "GET",
        &format!("/api/appointments/slots/{wednesday}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(slots.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn client_search_requires_three_characters() {
    let (app, state) = test_app().await;
    let date = next_tuesday(&state);

    // 登记一个新客户
    let payload = booking_payload(
        &date,
        "12:00",
        json!([{"subcategory_id": 6, "quantity": 5, "is_excellent_quality": true}]),
    );
    let (status, _) = send(&app, "POST", "/api/appointments", None, Some(payload)).await;
    assert_eq!(status, StatusCode::OK);

    // 两个字符：空列表
    let (status, results) = send(
        &app,
        "GET",
        "/api/appointments/clients/search?phone=61",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(results.as_array().unwrap().len(), 0);

    // 三个字符：命中
    let (status, results) = send(
        &app,
        "GET",
        "/api/appointments/clients/search?phone=616",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "Marta García");
}

#[tokio::test]
async fn existing_client_is_reused_and_missing_client_fails() {
    let (app, state) = test_app().await;
    let date = next_tuesday(&state);

    let payload = booking_payload(
        &date,
        "10:00",
        json!([{"subcategory_id": 6, "quantity": 5, "is_excellent_quality": true}]),
    );
    let (_, detail) = send(&app, "POST", "/api/appointments", None, Some(payload)).await;
    let client_id = detail["client"]["id"].as_i64().unwrap();

    // 同一客户再订另一个时段
    let payload = json!({
        "client_id": client_id,
        "appointment_date": date,
        "start_time": "10:30",
        "items": [{"subcategory_id": 6, "quantity": 5, "is_excellent_quality": true}],
    });
    let (status, detail) = send(&app, "POST", "/api/appointments", None, Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["client_id"].as_i64().unwrap(), client_id);

    // 引用不存在的客户
    let payload = json!({
        "client_id": 999999,
        "appointment_date": date,
        "start_time": "11:00",
        "items": [{"subcategory_id": 6, "quantity": 5, "is_excellent_quality": true}],
    });
    let (status, body) = send(&app, "POST", "/api/appointments", None, Some(payload)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);

    // 新客户缺电话
    let payload = json!({
        "client_id": null,
        "client_name": "Pep",
        "appointment_date": date,
        "start_time": "11:00",
        "items": [{"subcategory_id": 6, "quantity": 5, "is_excellent_quality": true}],
    });
    let (status, body) = send(&app, "POST", "/api/appointments", None, Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6003);
}

#[tokio::test]
async fn duplicate_phone_on_new_client_is_rejected_as_conflict() {
    let (app, state) = test_app().await;
    let date = next_tuesday(&state);

    let payload = booking_payload(
        &date,
        "10:00",
        json!([{"subcategory_id": 6, "quantity": 5, "is_excellent_quality": true}]),
    );
    let (status, _) = send(&app, "POST", "/api/appointments", None, Some(payload)).await;
    assert_eq!(status, StatusCode::OK);

    // 相同电话再以"新客户"提交另一个时段：冲突，提示改走搜索
    let payload = booking_payload_as(
        "Marta G.",
        "616123456",
        &date,
        "10:30",
        json!([{"subcategory_id": 6, "quantity": 5, "is_excellent_quality": true}]),
    );
    let (status, body) = send(&app, "POST", "/api/appointments", None, Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6004);

    // 客户表里这个号码只有一行
    let clients: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM client WHERE phone = '616123456'")
            .fetch_one(&state.pool)
            .await
            .unwrap();
    assert_eq!(clients, 1);

    // 失败的提交没有占用时段
    let taken: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM appointment WHERE appointment_date = ? AND start_time = '10:30'",
    )
    .bind(&date)
    .fetch_one(&state.pool)
    .await
    .unwrap();
    assert_eq!(taken, 0);
}

#[tokio::test]
async fn admin_note_is_publicly_readable_but_staff_writable() {
    let (app, state) = test_app().await;

    // 公共读取
    let (status, note) = send(&app, "GET", "/api/appointments/admin-note", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(note["note"], "");

    // 未认证写入被拒
    let (status, _) = send(
        &app,
        "PUT",
        "/api/appointments/admin/note",
        None,
        Some(json!({"note": "Cerrado en agosto"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // 员工写入
    let token = staff_token(&state, "employee");
    let (status, updated) = send(
        &app,
        "PUT",
        "/api/appointments/admin/note",
        Some(&token),
        Some(json!({"note": "Cerrado en agosto"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["note"], "Cerrado en agosto");

    // 顾客端能看到新留言
    let (_, note) = send(&app, "GET", "/api/appointments/admin-note", None, None).await;
    assert_eq!(note["note"], "Cerrado en agosto");
}
