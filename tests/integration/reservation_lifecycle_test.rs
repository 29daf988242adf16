//! Reservation lifecycle scenarios: check-in, check-out, cancellation,
//! and room status consistency.

mod helpers;

use chrono::{Duration, Utc};
use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

fn today_plus(days: i64) -> String {
    (Utc::now().date_naive() + Duration::days(days)).to_string()
}

async fn create_reservation(app: &TestApp, token: &str, room: i32, from: i64, to: i64) -> String {
    let (status, body) = app
        .request(
            "POST",
            "/api/reservations",
            Some(token),
            Some(json!({
                "first_name": "Grace",
                "last_name": "Hopper",
                "email": "grace@example.com",
                "room_number": room,
                "guests": 1,
                "check_in": today_plus(from),
                "check_out": today_plus(to)
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn room_status(app: &TestApp, token: &str, room: i32) -> String {
    let (status, body) = app
        .request("GET", &format!("/api/rooms/{room}"), Some(token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["status"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn room_is_untouched_at_creation_then_follows_lifecycle() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    app.seed_room(301, "single", 80.0, 1).await;

    // Stay starts today so check-in falls inside the window.
    let id = create_reservation(&app, &token, 301, 0, 2).await;
    assert_eq!(room_status(&app, &token, 301).await, "available");

    let (status, body) = app
        .request(
            "POST",
            &format!("/api/reservations/{id}/check-in"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "occupied");
    assert_eq!(room_status(&app, &token, 301).await, "occupied");

    let (status, body) = app
        .request(
            "POST",
            &format!("/api/reservations/{id}/check-out"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "completed");
    assert_eq!(room_status(&app, &token, 301).await, "cleaning");
}

#[tokio::test]
async fn occupied_room_takes_future_non_overlapping_booking() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    app.seed_room(308, "single", 80.0, 1).await;

    let id = create_reservation(&app, &token, 308, 0, 2).await;
    let (status, _) = app
        .request(
            "POST",
            &format!("/api/reservations/{id}/check-in"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(room_status(&app, &token, 308).await, "occupied");

    // Next week's stay on the same room does not overlap the current one.
    create_reservation(&app, &token, 308, 7, 9).await;
}

#[tokio::test]
async fn check_in_requires_reserved_status() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    app.seed_room(302, "single", 80.0, 1).await;

    let id = create_reservation(&app, &token, 302, 0, 2).await;
    let (status, _) = app
        .request(
            "POST",
            &format!("/api/reservations/{id}/check-in"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Second check-in is an illegal transition.
    let (status, body) = app
        .request(
            "POST",
            &format!("/api/reservations/{id}/check-in"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "INVALID_STATE");
}

#[tokio::test]
async fn check_in_outside_window_is_rejected() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    app.seed_room(303, "single", 80.0, 1).await;

    // Scheduled five days out; today is outside the one-day window.
    let id = create_reservation(&app, &token, 303, 5, 7).await;
    let (status, body) = app
        .request(
            "POST",
            &format!("/api/reservations/{id}/check-in"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION");
}

#[tokio::test]
async fn cancel_occupied_releases_room_and_records_fee() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    app.seed_room(304, "single", 80.0, 1).await;

    let id = create_reservation(&app, &token, 304, 0, 3).await;
    let (status, _) = app
        .request(
            "POST",
            &format!("/api/reservations/{id}/check-in"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request(
            "POST",
            &format!("/api/reservations/{id}/cancel"),
            Some(&token),
            Some(json!({ "reason": "guest emergency" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "cancelled");
    assert_eq!(body["data"]["cancellation_reason"], "guest emergency");
    // Stay already started: strictest fee tier.
    assert_eq!(body["data"]["cancellation_fee"], 0.5);
    assert_eq!(room_status(&app, &token, 304).await, "cleaning");
}

#[tokio::test]
async fn cancel_reserved_leaves_room_alone() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    app.seed_room(305, "single", 80.0, 1).await;

    // Far enough out that no fee applies.
    let id = create_reservation(&app, &token, 305, 10, 12).await;
    let (status, body) = app
        .request(
            "POST",
            &format!("/api/reservations/{id}/cancel"),
            Some(&token),
            Some(json!({})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["cancellation_fee"], 0.0);
    assert_eq!(room_status(&app, &token, 305).await, "available");

    // Terminal: cancelling again is refused.
    let (status, _) = app
        .request(
            "POST",
            &format!("/api/reservations/{id}/cancel"),
            Some(&token),
            Some(json!({})),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn stay_length_and_past_dates_are_validated() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    app.seed_room(306, "single", 80.0, 1).await;

    // Zero nights.
    let (status, _) = app
        .request(
            "POST",
            "/api/reservations",
            Some(&token),
            Some(json!({
                "first_name": "Grace",
                "last_name": "Hopper",
                "email": "grace@example.com",
                "room_number": 306,
                "guests": 1,
                "check_in": today_plus(5),
                "check_out": today_plus(5)
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 31 nights exceeds the maximum.
    let (status, _) = app
        .request(
            "POST",
            "/api/reservations",
            Some(&token),
            Some(json!({
                "first_name": "Grace",
                "last_name": "Hopper",
                "email": "grace@example.com",
                "room_number": 306,
                "guests": 1,
                "check_in": today_plus(5),
                "check_out": today_plus(36)
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Past check-in.
    let (status, _) = app
        .request(
            "POST",
            "/api/reservations",
            Some(&token),
            Some(json!({
                "first_name": "Grace",
                "last_name": "Hopper",
                "email": "grace@example.com",
                "room_number": 306,
                "guests": 1,
                "check_in": today_plus(-2),
                "check_out": today_plus(1)
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn housekeeping_cannot_create_reservations() {
    let app = TestApp::new().await;
    let token = app
        .staff_token(
            "housekeeping@example.com",
            innkeeper_entity::user::UserRole::Housekeeping,
        )
        .await;
    app.seed_room(307, "single", 80.0, 1).await;

    let (status, body) = app
        .request(
            "POST",
            "/api/reservations",
            Some(&token),
            Some(json!({
                "first_name": "Grace",
                "last_name": "Hopper",
                "email": "grace@example.com",
                "room_number": 307,
                "guests": 1,
                "check_in": today_plus(1),
                "check_out": today_plus(3)
            })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "AUTHORIZATION");
}
