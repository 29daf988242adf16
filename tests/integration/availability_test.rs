//! Availability and conflict-detection scenarios.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

fn reservation_body(room: i32, check_in: &str, check_out: &str) -> serde_json::Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.com",
        "room_number": room,
        "guests": 2,
        "check_in": check_in,
        "check_out": check_out
    })
}

#[tokio::test]
async fn overlapping_reservation_is_rejected() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    app.seed_room(101, "double", 120.0, 2).await;

    let (status, _) = app
        .request(
            "POST",
            "/api/reservations",
            Some(&token),
            Some(reservation_body(101, "2030-08-03", "2030-08-06")),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // Overlaps [08-03, 08-06) on the same room.
    let (status, body) = app
        .request(
            "POST",
            "/api/reservations",
            Some(&token),
            Some(reservation_body(101, "2030-08-05", "2030-08-08")),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "ROOM_UNAVAILABLE");
}

#[tokio::test]
async fn back_to_back_stays_do_not_conflict() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    app.seed_room(102, "double", 120.0, 2).await;

    let (status, _) = app
        .request(
            "POST",
            "/api/reservations",
            Some(&token),
            Some(reservation_body(102, "2030-08-03", "2030-08-06")),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // Checkout day equals the next check-in day: no overlap.
    let (status, _) = app
        .request(
            "POST",
            "/api/reservations",
            Some(&token),
            Some(reservation_body(102, "2030-08-06", "2030-08-09")),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn available_rooms_excludes_conflicting_and_unbookable() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    app.seed_room(201, "single", 80.0, 1).await;
    app.seed_room(202, "single", 90.0, 1).await;
    app.seed_room(203, "suite", 250.0, 4).await;

    // Room 201 is booked over the probe range.
    let (status, _) = app
        .request(
            "POST",
            "/api/reservations",
            Some(&token),
            Some(reservation_body(201, "2030-09-10", "2030-09-12")),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // Room 203 is under maintenance.
    let (status, _) = app
        .request(
            "PUT",
            "/api/rooms/203/status",
            Some(&token),
            Some(json!({ "status": "maintenance" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request(
            "GET",
            "/api/rooms/available?check_in=2030-09-10&check_out=2030-09-12",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let numbers: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|room| room["number"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![202]);
}

#[tokio::test]
async fn maintenance_room_refuses_new_bookings() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    app.seed_room(204, "double", 120.0, 2).await;

    let (status, _) = app
        .request(
            "PUT",
            "/api/rooms/204/status",
            Some(&token),
            Some(json!({ "status": "maintenance" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request(
            "POST",
            "/api/reservations",
            Some(&token),
            Some(reservation_body(204, "2030-10-01", "2030-10-03")),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "ROOM_UNAVAILABLE");
}

#[tokio::test]
async fn availability_rejects_inverted_range() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let (status, body) = app
        .request(
            "GET",
            "/api/rooms/available?check_in=2030-09-12&check_out=2030-09-10",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION");
}
