//! Reservation API Tests

use axum::http::StatusCode;
use chrono::{Duration, NaiveDate, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::atomic::Ordering;
use uuid::Uuid;

use library_gateway::domain::{Reservation, ReservationStatus};

use crate::common::{book_uid, library_uid, TestApp, BOOK_UID, LIBRARY_UID, USER};

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn take_body(till_date: NaiveDate) -> Value {
    json!({
        "bookUid": BOOK_UID,
        "libraryUid": LIBRARY_UID,
        "tillDate": till_date.to_string(),
    })
}

fn rented(till_date: NaiveDate) -> Reservation {
    Reservation {
        reservation_uid: Uuid::new_v4(),
        user_name: USER.into(),
        book_uid: book_uid(),
        library_uid: library_uid(),
        status: ReservationStatus::Rented,
        start_date: till_date - Duration::days(14),
        till_date,
    }
}

#[tokio::test]
async fn test_take_book_returns_reservation_with_rating() {
    let app = TestApp::new();
    let till_date = today() + Duration::days(10);

    let (status, body) = app
        .post("/api/v1/reservations", Some(USER), take_body(till_date))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "RENTED");
    assert_eq!(body["startDate"], today().to_string());
    assert_eq!(body["tillDate"], till_date.to_string());
    assert_eq!(body["book"]["bookUid"], BOOK_UID);
    assert_eq!(body["book"]["condition"], "EXCELLENT");
    assert_eq!(body["library"]["libraryUid"], LIBRARY_UID);
    assert_eq!(body["rating"]["stars"], 75);
    assert!(body["reservationUid"].as_str().unwrap().parse::<Uuid>().is_ok());

    // The copy left the shelf and the rented count went up by one
    assert_eq!(app.catalog.available(book_uid(), library_uid()), 0);
    let (_, listed) = app.get("/api/v1/reservations", Some(USER)).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["reservationUid"], body["reservationUid"]);
}

#[tokio::test]
async fn test_take_book_over_limit_is_forbidden() {
    let app = TestApp::new();
    app.ratings.set(USER, 1);
    app.reservations.insert(rented(today() + Duration::days(3)));

    let (status, body) = app
        .post(
            "/api/v1/reservations",
            Some(USER),
            take_body(today() + Duration::days(10)),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["message"].as_str().unwrap().contains("rating of 1"));
    assert_eq!(app.catalog.available(book_uid(), library_uid()), 1);
    assert_eq!(app.reservations.all().len(), 1);
}

#[tokio::test]
async fn test_take_unknown_book_is_not_found() {
    let app = TestApp::new();
    let body = json!({
        "bookUid": Uuid::new_v4(),
        "libraryUid": LIBRARY_UID,
        "tillDate": (today() + Duration::days(1)).to_string(),
    });

    let (status, _) = app.post("/api/v1/reservations", Some(USER), body).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app.reservations.all().is_empty());
}

#[tokio::test]
async fn test_take_book_in_the_past_is_bad_request() {
    let app = TestApp::new();

    let (status, _) = app
        .post(
            "/api/v1/reservations",
            Some(USER),
            take_body(today() - Duration::days(1)),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/v1/reservations",
            Some(USER),
            json!({ "bookUid": "not-a-uuid" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 10002);
}

#[tokio::test]
async fn test_missing_user_header_is_bad_request() {
    let app = TestApp::new();

    let (status, _) = app.get("/api/v1/reservations", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/v1/reservations",
            None,
            take_body(today() + Duration::days(1)),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_failed_check_out_closes_reservation() {
    let app = TestApp::new();
    app.catalog.fail_check_out.store(true, Ordering::SeqCst);

    let (status, body) = app
        .post(
            "/api/v1/reservations",
            Some(USER),
            take_body(today() + Duration::days(5)),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error");

    let reservations = app.reservations.all();
    assert_eq!(reservations.len(), 1);
    assert_eq!(reservations[0].status, ReservationStatus::Returned);
}

#[tokio::test]
async fn test_return_in_time_and_same_condition_adds_a_star() {
    let app = TestApp::new();
    let till_date = today() + Duration::days(10);
    let (_, taken) = app
        .post("/api/v1/reservations", Some(USER), take_body(till_date))
        .await;
    let uid = taken["reservationUid"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(
            &format!("/api/v1/reservations/{}/return", uid),
            Some(USER),
            json!({ "condition": "EXCELLENT", "date": today().to_string() }),
        )
        .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
    assert_eq!(app.ratings.stars_of(USER), Some(76));
    assert_eq!(app.catalog.available(book_uid(), library_uid()), 1);

    let (_, listed) = app.get("/api/v1/reservations", Some(USER)).await;
    assert_eq!(listed[0]["status"], "RETURNED");
}

#[tokio::test]
async fn test_repeated_return_changes_nothing() {
    let app = TestApp::new();
    let (_, taken) = app
        .post(
            "/api/v1/reservations",
            Some(USER),
            take_body(today() + Duration::days(10)),
        )
        .await;
    let uri = format!(
        "/api/v1/reservations/{}/return",
        taken["reservationUid"].as_str().unwrap()
    );
    let body = json!({ "condition": "EXCELLENT", "date": today().to_string() });

    let (status, _) = app.post(&uri, Some(USER), body.clone()).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.ratings.stars_of(USER), Some(76));
    assert_eq!(app.catalog.available(book_uid(), library_uid()), 1);

    for _ in 0..2 {
        let (status, _) = app.post(&uri, Some(USER), body.clone()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
    assert_eq!(app.ratings.stars_of(USER), Some(76));
    assert_eq!(app.catalog.available(book_uid(), library_uid()), 1);
    assert_eq!(app.reservations.all()[0].status, ReservationStatus::Returned);
}

#[tokio::test]
async fn test_late_return_in_worse_condition_costs_twenty() {
    let app = TestApp::new();
    let reservation = rented(today() - Duration::days(2));
    let uid = reservation.reservation_uid;
    app.reservations.insert(reservation);

    let (status, _) = app
        .post(
            &format!("/api/v1/reservations/{}/return", uid),
            Some(USER),
            json!({ "condition": "BAD", "date": today().to_string() }),
        )
        .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.ratings.stars_of(USER), Some(55));
    assert_eq!(app.reservations.all()[0].status, ReservationStatus::Expired);
}

#[tokio::test]
async fn test_return_of_someone_elses_reservation_is_not_found() {
    let app = TestApp::new();
    let reservation = rented(today() + Duration::days(2));
    let uid = reservation.reservation_uid;
    app.reservations.insert(reservation);

    let (status, _) = app
        .post(
            &format!("/api/v1/reservations/{}/return", uid),
            Some("Someone Else"),
            json!({ "condition": "GOOD", "date": today().to_string() }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.reservations.all()[0].status, ReservationStatus::Rented);
}

#[tokio::test]
async fn test_return_with_invalid_uid_is_bad_request() {
    let app = TestApp::new();

    let (status, _) = app
        .post(
            "/api/v1/reservations/not-a-uuid/return",
            Some(USER),
            json!({ "condition": "GOOD", "date": today().to_string() }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_no_reservations_is_empty_list() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/v1/reservations", Some("Nobody")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_upstream_outage_is_generic_server_error() {
    let app = TestApp::new();
    app.ratings.down.store(true, Ordering::SeqCst);

    let (status, body) = app
        .post(
            "/api/v1/reservations",
            Some(USER),
            take_body(today() + Duration::days(3)),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "code": 10000, "message": "Internal server error" }));
}
