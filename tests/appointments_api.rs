//! Drives the full router against the in-memory store.

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request, StatusCode},
    Router,
};
use clinic_appointments::{app, AppState, MemoryStore};
use serde_json::{json, Value};
use tower::ServiceExt;

fn router() -> Router {
    app(AppState::new(MemoryStore::new()), &[])
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(router, method, uri, body).await;
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn booking(id: &str, date: &str, slot: i32, mobile: &str) -> Value {
    json!({
        "id": id,
        "serviceId": "cleaning",
        "date": date,
        "doctorId": "dr-1",
        "slot": slot,
        "patientName": "Ana Ruiz",
        "patientEmail": "ana@example.com",
        "patientMobile": mobile
    })
}

#[tokio::test]
async fn booking_lifecycle() {
    let app = router();

    let (status, created) =
        send_json(&app, Method::POST, "/appointments", Some(booking("a1", "2024-01-10", 3, "555-1111"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "Scheduled");

    let (status, fetched) = send_json(&app, Method::GET, "/appointment/a1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["appointment_id"], "a1");
    assert_eq!(fetched["service_id"], "cleaning");
    assert_eq!(fetched["appointment_date"], "2024-01-10");
    assert_eq!(fetched["doctor_id"], "dr-1");
    assert_eq!(fetched["slot"], 3);
    assert_eq!(fetched["patient_name"], "Ana Ruiz");
    assert_eq!(fetched["patient_email"], "ana@example.com");
    assert_eq!(fetched["patient_mobile"], "555-1111");

    let (status, completed) = send_json(&app, Method::PUT, "/appointments/a1/complete", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completed["msg"], "Appointment updated successfully");
    assert_eq!(completed["appointment"]["status"], "Completed");

    let (status, deleted) = send_json(&app, Method::DELETE, "/appointments/a1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "msg": "Appointment deleted successfully" }));

    let (status, missing) = send_json(&app, Method::GET, "/appointment/a1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing, json!({ "msg": "Appointment not found" }));
}

#[tokio::test]
async fn completing_twice_is_not_an_error() {
    let app = router();
    send(&app, Method::POST, "/appointments", Some(booking("a2", "2024-01-10", 1, "1"))).await;

    for _ in 0..2 {
        let (status, body) = send_json(&app, Method::PUT, "/appointments/a2/complete", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["appointment"]["status"], "Completed");
    }
}

#[tokio::test]
async fn missing_ids_are_404_not_500() {
    let app = router();

    let (status, body) = send_json(&app, Method::PUT, "/appointments/ghost/complete", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Appointment not found");

    let (status, body) = send_json(&app, Method::DELETE, "/appointments/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Appointment not found");
}

#[tokio::test]
async fn list_by_date_returns_only_that_day_in_slot_order() {
    let app = router();
    for (id, date, slot) in [
        ("late", "2024-03-01", 9),
        ("early", "2024-03-01", 1),
        ("mid", "2024-03-01", 4),
        ("next-day", "2024-03-02", 2),
    ] {
        let (status, _) = send(&app, Method::POST, "/appointments", Some(booking(id, date, slot, "1"))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send_json(&app, Method::GET, "/appointments/2024-03-01", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["appointment_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["early", "mid", "late"]);

    let (status, body) = send_json(&app, Method::GET, "/appointments/2024-12-25", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn history_returns_only_that_mobile_newest_first() {
    let app = router();
    send(&app, Method::POST, "/appointments", Some(booking("h1", "2023-01-05", 1, "555-2222"))).await;
    send(&app, Method::POST, "/appointments", Some(booking("h2", "2024-07-20", 1, "555-2222"))).await;
    send(&app, Method::POST, "/appointments", Some(booking("h3", "2024-02-11", 2, "555-2222"))).await;
    send(&app, Method::POST, "/appointments", Some(booking("x1", "2024-09-01", 1, "555-9999"))).await;

    let (status, body) = send_json(&app, Method::GET, "/appointments/history/555-2222", None).await;
    assert_eq!(status, StatusCode::OK);
    let dates: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["appointment_date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-07-20", "2024-02-11", "2023-01-05"]);

    let (status, body) = send_json(&app, Method::GET, "/appointments/history/000", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn duplicate_id_is_a_generic_server_error() {
    let app = router();
    let (status, _) = send(&app, Method::POST, "/appointments", Some(booking("dup", "2024-01-10", 1, "1"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/appointments", Some(booking("dup", "2024-01-11", 2, "1"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, b"Server Error");
}

#[tokio::test]
async fn status_in_payload_is_ignored() {
    let app = router();
    let mut body = booking("s1", "2024-01-10", 1, "1");
    body["status"] = json!("Completed");
    let (status, created) = send_json(&app, Method::POST, "/appointments", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "Scheduled");
}

#[tokio::test]
async fn malformed_input_is_a_generic_server_error() {
    let app = router();

    let (status, body) = send(&app, Method::GET, "/appointments/Jan%2010%202024", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, b"Server Error");

    let mut bad_date = booking("m1", "2024-01-10", 1, "1");
    bad_date["date"] = json!("2024-13-10");
    let (status, body) = send(&app, Method::POST, "/appointments", Some(bad_date)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, b"Server Error");

    let (status, body) = send(&app, Method::POST, "/appointments", Some(json!({ "id": "x" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, b"Server Error");
}

#[tokio::test]
async fn slot_may_be_sent_as_a_numeric_string() {
    let app = router();

    let mut body = booking("z", "2024-01-10", 0, "1");
    body["slot"] = json!("3");
    let (status, created) = send_json(&app, Method::POST, "/appointments", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["slot"], 3);

    let mut body = booking("z2", "2024-01-10", 0, "1");
    body["slot"] = json!("morning");
    let (status, _) = send(&app, Method::POST, "/appointments", Some(body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn appointment_with_id_history_can_be_completed() {
    let app = router();
    let (status, _) =
        send(&app, Method::POST, "/appointments", Some(booking("history", "2024-01-10", 1, "1"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send_json(&app, Method::PUT, "/appointments/history/complete", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appointment"]["appointment_id"], "history");
    assert_eq!(body["appointment"]["status"], "Completed");

    let (status, _) = send(&app, Method::PUT, "/appointments/history/555-1111", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_allow_list_is_enforced() {
    let allowed = HeaderValue::from_static("https://clinic.example");
    let app = app(AppState::new(MemoryStore::new()), &[allowed.clone()]);

    let request = |origin: &'static str| {
        Request::builder()
            .uri("/health")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(request("https://clinic.example")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&allowed)
    );

    let response = app.oneshot(request("https://evil.example")).await.unwrap();
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn permissive_cors_by_default() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "https://anywhere.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn operational_routes() {
    let app = router();

    let (status, body) = send_json(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, body) = send_json(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    let (status, body) = send_json(&app, Method::GET, "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "clinic-appointments");

    let (status, body) = send_json(&app, Method::GET, "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().unwrap();
    for path in [
        "/appointments",
        "/appointments/{date}",
        "/appointment/{id}",
        "/appointments/{id}/complete",
        "/appointments/{id}",
        "/appointments/history/{mobile}",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}
