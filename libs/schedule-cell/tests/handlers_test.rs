// libs/schedule-cell/tests/handlers_test.rs

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use schedule_cell::{schedule_routes, ScheduleState};
use shared_utils::test_utils::{TestConfig, TestProviders};

fn create_test_state() -> Arc<ScheduleState> {
    let providers = TestProviders::write_file(&TestProviders::sample_json());
    let config = TestConfig::default()
        .with_providers_path(&providers.path().to_string_lossy())
        .to_app_config();
    Arc::new(ScheduleState::from_config(config).unwrap())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_time_labels_come_from_config() {
    let app = schedule_routes(create_test_state());

    let (status, body) = send(&app, "GET", "/time-labels", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 4);
    assert_eq!(body["time_labels"][0], "9:00 AM");
}

#[tokio::test]
async fn test_set_and_read_slots() {
    let app = schedule_routes(create_test_state());

    let (status, body) = send(
        &app,
        "PUT",
        "/days/2025-05-05/slots",
        Some(json!({"time": "9:00 AM", "count": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["day_total"], 3);

    let (_, body) = send(
        &app,
        "POST",
        "/days/2025-05-05/slots/adjust",
        Some(json!({"time": "9:00 AM", "delta": -5})),
    )
    .await;
    assert_eq!(body["count"], 0);

    send(&app, "PUT", "/days/2025-05-05/slots", Some(json!({"time": "10:00 AM", "count": 2}))).await;

    let (status, body) = send(&app, "GET", "/days/2025-05-05", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["total_slots"], 2);
    assert_eq!(body["slots"].as_array().unwrap().len(), 4);
    assert_eq!(body["slots"][1]["time"], "10:00 AM");
    assert_eq!(body["slots"][1]["count"], 2);
    assert_eq!(body["edit_allowed"], true);
}

#[tokio::test]
async fn test_day_off_blocks_edits_and_hides_availability() {
    let app = schedule_routes(create_test_state());

    send(&app, "PUT", "/days/2025-05-05/slots", Some(json!({"time": "9:00 AM", "count": 3}))).await;

    let (status, body) = send(&app, "POST", "/days/2025-05-05/day-off/toggle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["day_off"], true);

    let (_, body) = send(&app, "GET", "/days/2025-05-05/available", None).await;
    assert_eq!(body["total_slots"], 0);
    assert_eq!(body["available_slots"], json!([]));

    let (status, body) = send(
        &app,
        "PUT",
        "/days/2025-05-05/slots",
        Some(json!({"time": "9:00 AM", "count": 8})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("day is off"));

    let (_, body) = send(&app, "PUT", "/days/2025-05-05/day-off", Some(json!({"day_off": false}))).await;
    assert_eq!(body["day_off"], false);

    let (_, body) = send(&app, "GET", "/days/2025-05-05/available", None).await;
    assert_eq!(body["total_slots"], 3);
    assert_eq!(body["available_slots"][0]["time"], "9:00 AM");
}

#[tokio::test]
async fn test_copy_settings_across_week() {
    let app = schedule_routes(create_test_state());

    send(&app, "PUT", "/days/2025-05-05/slots", Some(json!({"time": "11:00 AM", "count": 2}))).await;

    let (status, body) = send(
        &app,
        "POST",
        "/days/2025-05-05/copy",
        Some(json!({"targets": ["2025-05-06"], "weekdays": ["Wed", "Mon"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["copied"], 2);
    assert_eq!(body["targets"], json!(["2025-05-06", "2025-05-07"]));

    let (_, body) = send(&app, "GET", "/weeks/2025-05-08", None).await;
    assert_eq!(body["anchor"], "2025-05-05");
    assert_eq!(body["totals"]["total_slots"], 6);
    assert_eq!(body["totals"]["day_off_count"], 0);
    assert_eq!(body["days"][2]["total_slots"], 2);
}

#[tokio::test]
async fn test_copy_settings_whole_month() {
    let app = schedule_routes(create_test_state());

    send(&app, "PUT", "/days/2025-05-05/slots", Some(json!({"time": "9:00 AM", "count": 1}))).await;

    let (_, body) = send(&app, "POST", "/days/2025-05-05/copy", Some(json!({"whole_month": true}))).await;
    assert_eq!(body["copied"], 3);

    let (status, body) = send(&app, "GET", "/months/2025-05-20", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totals"]["total_slots"], 4);
    assert_eq!(body["totals"]["scheduled_day_count"], 4);
    assert_eq!(body["totals"]["total_days_in_month"], 31);
    assert_eq!(body["weeks"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_service_time_round_trip() {
    let app = schedule_routes(create_test_state());

    let (_, body) = send(
        &app,
        "PUT",
        "/days/2025-05-07/service-time",
        Some(json!({"label": "20 min per patient"})),
    )
    .await;
    assert_eq!(body["service_time"], "20 min per patient");

    let (_, body) = send(&app, "GET", "/days/2025-05-07", None).await;
    assert_eq!(body["summary"]["service_time"], "20 min per patient");

    let (_, body) = send(&app, "PUT", "/days/2025-05-07/service-time", Some(json!({"label": "  "}))).await;
    assert_eq!(body["service_time"], Value::Null);
}

#[tokio::test]
async fn test_invalid_input_is_rejected() {
    let app = schedule_routes(create_test_state());

    let (status, body) = send(&app, "GET", "/days/2025-02-30", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("2025-02-30"));

    let (status, _) = send(&app, "GET", "/months/yesterday", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PUT",
        "/days/2025-05-05/slots",
        Some(json!({"time": "4:45 AM", "count": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_provider_available_times() {
    let app = schedule_routes(create_test_state());

    let (status, body) = send(&app, "GET", "/providers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);

    let (status, body) = send(&app, "GET", "/providers/P/available-times?date=2025-05-03", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available_times"], json!(["09:00", "10:30"]));

    let (status, body) = send(&app, "GET", "/providers/P/available-times?date=2025-05-04", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available_times"], json!([]));

    let (status, _) = send(&app, "GET", "/providers/nobody/available-times?date=2025-05-04", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
