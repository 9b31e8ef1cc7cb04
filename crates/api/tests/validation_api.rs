//! HTTP-level request validation tests.
//!
//! Every request here is rejected before the handler touches the database,
//! so the router runs over a lazily connected pool that never opens a
//! connection.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_offline_app, get, post_json, post_raw, put_json};
use serde_json::json;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Student payloads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_student_with_short_document_number_is_rejected() {
    let response = post_json(
        build_offline_app(),
        "/api/v1/students",
        json!({
            "name": "Maria Silva",
            "document_number": "1234567890",
            "email": "maria@example.com"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["details"]["document_number"],
        "must contain exactly 11 numeric digits"
    );
    assert!(json["details"].get("name").is_none());
}

#[tokio::test]
async fn create_student_with_formatted_document_number_is_rejected() {
    let response = post_json(
        build_offline_app(),
        "/api/v1/students",
        json!({
            "name": "Maria Silva",
            "document_number": "123.456.789-01",
            "email": "maria@example.com"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["details"]["document_number"].is_string());
}

#[tokio::test]
async fn create_student_with_bad_email_is_rejected() {
    let response = post_json(
        build_offline_app(),
        "/api/v1/students",
        json!({
            "name": "Maria Silva",
            "document_number": "12345678901",
            "email": "maria@example"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["details"]["email"], "invalid email format");
}

#[tokio::test]
async fn create_student_with_missing_fields_reports_all_of_them() {
    let response = post_json(build_offline_app(), "/api/v1/students", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let details = json["details"].as_object().expect("details should be an object");
    assert!(details.contains_key("name"));
    assert!(details.contains_key("document_number"));
    assert!(details.contains_key("email"));
}

#[tokio::test]
async fn update_student_with_blank_name_is_rejected() {
    let response = put_json(
        build_offline_app(),
        "/api/v1/students/1",
        json!({ "name": "   " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["details"]["name"], "must not be blank");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let response = post_raw(build_offline_app(), "/api/v1/students", "{\"name\": ").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Course payloads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_course_with_blank_name_is_rejected() {
    let response = post_json(
        build_offline_app(),
        "/api/v1/students/1/courses",
        json!({ "name": "" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["details"]["name"], "must not be blank");
}

#[tokio::test]
async fn complete_course_without_score_is_rejected() {
    let response = put_json(
        build_offline_app(),
        "/api/v1/students/1/courses/1/complete",
        json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["details"]["score"], "score is required");
}

#[tokio::test]
async fn complete_course_with_out_of_range_score_is_rejected() {
    for score in [-0.1, 10.5] {
        let response = put_json(
            build_offline_app(),
            "/api/v1/students/1/courses/1/complete",
            json!({ "score": score }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "score {score}");
        let json = body_json(response).await;
        assert_eq!(json["details"]["score"], "score must be between 0.0 and 10.0");
    }
}

// ---------------------------------------------------------------------------
// Path and query parameters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_numeric_student_id_returns_json_bad_request() {
    let response = get(build_offline_app(), "/api/v1/students/abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn non_numeric_course_id_returns_json_bad_request() {
    let response = put_json(
        build_offline_app(),
        "/api/v1/students/1/courses/first/complete",
        json!({ "score": 8.0 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn unknown_plan_filter_returns_json_bad_request() {
    let response = get(build_offline_app(), "/api/v1/students?plan=gold").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("gold"));
}

#[tokio::test]
async fn invalid_course_state_filter_returns_json_bad_request() {
    let response = get(build_offline_app(), "/api/v1/courses?state=archived").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// General HTTP behaviour
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = get(build_offline_app(), "/api/v1/unknown").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rejected_request_still_carries_request_id() {
    let response = post_json(build_offline_app(), "/api/v1/students", json!({})).await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn cors_preflight_returns_correct_headers() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/students")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = build_offline_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers
            .get("access-control-allow-origin")
            .expect("Missing Access-Control-Allow-Origin header")
            .to_str()
            .unwrap(),
        "http://localhost:5173"
    );
    let allow_methods = headers
        .get("access-control-allow-methods")
        .expect("Missing Access-Control-Allow-Methods header")
        .to_str()
        .unwrap();
    assert!(allow_methods.contains("POST"), "got: {allow_methods}");
}
