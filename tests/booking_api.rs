// tests/booking_api.rs

use std::time::Duration;

use besmi::{
    common::error::AppError,
    middleware::auth::UpstreamCredentials,
    models::booking::AppointmentStatus,
    repo::{AppointmentAction, BookingRepository, HttpBookingRepository},
};
use serde_json::json;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn repo(server: &MockServer) -> HttpBookingRepository {
    HttpBookingRepository::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

fn bearer() -> UpstreamCredentials {
    UpstreamCredentials::Bearer("token-123".into())
}

#[tokio::test]
async fn fetches_appointments_with_forwarded_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/appointments"))
        .and(header("authorization", "Bearer token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "startTime": "2026-10-16T14:00:00Z",
                "endTime": "2026-10-16T15:00:00Z",
                "status": "confirmed",
                "client": { "id": 7, "firstName": "Ana", "lastName": "Silva", "email": "ana@example.com" },
                "service": { "id": 3, "name": "Classic Set", "price": "120.00" }
            },
            { "broken": true }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let appointments = repo(&server).fetch_appointments(&bearer()).await.unwrap();

    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].id, "1");
    assert_eq!(appointments[0].status, AppointmentStatus::Confirmed);
}

#[tokio::test]
async fn forwards_session_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/services"))
        .and(header("cookie", "connect.sid=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "s-1", "name": "Lash Lift", "price": "75" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let creds = UpstreamCredentials::Cookie("connect.sid=abc".into());
    let services = repo(&server).fetch_services(&creds).await.unwrap();
    assert_eq!(services.len(), 1);
}

#[tokio::test]
async fn missing_business_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/business"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let business = repo(&server).fetch_business(&bearer()).await.unwrap();
    assert!(business.is_none());
}

#[tokio::test]
async fn null_business_body_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/business"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&server)
        .await;

    let business = repo(&server).fetch_business(&bearer()).await.unwrap();
    assert!(business.is_none());
}

#[tokio::test]
async fn non_array_snapshot_is_treated_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/appointments/pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "loading" })))
        .mount(&server)
        .await;

    let pending = repo(&server).fetch_pending_appointments(&bearer()).await.unwrap();
    assert!(pending.is_empty());
}

#[tokio::test]
async fn unauthorized_upstream_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clients"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = repo(&server).fetch_clients(&bearer()).await.unwrap_err();
    assert!(matches!(err, AppError::UpstreamUnauthorized { status: 401 }));
}

#[tokio::test]
async fn server_errors_carry_status_and_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/appointments"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = repo(&server).fetch_appointments(&bearer()).await.unwrap_err();
    match err {
        AppError::UpstreamStatus { status, path, body } => {
            assert_eq!(status, 503);
            assert_eq!(path, "/api/appointments");
            assert_eq!(body, "maintenance");
        }
        other => panic!("erro inesperado: {other:?}"),
    }
}

#[tokio::test]
async fn confirm_and_deny_post_to_the_action_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/appointments/apt-9/confirm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/appointments/apt-9/deny"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let repo = repo(&server);
    repo.apply_action(&bearer(), "apt-9", AppointmentAction::Confirm).await.unwrap();
    repo.apply_action(&bearer(), "apt-9", AppointmentAction::Deny).await.unwrap();
}

#[tokio::test]
async fn action_on_unknown_appointment_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/appointments/missing/confirm"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = repo(&server)
        .apply_action(&bearer(), "missing", AppointmentAction::Confirm)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
