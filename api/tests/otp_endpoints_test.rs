//! Integration tests for the OTP HTTP surface.
//!
//! The full route tree is exercised against in-memory collaborators, so
//! these tests cover handler wiring, validation, and error-to-status
//! mapping without a database or messaging provider.

use actix_web::{test, web, App};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use fc_api::app::{configure_api, AppState};
use fc_core::repositories::{
    MockAuditEventRepository, MockClientRepository, MockOtpRepository,
};
use fc_core::services::otp::{OtpService, OtpServiceConfig};
use fc_infra::messaging::MockMessageGateway;

type TestState =
    AppState<MockOtpRepository, MockClientRepository, MockAuditEventRepository, MockMessageGateway>;

struct TestContext {
    otp_repo: Arc<MockOtpRepository>,
    client_repo: Arc<MockClientRepository>,
    gateway: Arc<MockMessageGateway>,
    state: web::Data<TestState>,
}

fn context_with(config: OtpServiceConfig) -> TestContext {
    let otp_repo = Arc::new(MockOtpRepository::new());
    let client_repo = Arc::new(MockClientRepository::new());
    let audit_repo = Arc::new(MockAuditEventRepository::new());
    let gateway = Arc::new(MockMessageGateway::new());

    let service = Arc::new(OtpService::new(
        otp_repo.clone(),
        client_repo.clone(),
        audit_repo.clone(),
        gateway.clone(),
        config,
    ));

    TestContext {
        otp_repo,
        client_repo,
        gateway,
        state: web::Data::new(AppState::new(service, audit_repo)),
    }
}

/// Delivery disabled with echoing on, so tests can read the code from
/// the response instead of reaching into the repository
fn echo_context() -> TestContext {
    context_with(OtpServiceConfig {
        delivery_enabled: false,
        echo_code_when_disabled: true,
        ..Default::default()
    })
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new().app_data($ctx.state.clone()).configure(
                configure_api::<
                    MockOtpRepository,
                    MockClientRepository,
                    MockAuditEventRepository,
                    MockMessageGateway,
                >,
            ),
        )
        .await
    };
}

fn wrong_code(code: &str) -> String {
    let flipped = if code.starts_with('9') { "0" } else { "9" };
    format!("{}{}", flipped, &code[1..])
}

macro_rules! send_otp_for {
    ($app:expr, $client_id:expr) => {{
        let request = test::TestRequest::post()
            .uri("/api/v1/otp/send")
            .set_json(json!({ "client_id": $client_id }))
            .to_request();
        let response = test::call_service($app, request).await;
        assert!(response.status().is_success());
        let body: Value = test::read_body_json(response).await;
        body
    }};
}

#[actix_web::test]
async fn test_health_endpoint() {
    let ctx = echo_context();
    let app = init_app!(ctx);

    let request = test::TestRequest::get().uri("/health").to_request();
    let response = test::call_service(&app, request).await;
    assert!(response.status().is_success());

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_send_echoes_code_when_allowed() {
    let ctx = echo_context();
    let client_id = ctx.client_repo.insert_with_phone("Asha Patel", Some("9876543210"));
    let app = init_app!(ctx);

    let body = send_otp_for!(&app, client_id);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["delivered"], false);

    let code = body["data"]["otp"].as_str().expect("echoed code");
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));

    let expires = body["data"]["expires_in_seconds"].as_i64().unwrap();
    assert!(expires > 0 && expires <= 300);
    let resend_after = body["data"]["resend_after"].as_i64().unwrap();
    assert!(resend_after <= 30);
}

#[actix_web::test]
async fn test_send_delivers_without_echo_by_default() {
    let ctx = context_with(OtpServiceConfig::default());
    let client_id = ctx.client_repo.insert_with_phone("Asha Patel", Some("9876543210"));
    let gateway = ctx.gateway.clone();
    let app = init_app!(ctx);

    let body = send_otp_for!(&app, client_id);
    assert_eq!(body["data"]["delivered"], true);
    assert!(body["data"]["otp"].is_null());

    // Bare 10-digit number was normalized before delivery
    assert_eq!(gateway.sent_count(), 1);
    assert!(gateway.last_code_for("919876543210").is_some());
}

#[actix_web::test]
async fn test_send_unknown_client_returns_404() {
    let ctx = echo_context();
    let app = init_app!(ctx);

    let request = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({ "client_id": Uuid::new_v4() }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status().as_u16(), 404);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "CLIENT_NOT_FOUND");
}

#[actix_web::test]
async fn test_send_without_phone_returns_400() {
    let ctx = echo_context();
    let client_id = ctx.client_repo.insert_with_phone("No Phone", None);
    let app = init_app!(ctx);

    let request = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({ "client_id": client_id }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status().as_u16(), 400);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "NO_PHONE_ON_FILE");
}

#[actix_web::test]
async fn test_verify_wrong_then_correct_then_replay() {
    let ctx = echo_context();
    let client_id = ctx.client_repo.insert_with_phone("Asha Patel", Some("9876543210"));
    let app = init_app!(ctx);

    let body = send_otp_for!(&app, client_id);
    let code = body["data"]["otp"].as_str().unwrap().to_string();

    // Wrong code burns an attempt
    let request = test::TestRequest::post()
        .uri("/api/v1/otp/verify")
        .set_json(json!({ "client_id": client_id, "otp": wrong_code(&code) }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status().as_u16(), 400);
    let error_body: Value = test::read_body_json(response).await;
    assert_eq!(error_body["error"], "INVALID_OTP");
    assert_eq!(error_body["details"]["attempts_left"], 2);

    // Correct code verifies
    let request = test::TestRequest::post()
        .uri("/api/v1/otp/verify")
        .set_json(json!({ "client_id": client_id, "otp": code }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert!(response.status().is_success());
    let verified_body: Value = test::read_body_json(response).await;
    assert_eq!(verified_body["data"]["verified"], true);
    assert_eq!(
        verified_body["data"]["client_id"].as_str().unwrap(),
        client_id.to_string()
    );

    // The consumed code cannot be replayed
    let request = test::TestRequest::post()
        .uri("/api/v1/otp/verify")
        .set_json(json!({ "client_id": client_id, "otp": code }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status().as_u16(), 400);
    let replay_body: Value = test::read_body_json(response).await;
    assert_eq!(replay_body["error"], "INVALID_OTP");
}

#[actix_web::test]
async fn test_malformed_code_does_not_burn_attempt() {
    let ctx = echo_context();
    let client_id = ctx.client_repo.insert_with_phone("Asha Patel", Some("9876543210"));
    let otp_repo = ctx.otp_repo.clone();
    let app = init_app!(ctx);

    send_otp_for!(&app, client_id);

    let request = test::TestRequest::post()
        .uri("/api/v1/otp/verify")
        .set_json(json!({ "client_id": client_id, "otp": "123" }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");

    assert_eq!(otp_repo.records_for(client_id)[0].attempts, 0);
}

#[actix_web::test]
async fn test_resend_within_cooldown_returns_429() {
    let ctx = echo_context();
    let client_id = ctx.client_repo.insert_with_phone("Asha Patel", Some("9876543210"));
    let otp_repo = ctx.otp_repo.clone();
    let app = init_app!(ctx);

    send_otp_for!(&app, client_id);

    let request = test::TestRequest::post()
        .uri("/api/v1/otp/resend")
        .set_json(json!({ "client_id": client_id }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status().as_u16(), 429);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "RATE_LIMITED");
    let wait_seconds = body["details"]["wait_seconds"].as_i64().unwrap();
    assert!((1..=30).contains(&wait_seconds));

    // No new record was created by the rejected resend
    assert_eq!(otp_repo.total_count(), 1);
}

#[actix_web::test]
async fn test_resend_after_consume_is_not_throttled() {
    let ctx = echo_context();
    let client_id = ctx.client_repo.insert_with_phone("Asha Patel", Some("9876543210"));
    let app = init_app!(ctx);

    let body = send_otp_for!(&app, client_id);
    let code = body["data"]["otp"].as_str().unwrap().to_string();

    let request = test::TestRequest::post()
        .uri("/api/v1/otp/verify")
        .set_json(json!({ "client_id": client_id, "otp": code }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert!(response.status().is_success());

    let request = test::TestRequest::post()
        .uri("/api/v1/otp/resend")
        .set_json(json!({ "client_id": client_id }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert!(response.status().is_success());
}

#[actix_web::test]
async fn test_status_endpoint() {
    let ctx = echo_context();
    let client_id = ctx.client_repo.insert_with_phone("Asha Patel", Some("9876543210"));
    let app = init_app!(ctx);

    let request = test::TestRequest::get()
        .uri(&format!("/api/v1/otp/status/{}", client_id))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert!(response.status().is_success());
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["data"]["has_active_otp"], false);

    let sent = send_otp_for!(&app, client_id);
    let code = sent["data"]["otp"].as_str().unwrap().to_string();

    let request = test::TestRequest::get()
        .uri(&format!("/api/v1/otp/status/{}", client_id))
        .to_request();
    let response = test::call_service(&app, request).await;
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["data"]["has_active_otp"], true);
    assert_eq!(body["data"]["is_used"], false);
    assert!(body["data"]["expires_in_seconds"].as_i64().unwrap() > 0);

    let request = test::TestRequest::post()
        .uri("/api/v1/otp/verify")
        .set_json(json!({ "client_id": client_id, "otp": code }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert!(response.status().is_success());

    // A consumed code still shows up in the status, flagged as used
    let request = test::TestRequest::get()
        .uri(&format!("/api/v1/otp/status/{}", client_id))
        .to_request();
    let response = test::call_service(&app, request).await;
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["data"]["has_active_otp"], false);
    assert_eq!(body["data"]["is_used"], true);
    assert_eq!(body["data"]["attempts"], 1);
}

#[actix_web::test]
async fn test_delivery_failure_returns_502_but_code_stays_valid() {
    let ctx = context_with(OtpServiceConfig::default());
    let client_id = ctx.client_repo.insert_with_phone("Asha Patel", Some("9876543210"));
    let otp_repo = ctx.otp_repo.clone();
    ctx.gateway.set_fail(true);
    let app = init_app!(ctx);

    let request = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({ "client_id": client_id }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status().as_u16(), 502);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "DELIVERY_FAILED");

    // The issued code survived the delivery failure
    let code = otp_repo.records_for(client_id)[0].code.clone();
    let request = test::TestRequest::post()
        .uri("/api/v1/otp/verify")
        .set_json(json!({ "client_id": client_id, "otp": code }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert!(response.status().is_success());
}

#[actix_web::test]
async fn test_audit_list_and_mark_read() {
    let ctx = echo_context();
    let client_id = ctx.client_repo.insert_with_phone("Asha Patel", Some("9876543210"));
    let app = init_app!(ctx);

    send_otp_for!(&app, client_id);

    let request = test::TestRequest::get()
        .uri(&format!("/api/v1/audit/client/{}", client_id))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert!(response.status().is_success());
    let body: Value = test::read_body_json(response).await;
    let events = body["data"].as_array().unwrap();
    assert!(!events.is_empty());
    assert_eq!(events[0]["event_type"], "OTP_ISSUED");
    assert_eq!(events[0]["is_read"], false);

    let event_id = events[0]["id"].as_str().unwrap();
    let request = test::TestRequest::post()
        .uri(&format!("/api/v1/audit/events/{}/read", event_id))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert!(response.status().is_success());

    let request = test::TestRequest::post()
        .uri(&format!("/api/v1/audit/events/{}/read", Uuid::new_v4()))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status().as_u16(), 404);
}
