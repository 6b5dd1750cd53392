use std::time::Duration;

use floward_shared::routes;
use serde_json::json;

use super::{Control, Outcome, UiAction};
use crate::config::ClientConfig;
use crate::domain::{
    ACCESS_TOKEN_KEY, DEVICE_NAME_KEY, EMAIL_KEY, FormField, FormMode, LoginMethod,
    NotificationKind, REFRESH_TOKEN_KEY,
};
use crate::error::ClientError;
use crate::i18n::{Locale, MessageKey};
use crate::testing::{FixedProbe, Harness};

fn edit(field: FormField, value: &str) -> UiAction {
    UiAction::EditField {
        field,
        value: value.to_string(),
    }
}

async fn fill_login(harness: &Harness, password: &str) {
    let c = &harness.controller;
    c.dispatch(edit(FormField::LoginEmail, "user@example.com")).await;
    c.dispatch(edit(FormField::LoginPassword, password)).await;
    c.dispatch(edit(FormField::LoginDeviceName, "My Laptop")).await;
}

async fn fill_register(harness: &Harness, email: &str, password: &str, confirm: &str) {
    let c = &harness.controller;
    c.dispatch(UiAction::SwitchForm(FormMode::Register)).await;
    c.dispatch(edit(FormField::RegisterEmail, email)).await;
    c.dispatch(edit(FormField::RegisterPassword, password)).await;
    c.dispatch(edit(FormField::RegisterConfirmPassword, confirm)).await;
}

fn last_text(harness: &Harness) -> String {
    harness.notifier.last().map(|n| n.text).unwrap_or_default()
}

#[tokio::test]
async fn test_initialize_computes_fingerprint_once() {
    let harness = Harness::new();
    assert_eq!(harness.controller.state().fields.device_id, "");

    harness.controller.initialize().await;
    let device_id = harness.controller.state().fields.device_id;
    assert_eq!(device_id.len(), 64);

    harness.controller.initialize().await;
    assert_eq!(harness.controller.state().fields.device_id, device_id);
}

#[tokio::test]
async fn test_password_login_stores_tokens_and_redirects() {
    let harness = Harness::initialized().await;
    fill_login(&harness, "secret1").await;
    harness.http.respond(
        routes::LOGIN,
        200,
        json!({ "access_token": "A", "refresh_token": "B", "token_type": "bearer" }),
    );

    let outcome = harness.controller.dispatch(UiAction::SubmitLogin).await;
    assert!(matches!(outcome, Outcome::LoggedIn));

    let requests = harness.http.requests();
    assert_eq!(requests.len(), 1);
    let (path, body) = &requests[0];
    assert_eq!(path, routes::LOGIN);
    assert_eq!(body["email"], "user@example.com");
    assert_eq!(body["password"], "secret1");
    assert_eq!(body["device_name"], "My Laptop");
    assert_eq!(body["device_type"], "windows");
    assert_eq!(
        body["device_id"],
        json!(harness.controller.state().fields.device_id)
    );
    assert!(body.get("code").is_none());

    assert_eq!(harness.storage.value(ACCESS_TOKEN_KEY).as_deref(), Some("A"));
    assert_eq!(harness.storage.value(REFRESH_TOKEN_KEY).as_deref(), Some("B"));
    assert_eq!(
        harness.storage.value(EMAIL_KEY).as_deref(),
        Some("user@example.com")
    );
    assert_eq!(
        harness.storage.value(DEVICE_NAME_KEY).as_deref(),
        Some("My Laptop")
    );

    assert_eq!(harness.navigator.visited(), vec!["/dashboard".to_string()]);
    assert_eq!(harness.clock.sleeps(), vec![Duration::from_millis(1_500)]);
    assert_eq!(
        harness.notifier.last().map(|n| n.kind),
        Some(NotificationKind::Success)
    );
    assert!(!harness.controller.state().login_busy);
}

#[tokio::test]
async fn test_login_opens_desktop_app_uri() {
    let harness = Harness::initialized().await;
    fill_login(&harness, "secret1").await;
    harness.http.respond(
        routes::LOGIN,
        200,
        json!({ "access_token": "tok en", "refresh_token": "B" }),
    );

    harness.controller.dispatch(UiAction::SubmitLogin).await;

    let external = harness.navigator.external();
    assert_eq!(external.len(), 1);
    assert_eq!(
        external[0].as_str(),
        "floward://login?email=user%40example.com&token=tok+en&device_name=My+Laptop\
         &api_url=http%3A%2F%2F127.0.0.1%3A8000"
    );
}

#[tokio::test]
async fn test_desktop_app_failure_is_ignored() {
    let harness = Harness::initialized().await;
    harness.navigator.refuse_external();
    fill_login(&harness, "secret1").await;
    harness.http.respond(
        routes::LOGIN,
        200,
        json!({ "access_token": "A", "refresh_token": "B" }),
    );

    let outcome = harness.controller.dispatch(UiAction::SubmitLogin).await;

    assert!(matches!(outcome, Outcome::LoggedIn));
    assert_eq!(harness.navigator.visited(), vec!["/dashboard".to_string()]);
    assert!(
        harness
            .notifier
            .shown()
            .iter()
            .all(|n| n.kind == NotificationKind::Success)
    );
}

#[tokio::test]
async fn test_empty_password_rejected_locally() {
    let harness = Harness::initialized().await;
    fill_login(&harness, "").await;

    let outcome = harness.controller.dispatch(UiAction::SubmitLogin).await;

    assert!(matches!(
        outcome,
        Outcome::Failed(ClientError::Validation(MessageKey::MissingPassword))
    ));
    assert_eq!(harness.http.request_count(), 0);
    assert_eq!(last_text(&harness), "Please enter your password");
    assert!(!harness.controller.state().login_busy);
}

#[tokio::test]
async fn test_login_before_fingerprint_is_rejected() {
    let harness = Harness::new();
    fill_login(&harness, "secret1").await;

    let outcome = harness.controller.dispatch(UiAction::SubmitLogin).await;

    assert!(matches!(
        outcome,
        Outcome::Failed(ClientError::Validation(MessageKey::MissingFields))
    ));
    assert_eq!(harness.http.request_count(), 0);
}

#[tokio::test]
async fn test_code_login_posts_code() {
    let harness = Harness::initialized().await;
    let c = &harness.controller;
    fill_login(&harness, "secret1").await;
    c.dispatch(UiAction::SwitchLoginMethod(LoginMethod::Code)).await;
    c.dispatch(edit(FormField::LoginCode, "123456")).await;
    harness.http.respond(
        routes::LOGIN_WITH_CODE,
        200,
        json!({ "access_token": "A", "refresh_token": "B" }),
    );

    let outcome = c.dispatch(UiAction::SubmitLogin).await;
    assert!(matches!(outcome, Outcome::LoggedIn));

    let (path, body) = &harness.http.requests()[0];
    assert_eq!(path, routes::LOGIN_WITH_CODE);
    assert_eq!(body["code"], "123456");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_empty_code_rejected_locally() {
    let harness = Harness::initialized().await;
    fill_login(&harness, "secret1").await;
    harness
        .controller
        .dispatch(UiAction::SwitchLoginMethod(LoginMethod::Code))
        .await;

    let outcome = harness.controller.dispatch(UiAction::SubmitLogin).await;

    assert!(matches!(
        outcome,
        Outcome::Failed(ClientError::Validation(MessageKey::MissingCode))
    ));
    assert_eq!(harness.http.request_count(), 0);
}

#[tokio::test]
async fn test_switching_method_clears_hidden_values() {
    let harness = Harness::new();
    let c = &harness.controller;
    c.dispatch(edit(FormField::LoginPassword, "secret1")).await;

    c.dispatch(UiAction::SwitchLoginMethod(LoginMethod::Code)).await;
    assert_eq!(c.state().fields.login_password, "");
    assert_eq!(c.state().form.method, LoginMethod::Code);

    c.dispatch(edit(FormField::LoginCode, "654321")).await;
    c.dispatch(UiAction::SwitchLoginMethod(LoginMethod::Password))
        .await;
    assert_eq!(c.state().fields.login_code, "");
    assert_eq!(c.state().form.method, LoginMethod::Password);
}

#[tokio::test]
async fn test_login_rejection_shows_server_detail() {
    let harness = Harness::initialized().await;
    fill_login(&harness, "wrong-password").await;
    harness.http.respond(
        routes::LOGIN,
        401,
        json!({ "detail": "Incorrect email or password" }),
    );

    let outcome = harness.controller.dispatch(UiAction::SubmitLogin).await;

    assert!(matches!(
        outcome,
        Outcome::Failed(ClientError::Rejected { status: 401, .. })
    ));
    assert_eq!(last_text(&harness), "Incorrect email or password");
    assert!(harness.storage.value(ACCESS_TOKEN_KEY).is_none());
    assert!(harness.navigator.visited().is_empty());
    assert!(!harness.controller.state().login_busy);
}

#[tokio::test]
async fn test_login_rejection_without_message_uses_fallback() {
    let harness = Harness::initialized().await;
    fill_login(&harness, "secret1").await;
    harness.http.respond(routes::LOGIN, 500, json!(null));

    harness.controller.dispatch(UiAction::SubmitLogin).await;

    assert_eq!(
        last_text(&harness),
        "Login failed, please check your email and password"
    );
}

#[tokio::test]
async fn test_login_transport_failure() {
    let harness = Harness::initialized().await;
    fill_login(&harness, "secret1").await;
    harness.http.fail(routes::LOGIN, "connection refused");

    let outcome = harness.controller.dispatch(UiAction::SubmitLogin).await;

    assert!(matches!(outcome, Outcome::Failed(ClientError::Transport(_))));
    assert_eq!(last_text(&harness), "Network error, please try again later");
    assert!(!harness.controller.state().login_busy);
}

#[tokio::test]
async fn test_login_without_tokens_is_malformed() {
    let harness = Harness::initialized().await;
    fill_login(&harness, "secret1").await;
    harness.http.respond(routes::LOGIN, 200, json!({ "ok": true }));

    let outcome = harness.controller.dispatch(UiAction::SubmitLogin).await;

    assert!(matches!(
        outcome,
        Outcome::Failed(ClientError::MalformedResponse(_))
    ));
    assert!(harness.navigator.visited().is_empty());
}

#[tokio::test]
async fn test_storage_failure_aborts_redirect() {
    let harness = Harness::initialized().await;
    harness.storage.fail_writes();
    fill_login(&harness, "secret1").await;
    harness.http.respond(
        routes::LOGIN,
        200,
        json!({ "access_token": "A", "refresh_token": "B" }),
    );

    let outcome = harness.controller.dispatch(UiAction::SubmitLogin).await;

    assert!(matches!(outcome, Outcome::Failed(ClientError::Storage(_))));
    assert!(harness.navigator.external().is_empty());
    assert!(harness.navigator.visited().is_empty());

    let shown = harness.notifier.shown();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].kind, NotificationKind::Error);
    assert_eq!(shown[0].text, "Could not save your login, please try again");
}

#[tokio::test]
async fn test_register_short_password_rejected_locally() {
    let harness = Harness::new();
    fill_register(&harness, "new@example.com", "abc", "abc").await;

    let outcome = harness.controller.dispatch(UiAction::SubmitRegister).await;

    assert!(matches!(
        outcome,
        Outcome::Failed(ClientError::Validation(MessageKey::PasswordTooShort {
            min: 6
        }))
    ));
    assert_eq!(harness.http.request_count(), 0);
    assert_eq!(last_text(&harness), "Password must be at least 6 characters");
}

#[tokio::test]
async fn test_register_mismatch_rejected_locally() {
    let harness = Harness::new();
    fill_register(&harness, "new@example.com", "secret1", "secret2").await;

    let outcome = harness.controller.dispatch(UiAction::SubmitRegister).await;

    assert!(matches!(
        outcome,
        Outcome::Failed(ClientError::Validation(MessageKey::PasswordMismatch))
    ));
    assert_eq!(harness.http.request_count(), 0);
    assert!(harness.controller.state().register_confirm_invalid);
}

#[tokio::test]
async fn test_register_success_switches_to_login() {
    let harness = Harness::new();
    fill_register(&harness, "new@example.com", "secret1", "secret1").await;
    harness
        .http
        .respond(routes::REGISTER, 200, json!({ "message": "ok" }));

    let outcome = harness.controller.dispatch(UiAction::SubmitRegister).await;
    assert!(matches!(outcome, Outcome::Registered));

    let (path, body) = &harness.http.requests()[0];
    assert_eq!(path, routes::REGISTER);
    assert_eq!(
        body,
        &json!({ "email": "new@example.com", "password": "secret1" })
    );

    let state = harness.controller.state();
    assert_eq!(state.form.mode, FormMode::Login);
    assert_eq!(state.fields.login_email, "new@example.com");
    assert!(!state.register_busy);
    assert_eq!(last_text(&harness), "Registration successful! Please log in");
}

#[tokio::test]
async fn test_register_duplicate_email_message() {
    let harness = Harness::new();
    fill_register(&harness, "taken@example.com", "secret1", "secret1").await;
    harness.http.respond(
        routes::REGISTER,
        409,
        json!({ "detail": "Email already registered" }),
    );

    harness.controller.dispatch(UiAction::SubmitRegister).await;

    assert_eq!(
        last_text(&harness),
        "This email is already registered, please use another one"
    );
    assert_eq!(harness.controller.state().form.mode, FormMode::Register);
}

#[tokio::test]
async fn test_register_duplicate_email_in_error_envelope() {
    let config = ClientConfig::default().with_locale(Locale::ZhCn);
    let harness = Harness::with(config, FixedProbe::default());
    fill_register(&harness, "taken@example.com", "secret1", "secret1").await;
    harness.http.respond(
        routes::REGISTER,
        400,
        json!({ "error": { "code": "UNKNOWN_ERROR", "message": "Email already registered" } }),
    );

    harness.controller.dispatch(UiAction::SubmitRegister).await;

    assert_eq!(last_text(&harness), "该邮箱已被注册，请更换邮箱");
}

#[tokio::test]
async fn test_register_duplicate_email_with_malformed_error_field() {
    let harness = Harness::new();
    fill_register(&harness, "taken@example.com", "secret1", "secret1").await;
    harness.http.respond(
        routes::REGISTER,
        409,
        json!({ "detail": "Email already registered", "error": "oops" }),
    );

    harness.controller.dispatch(UiAction::SubmitRegister).await;

    assert_eq!(
        last_text(&harness),
        "This email is already registered, please use another one"
    );
}

#[tokio::test]
async fn test_register_transport_failure() {
    let harness = Harness::new();
    fill_register(&harness, "new@example.com", "secret1", "secret1").await;
    harness.http.fail(routes::REGISTER, "connection refused");

    let outcome = harness.controller.dispatch(UiAction::SubmitRegister).await;

    assert!(matches!(outcome, Outcome::Failed(ClientError::Transport(_))));
    assert_eq!(last_text(&harness), "Network error, please try again later");
    let state = harness.controller.state();
    assert!(!state.register_busy);
    assert_eq!(state.form.mode, FormMode::Register);
}

#[tokio::test]
async fn test_register_other_rejection_uses_server_message() {
    let harness = Harness::new();
    fill_register(&harness, "new@example.com", "secret1", "secret1").await;
    harness.http.respond(
        routes::REGISTER,
        500,
        json!({ "detail": "User registration failed" }),
    );

    harness.controller.dispatch(UiAction::SubmitRegister).await;

    assert_eq!(last_text(&harness), "User registration failed");
}

#[tokio::test]
async fn test_send_code_starts_countdown() {
    let harness = Harness::new();
    let c = &harness.controller;
    c.dispatch(edit(FormField::LoginEmail, "user@example.com"))
        .await;
    harness
        .http
        .respond(routes::SEND_VERIFICATION_CODE, 200, json!({}));

    let outcome = c.dispatch(UiAction::SendVerificationCode).await;
    assert!(matches!(outcome, Outcome::CodeSent));

    let (path, body) = &harness.http.requests()[0];
    assert_eq!(path, routes::SEND_VERIFICATION_CODE);
    assert_eq!(body, &json!({ "email": "user@example.com" }));

    let state = c.state();
    assert_eq!(state.countdown.remaining(), 60);
    assert!(state.send_code_disabled());
    assert!(!state.is_busy(Control::SendCode));
    assert_eq!(c.send_code_label(), "60s until resend");
}

#[tokio::test]
async fn test_send_code_during_countdown_is_noop() {
    let harness = Harness::new();
    let c = &harness.controller;
    c.dispatch(edit(FormField::LoginEmail, "user@example.com"))
        .await;
    harness
        .http
        .respond(routes::SEND_VERIFICATION_CODE, 200, json!({}));
    c.dispatch(UiAction::SendVerificationCode).await;
    c.dispatch(UiAction::CountdownTick).await;

    let outcome = c.dispatch(UiAction::SendVerificationCode).await;

    assert!(matches!(outcome, Outcome::Ignored));
    assert_eq!(harness.http.request_count(), 1);
    assert_eq!(c.state().countdown.remaining(), 59);
}

#[tokio::test]
async fn test_run_countdown_reenables_send() {
    let harness = Harness::new();
    let c = &harness.controller;
    c.dispatch(edit(FormField::LoginEmail, "user@example.com"))
        .await;
    harness
        .http
        .respond(routes::SEND_VERIFICATION_CODE, 200, json!({}));
    c.dispatch(UiAction::SendVerificationCode).await;

    c.run_countdown().await;

    assert_eq!(harness.clock.sleeps().len(), 60);
    assert!(
        harness
            .clock
            .sleeps()
            .iter()
            .all(|d| *d == Duration::from_secs(1))
    );
    assert!(!c.state().send_code_disabled());
    assert_eq!(c.send_code_label(), "Send code");
}

#[tokio::test]
async fn test_send_code_invalid_email_no_request() {
    let harness = Harness::new();
    let c = &harness.controller;
    c.dispatch(edit(FormField::LoginEmail, "not-an-email")).await;

    let outcome = c.dispatch(UiAction::SendVerificationCode).await;

    assert!(matches!(
        outcome,
        Outcome::Failed(ClientError::Validation(MessageKey::InvalidEmail))
    ));
    assert_eq!(harness.http.request_count(), 0);
    assert!(!c.state().send_code_disabled());
}

#[tokio::test]
async fn test_send_code_empty_email_no_request() {
    let harness = Harness::new();
    let c = &harness.controller;

    let outcome = c.dispatch(UiAction::SendVerificationCode).await;

    assert!(matches!(
        outcome,
        Outcome::Failed(ClientError::Validation(MessageKey::MissingFields))
    ));
    assert_eq!(harness.http.request_count(), 0);
    assert_eq!(last_text(&harness), "Please fill in all required fields");
    assert!(!c.state().send_code_disabled());
}

#[tokio::test]
async fn test_send_code_failure_reenables_immediately() {
    let harness = Harness::new();
    let c = &harness.controller;
    c.dispatch(edit(FormField::LoginEmail, "user@example.com"))
        .await;
    harness.http.respond(
        routes::SEND_VERIFICATION_CODE,
        429,
        json!({ "error": { "code": "RATE_LIMITED", "message": "Too many requests" } }),
    );
    harness
        .http
        .fail(routes::SEND_VERIFICATION_CODE, "connection reset");

    c.dispatch(UiAction::SendVerificationCode).await;
    assert_eq!(last_text(&harness), "Too many requests");
    assert!(!c.state().send_code_disabled());

    c.dispatch(UiAction::SendVerificationCode).await;
    assert_eq!(last_text(&harness), "Network error, please try again later");
    assert!(!c.state().send_code_disabled());
    assert_eq!(c.state().countdown.remaining(), 0);
}

#[tokio::test]
async fn test_generate_device_name() {
    let harness = Harness::new();

    harness
        .controller
        .dispatch(UiAction::GenerateDeviceName)
        .await;

    assert_eq!(
        harness.controller.state().fields.login_device_name,
        "Desktop on Win32"
    );
    assert_eq!(last_text(&harness), "Device name generated");
}

#[tokio::test]
async fn test_live_register_validation_markers() {
    let harness = Harness::new();
    let c = &harness.controller;

    c.dispatch(edit(FormField::RegisterEmail, "bad")).await;
    assert!(c.state().register_email_invalid);
    c.dispatch(edit(FormField::RegisterEmail, "good@example.com"))
        .await;
    assert!(!c.state().register_email_invalid);

    c.dispatch(edit(FormField::RegisterPassword, "secret1")).await;
    c.dispatch(edit(FormField::RegisterConfirmPassword, "secret"))
        .await;
    assert!(c.state().register_confirm_invalid);
    c.dispatch(edit(FormField::RegisterConfirmPassword, "secret1"))
        .await;
    assert!(!c.state().register_confirm_invalid);
}

#[tokio::test]
async fn test_dismiss_notification() {
    let harness = Harness::new();

    harness
        .controller
        .dispatch(UiAction::DismissNotification)
        .await;

    assert_eq!(harness.notifier.hide_count(), 1);
}

#[test]
fn test_action_debug_format() {
    let action = edit(FormField::LoginEmail, "user@example.com");
    assert_eq!(action.name(), "edit_field");
    assert!(format!("{action:?}").starts_with("EditField"));
    assert_eq!(
        format!("{:?}", UiAction::SwitchForm(FormMode::Register)),
        "SwitchForm(Register)"
    );
}
