use axum::http::Request;
use pillarx::activity::{Page, action};

use super::*;
use crate::state::test_helpers::{self, browser};

fn register_body(email: &str, password: &str) -> RegisterBody {
    RegisterBody { email: Some(email.into()), password: Some(password.into()), full_name: Some("Ada".into()) }
}

fn parts_of(request: Request<()>) -> Parts {
    request.into_parts().0
}

// =============================================================================
// auth_error_to_status
// =============================================================================

#[test]
fn auth_error_to_status_maps_client_errors() {
    assert_eq!(auth_error_to_status(&AuthError::MissingCredentials), StatusCode::BAD_REQUEST);
    assert_eq!(auth_error_to_status(&AuthError::EmailTaken), StatusCode::BAD_REQUEST);
    assert_eq!(auth_error_to_status(&AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED);
    assert_eq!(auth_error_to_status(&AuthError::Hash("x".into())), StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// Extractors
// =============================================================================

#[tokio::test]
async fn client_info_defaults_unknown_agent() {
    let mut parts = parts_of(Request::builder().uri("/").body(()).unwrap());
    let info = ClientInfo::from_request_parts(&mut parts, &()).await.unwrap();
    assert_eq!(info.user_agent, "Unknown");
    assert_eq!(info.ip_address, "unknown");
}

#[tokio::test]
async fn client_info_reads_agent_and_forwarded_for() {
    let request = Request::builder()
        .uri("/")
        .header("user-agent", "curl/8.0")
        .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
        .body(())
        .unwrap();
    let mut parts = parts_of(request);
    let info = ClientInfo::from_request_parts(&mut parts, &()).await.unwrap();
    assert_eq!(info.user_agent, "curl/8.0");
    assert_eq!(info.ip_address, "203.0.113.9");
}

#[tokio::test]
async fn missing_bearer_is_rejected() {
    let state = test_helpers::test_app_state();
    let mut parts = parts_of(Request::builder().uri("/").body(()).unwrap());
    let Err(err) = AuthUser::from_request_parts(&mut parts, &state).await else {
        panic!("expected rejection");
    };
    assert_eq!(err, ApiError::unauthorized("Access denied. No token provided."));
}

#[tokio::test]
async fn garbage_bearer_is_rejected() {
    let state = test_helpers::test_app_state();
    let request = Request::builder().uri("/").header("authorization", "Bearer abc.def").body(()).unwrap();
    let mut parts = parts_of(request);
    let Err(err) = AuthUser::from_request_parts(&mut parts, &state).await else {
        panic!("expected rejection");
    };
    assert_eq!(err.message, "Invalid or expired token.");
}

#[tokio::test]
async fn expired_session_is_rejected_even_with_live_token() {
    let state = test_helpers::test_app_state();
    let now = OffsetDateTime::now_utc();
    let origin = browser().origin();
    let session = state.sessions.write().await.create_at("u_1", &origin, now - time::Duration::hours(2));
    let token = state.tokens.issue("u_1", "a@b.c", &session.id, now);

    let err = authenticate(&state, &token).await.unwrap_err();
    assert_eq!(err, ApiError::unauthorized("Invalid or expired token."));
}

// =============================================================================
// Handlers
// =============================================================================

#[tokio::test]
async fn register_returns_created_without_hash() {
    let state = test_helpers::test_app_state();
    let (status, Json(user)) =
        register(State(state.clone()), browser(), ApiJson(register_body("a@b.c", "pw"))).await.unwrap();
    assert_eq!(status, StatusCode::CREATED);
    let value = serde_json::to_value(&user).unwrap();
    assert!(value.get("password_hash").is_none());
    assert_eq!(value["email"], "a@b.c");
}

#[tokio::test]
async fn register_missing_password_is_bad_request() {
    let state = test_helpers::test_app_state();
    let body = RegisterBody { email: Some("a@b.c".into()), password: None, full_name: None };
    let err = register(State(state), browser(), ApiJson(body)).await.unwrap_err();
    assert_eq!(err, ApiError::bad_request("Email and password are required."));
}

#[tokio::test]
async fn register_twice_is_bad_request() {
    let state = test_helpers::test_app_state();
    register(State(state.clone()), browser(), ApiJson(register_body("a@b.c", "pw"))).await.unwrap();
    let err = register(State(state), browser(), ApiJson(register_body("a@b.c", "pw"))).await.unwrap_err();
    assert_eq!(err.message, "Email already registered.");
}

#[tokio::test]
async fn login_then_token_authenticates() {
    let state = test_helpers::test_app_state();
    register(State(state.clone()), browser(), ApiJson(register_body("a@b.c", "pw"))).await.unwrap();
    let body = LoginBody { email: Some("a@b.c".into()), password: Some("pw".into()) };
    let Json(response) = login(State(state.clone()), browser(), ApiJson(body)).await.unwrap();
    assert_eq!(response.user.email, "a@b.c");
    assert_eq!(response.user.full_name.as_deref(), Some("Ada"));
    assert!(!response.user.is_bot);

    let auth = authenticate(&state, &response.token).await.unwrap();
    assert_eq!(auth.email, "a@b.c");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let state = test_helpers::test_app_state();
    register(State(state.clone()), browser(), ApiJson(register_body("a@b.c", "pw"))).await.unwrap();
    let body = LoginBody { email: Some("a@b.c".into()), password: Some("nope".into()) };
    let err = login(State(state), browser(), ApiJson(body)).await.unwrap_err();
    assert_eq!(err, ApiError::unauthorized("Invalid email or password."));
}

#[tokio::test]
async fn logout_closes_session_and_records_activity() {
    let state = test_helpers::test_app_state();
    let auth = test_helpers::login_as(&state, "a@b.c").await;
    let user_id = auth.user_id.clone();
    let session_id = auth.session_id.clone();

    let Json(body) = logout(State(state.clone()), auth, browser()).await;
    assert_eq!(body["message"], "Successfully logged out.");
    assert!(state.sessions.read().await.get(&session_id).is_none());

    let workspace = state.workspace.read().await;
    let page = workspace.my_activities(&user_id, Page::default());
    assert_eq!(page.data[0].action_type, action::LOGOUT);
    assert!(workspace.current_user().is_none());
}

#[tokio::test]
async fn me_returns_profile() {
    let state = test_helpers::test_app_state();
    let auth = test_helpers::login_as(&state, "a@b.c").await;
    let Json(user) = me(State(state), auth).await.unwrap();
    assert_eq!(user.email, "a@b.c");
    assert_eq!(user.full_name.as_deref(), Some("Test User"));
}

#[tokio::test]
async fn me_for_vanished_user_is_not_found() {
    let state = test_helpers::test_app_state();
    let auth = AuthUser { user_id: "u_gone".into(), email: "x@y.z".into(), session_id: "s".into() };
    let err = me(State(state), auth).await.unwrap_err();
    assert_eq!(err, ApiError::not_found("User not found."));
}
