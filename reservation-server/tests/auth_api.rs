//! Login, refresh, token check and public routes

mod common;

use common::{ADMIN_USERNAME, TestApp};
use http::{Method, StatusCode};
use reservation_server::auth::TokenKind;
use serde_json::json;

const LOGIN_FORM: &str = "username=admin&password=correct+horse+battery+staple";

#[tokio::test]
async fn test_login_returns_usable_token_pair() {
    let app = TestApp::with_admin().await;

    let response = app.post_form("/auth", LOGIN_FORM).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["token_type"], "bearer");

    let access = response.body["access_token"].as_str().unwrap().to_string();
    let refresh = response.body["refresh_token"].as_str().unwrap().to_string();

    let claims = app.state.jwt.validate_token(&access, TokenKind::Access).unwrap();
    assert_eq!(claims.sub, ADMIN_USERNAME);
    assert!(app.state.jwt.validate_token(&refresh, TokenKind::Refresh).is_ok());

    let list = app
        .request(Method::GET, "/reservation", None, Some(&access))
        .await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body, json!([]));
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = TestApp::with_admin().await;

    let wrong_password = app
        .post_form("/auth", "username=admin&password=guess")
        .await;
    assert_eq!(wrong_password.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_password.body["code"], 1002);
    assert_eq!(wrong_password.body["message"], "Incorrect username or password");

    let unknown_user = app
        .post_form("/auth", "username=mallory&password=guess")
        .await;
    assert_eq!(unknown_user.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_user.body["code"], 1002);

    let missing_field = app.post_form("/auth", "username=admin").await;
    assert_eq!(missing_field.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_without_seeded_admin() {
    let app = TestApp::new().await;
    let response = app.post_form("/auth", LOGIN_FORM).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refresh_issues_new_pair() {
    let app = TestApp::new().await;
    let pair = app.state.jwt.generate_pair(ADMIN_USERNAME).unwrap();

    let response = app
        .request(
            Method::POST,
            "/auth/refresh",
            Some(json!({"refresh_token": pair.refresh_token})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let access = response.body["access_token"].as_str().unwrap();
    assert!(app.state.jwt.validate_token(access, TokenKind::Access).is_ok());

    // An access token cannot be used to refresh
    let response = app
        .request(
            Method::POST,
            "/auth/refresh",
            Some(json!({"refresh_token": pair.access_token})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_check() {
    let app = TestApp::new().await;

    let token = app.access_token();
    let valid = app
        .request(Method::POST, &format!("/?token={token}"), None, None)
        .await;
    assert_eq!(valid.status, StatusCode::OK);
    assert_eq!(valid.body, json!(true));

    let missing = app.request(Method::POST, "/", None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["code"], 1005);

    let invalid = app
        .request(Method::POST, "/?token=garbage", None, None)
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.body["code"], 1006);

    let expired = app.expired_token();
    let response = app
        .request(Method::POST, &format!("/?token={expired}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let repeated = app
        .request(Method::POST, &format!("/?token={token}&token={token}"), None, None)
        .await;
    assert_eq!(repeated.status, StatusCode::BAD_REQUEST);
    assert_eq!(repeated.body["code"], 5);
}

#[tokio::test]
async fn test_health_is_public_and_tagged_with_request_id() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["service"], "reservation-server");
    assert!(response.headers.contains_key("x-request-id"));
}
