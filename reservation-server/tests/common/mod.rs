//! Shared helpers for the HTTP integration tests
//!
//! Each [`TestApp`] owns its own in-memory store, so tests are independent.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use reservation_server::auth::{JwtConfig, JwtService, TokenKind};
use reservation_server::{AppState, Config, api};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

pub struct TestApp {
    pub state: AppState,
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: http::HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(Config::default()).await
    }

    /// App with the admin account seeded
    pub async fn with_admin() -> Self {
        Self::with_config(Config {
            admin_username: Some(ADMIN_USERNAME.to_string()),
            admin_password: Some(ADMIN_PASSWORD.to_string()),
            ..Config::default()
        })
        .await
    }

    async fn with_config(config: Config) -> Self {
        let state = AppState::initialize(config)
            .await
            .expect("failed to initialize test state");
        let router = api::create_router(state.clone());
        Self { state, router }
    }

    pub fn access_token(&self) -> String {
        self.state
            .jwt
            .generate_token(ADMIN_USERNAME, TokenKind::Access)
            .unwrap()
    }

    /// Access token signed with the right key that is already expired
    pub fn expired_token(&self) -> String {
        JwtService::with_config(JwtConfig {
            access_expiration_minutes: 0,
            ..self.state.config.jwt.clone()
        })
        .generate_token(ADMIN_USERNAME, TokenKind::Access)
        .unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    /// Request carrying a valid access token
    pub async fn authed(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let token = self.access_token();
        self.request(method, uri, body, Some(&token)).await
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Create a reservation and assert it was accepted
    pub async fn create(&self, body: Value) -> Value {
        let response = self.authed(Method::POST, "/reservation", Some(body)).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body
    }
}

pub fn reservation(number_id: i64) -> Value {
    json!({
        "numberId": number_id,
        "status": "Confirmado",
        "name": "Jane Doe",
        "rooms": [1, 2],
        "channel": "Booking",
        "arrival": "2023-02-01",
        "departure": "2023-02-05",
        "pax": 4,
        "price": 345.3,
        "tax": 12.5,
        "notes": "late check-in"
    })
}

/// Sorted numberIds of a list response
pub fn number_ids(body: &Value) -> Vec<i64> {
    let mut ids: Vec<i64> = body
        .as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|r| r["numberId"].as_i64().unwrap())
        .collect();
    ids.sort_unstable();
    ids
}
