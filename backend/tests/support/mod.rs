#![allow(dead_code)]
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use creatix_backend::{
    config::Config,
    models::{
        contest::{Contest, ContestStatus, ContestType, CreateContest},
        user::{CreateUser, User, UserRole},
    },
    router::build_router,
    state::AppState,
};
use serde_json::Value;
use std::net::IpAddr;
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub fn test_config() -> Config {
    Config {
        host: IpAddr::from([127, 0, 0, 1]),
        port: 0,
        cors_allow_origins: vec!["http://localhost:8000".into()],
        max_body_bytes: 16 * 1024,
    }
}

pub fn test_app() -> (Router, AppState) {
    let state = AppState::in_memory(test_config());
    (build_router(state.clone()), state)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    TestResponse {
        status,
        headers,
        body,
    }
}

/// Collects the `message` of every entry in a validation response.
pub fn error_messages(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .map(|e| e["message"].as_str().expect("message").to_string())
        .collect()
}

pub async fn seed_user(state: &AppState, role: UserRole) -> User {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    let user = User::new(CreateUser {
        name: format!("User {}", &suffix[..6]),
        email: format!("user-{}@example.com", suffix),
        role: Some(role),
    });
    state.users.create(user).await.expect("seed user")
}

pub async fn seed_contest(state: &AppState, name: &str, contest_type: ContestType) -> Contest {
    let contest = Contest::new(
        CreateContest {
            name: name.to_string(),
            description: format!("{} description for testing", name),
            contest_type,
            price: 10.0,
            prize_pool: Some(500.0),
            deadline: String::new(),
        },
        Utc::now() + Duration::days(14),
    );
    state.contests.create(contest).await.expect("seed contest")
}

pub async fn close_contest(state: &AppState, contest: &Contest) {
    let mut closed = contest.clone();
    closed.status = ContestStatus::Closed;
    state.contests.update(closed).await.expect("close contest");
}
