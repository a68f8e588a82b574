
use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::{
    config::Config, jwt_auth::issue_token, repository::memory::MemoryRepository,
    route::create_router, AppState,
};

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes";

pub fn test_config() -> Config {
    Config {
        jwt_secret: TEST_SECRET.to_string(),
        jwt_maxage: 60,
        port: 0,
        db_timeout: Duration::from_secs(5),
    }
}

pub fn test_app() -> (Router, Arc<MemoryRepository>) {
    test_app_with(test_config())
}

pub fn test_app_with(config: Config) -> (Router, Arc<MemoryRepository>) {
    let repo = Arc::new(MemoryRepository::default());
    let state = Arc::new(AppState {
        db: repo.clone(),
        config,
    });
    (create_router(state), repo)
}

pub fn token_for(user_id: i32) -> String {
    issue_token(user_id, "someone@example.com", TEST_SECRET.as_bytes(), 60).unwrap()
}

pub fn request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("NoteApp={token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// JSON content type with a body that is sent as-is, valid or not.
pub fn raw_request(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("NoteApp={token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
