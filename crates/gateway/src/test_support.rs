//! Router fixtures for handler tests

use axum::{
    body::{to_bytes, Body},
    http::{header, Request},
    response::Response,
    Router,
};
use docqa_common::{
    config::{AppConfig, DatabaseConfig},
    db::{DbPool, DocumentStore, Repository},
};
use serde_json::Value;
use std::sync::Arc;

use crate::{create_router, AppState};

const BOUNDARY: &str = "docqa-test-boundary";

/// Router over a fresh in-memory database, without a metrics recorder
pub async fn test_app() -> Router {
    test_app_with_config(AppConfig::default()).await
}

pub async fn test_app_with_config(config: AppConfig) -> Router {
    let pool = DbPool::connect_and_migrate(&DatabaseConfig::in_memory())
        .await
        .unwrap();
    let store: Arc<dyn DocumentStore> = Arc::new(Repository::new(pool));

    create_router(AppState::new(Arc::new(config), store, None))
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// POST /upload with a single `file` field
pub fn multipart_upload(filename: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
