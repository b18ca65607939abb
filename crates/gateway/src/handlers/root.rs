//! Service information

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub endpoints: Endpoints,
}

#[derive(Serialize)]
pub struct Endpoints {
    pub upload: String,
    pub documents: String,
    pub ask: String,
    pub history: String,
}

pub async fn index() -> Json<RootResponse> {
    Json(RootResponse {
        message: docqa_common::SERVICE_NAME.to_string(),
        version: docqa_common::VERSION.to_string(),
        endpoints: Endpoints {
            upload: "/upload".to_string(),
            documents: "/documents".to_string(),
            ask: "/ask".to_string(),
            history: "/history".to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use crate::test_support::{body_json, test_app};
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_index_lists_endpoints() {
        let app = test_app().await;
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "AI Document Q&A System");
        assert_eq!(body["endpoints"]["ask"], "/ask");
    }
}
