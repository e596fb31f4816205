pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::copy::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/generate-description",
            post(handlers::handle_generate_description),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::copy::exemplars::ExemplarPool;
    use crate::copy::generator::{Copywriter, NOTE_SERVICE_UNAVAILABLE};
    use crate::copy::vocabulary::Vocabulary;
    use crate::llm_client::scripted::ScriptedCompletion;

    fn app(service: Arc<ScriptedCompletion>) -> Router {
        let config = Config::from_lookup(|key| {
            (key == "OPENAI_API_KEY").then(|| "sk-test".to_string())
        })
        .unwrap();
        let copywriter = Copywriter::new(
            service,
            config.copy_settings(),
            ExemplarPool::default(),
            Vocabulary::default(),
        )
        .unwrap();
        build_router(AppState {
            copywriter: Arc::new(copywriter),
            config,
        })
    }

    async fn post_json(app: Router, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/generate-description")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_title_is_400_without_outbound_call() {
        let service = Arc::new(ScriptedCompletion::replying("Description: unused"));

        let (status, body) = post_json(app(Arc::clone(&service)), r#"{"imageUrl": "x"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Missing title"}));

        let (status, body) = post_json(app(Arc::clone(&service)), r#"{"title": ""}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Missing title"}));

        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_400() {
        let service = Arc::new(ScriptedCompletion::new(vec![]));
        let (status, body) = post_json(app(Arc::clone(&service)), r#"{"title": 12"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request body");
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_body_without_json_content_type_is_missing_title() {
        let service = Arc::new(ScriptedCompletion::replying("Description: unused"));
        let response = app(Arc::clone(&service))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/generate-description")
                    .header("content-type", "text/plain")
                    .body(Body::from(r#"{"title": "Wool Coat"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"error": "Missing title"}));
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_success_returns_pair() {
        let service = Arc::new(ScriptedCompletion::replying(
            "Title: Classic Denim Jacket\nDescription: A timeless layer for cool days.",
        ));
        let (status, body) = post_json(
            app(Arc::clone(&service)),
            r#"{"title": "Mens Blue Denim Jacket", "imageUrl": "https://cdn.example.com/j.jpg"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "formattedTitle": "Classic Denim Jacket",
                "description": "A timeless layer for cool days."
            })
        );
        assert_eq!(service.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_double_failure_still_returns_well_formed_pair() {
        let service = Arc::new(ScriptedCompletion::new(vec![
            Err(ScriptedCompletion::rejection()),
            Err(ScriptedCompletion::rejection()),
        ]));
        let (status, body) = post_json(
            app(Arc::clone(&service)),
            r#"{"title": "Womens Black Cable Knit Cardigan", "imageUrl": "https://cdn.example.com/c.jpg"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["formattedTitle"], "Cable Knit Cardigan");
        assert!(body["description"].as_str().is_some_and(|d| !d.is_empty()));
        assert_eq!(body["note"], NOTE_SERVICE_UNAVAILABLE);
        assert_eq!(service.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_long_reply_is_truncated_to_limit() {
        let long = "effortless ".repeat(80);
        let service = Arc::new(ScriptedCompletion::replying(&format!(
            "Title: Linen Shirt\nDescription: {long}"
        )));
        let (status, body) = post_json(app(service), r#"{"title": "Linen Shirt"}"#).await;

        assert_eq!(status, StatusCode::OK);
        let description = body["description"].as_str().unwrap();
        assert_eq!(description.split_whitespace().count(), 40);
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Arc::new(ScriptedCompletion::new(vec![])))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model"], "gpt-4o");
    }
}
