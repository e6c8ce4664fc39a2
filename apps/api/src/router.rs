use std::sync::Arc;

use axum::{routing::get, Router};

use schedule_cell::{schedule_routes, ScheduleState};

pub fn create_router(state: Arc<ScheduleState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic schedule API is running!" }))
        .nest("/schedule", schedule_routes(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use schedule_cell::ProviderDirectory;
    use shared_utils::test_utils::TestConfig;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let state = ScheduleState::new(TestConfig::default().to_app_config(), ProviderDirectory::default());
        create_router(Arc::new(state))
    }

    #[tokio::test]
    async fn root_reports_running() {
        let response = test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn schedule_routes_are_nested() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/schedule/weeks/2025-05-05")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["days"].as_array().unwrap().len(), 7);
    }
}
