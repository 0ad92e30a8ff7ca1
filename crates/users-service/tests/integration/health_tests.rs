//! Health endpoint tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;
use users_service::crypto::TokenCodec;
use users_service::handlers::AppState;
use users_service::policy::AdminPolicy;
use users_service::repositories::users::mock::MockUserStore;
use users_service::routes;

#[tokio::test]
async fn test_health_check_requires_no_authentication() -> Result<(), anyhow::Error> {
    let state = Arc::new(AppState {
        codec: TokenCodec::new(b"integration-test-secret"),
        policy: AdminPolicy::new("admin-listener"),
        store: Arc::new(MockUserStore::empty()),
    });

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())?;

    let response = routes::build_routes(state).oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await?.to_bytes();
    assert_eq!(&bytes[..], b"OK");

    Ok(())
}
