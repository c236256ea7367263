//! Tests for routing

use super::*;
use crate::test_support::{body_text, get, seeded_app};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

#[tokio::test]
async fn test_index_route() {
    let response = get(seeded_app(), "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("/issues"));
}

#[tokio::test]
async fn test_topic_routes_with_and_without_trailing_slash() {
    for uri in ["/issues", "/issues/", "/api/issues", "/api/issues/"] {
        let response = get(seeded_app(), uri).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
    }
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = get(seeded_app(), "/pulls").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_is_not_allowed() {
    let response = seeded_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/issues")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let response = get(seeded_app(), "/api/health").await;

    assert!(response
        .headers()
        .contains_key(crate::middleware::REQUEST_ID_HEADER));
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let response = seeded_app()
        .oneshot(
            Request::builder()
                .uri("/api/issues")
                .header("origin", "https://example.com")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

#[test]
fn test_router_builds_without_topics() {
    let state = AppState::new(crate::RenderContext::new("Dashboard").unwrap(), Vec::new());

    let _router = create_router(state, Duration::from_secs(1));
}
