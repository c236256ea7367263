//! Tests for error conversion

use super::*;
use dashboard_storage::StorageError;
use issues_topic::EntityKind;

fn lookup_failure() -> ResolveError {
    ResolveError::LookupFailure {
        entity: EntityKind::Organization,
        key: "istio".to_string(),
        source: StorageError::Unavailable("db password rejected".to_string()),
    }
}

#[test]
fn test_not_found_maps_to_404() {
    let err = ResolveError::NotFound {
        entity: EntityKind::Organization,
        key: "nope".to_string(),
    };

    let (status, response) = convert_resolve_error(&err);

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response.error.code, "NotFound");
    assert_eq!(
        response.error.message,
        "no information available on organization nope"
    );
    assert_eq!(
        response.error.details,
        Some(json!({ "entity": "organization", "key": "nope" }))
    );
}

#[test]
fn test_lookup_failure_maps_to_500_without_backend_detail() {
    let (status, response) = convert_resolve_error(&lookup_failure());

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.error.code, "LookupFailure");
    assert_eq!(
        response.error.message,
        "Unable to get information on organization istio"
    );
    assert!(!response.error.message.contains("password"));
}

#[test]
fn test_scan_failure_maps_to_500() {
    let err = ResolveError::ScanFailure {
        repository: "istio".to_string(),
        source: StorageError::Unavailable("connection reset".to_string()),
    };

    let (status, response) = convert_resolve_error(&err);

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.error.code, "ScanFailure");
    assert!(!response.error.message.contains("connection reset"));
}

#[test]
fn test_cancelled_maps_to_503() {
    let (status, response) = convert_resolve_error(&ResolveError::Cancelled);

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.error.code, "Cancelled");
    assert!(response.error.details.is_none());
}

#[test]
fn test_api_error_status_follows_resolve_error() {
    let err = ApiError::from(lookup_failure());

    assert_eq!(err.to_response_parts().0, StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_error_response_serializes_without_empty_details() {
    let (_, response) = convert_resolve_error(&ResolveError::Cancelled);

    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(
        value,
        json!({ "error": { "code": "Cancelled", "message": "The request was cancelled" } })
    );
}

#[tokio::test]
async fn test_into_response_uses_json_error_body() {
    let response = ApiError::from(lookup_failure()).into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let parsed: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed.error.code, "LookupFailure");
}
