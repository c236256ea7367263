//! Tests for handlers module

use super::*;

#[tokio::test]
async fn test_health_check_returns_json() {
    let response = health_check().await;

    assert_eq!(response.0.status, "healthy");
    assert_eq!(
        response.0.version,
        Some(env!("CARGO_PKG_VERSION").to_string())
    );
}

#[tokio::test]
async fn test_health_check_timestamp_format() {
    let response = health_check().await;

    let parsed = chrono::DateTime::parse_from_rfc3339(&response.0.timestamp);
    assert!(parsed.is_ok(), "Timestamp should be valid ISO 8601 format");
}

#[test]
fn test_health_response_serializes_camel_case() {
    let response = HealthCheckResponse {
        status: "healthy".to_string(),
        version: None,
        timestamp: "2024-01-01T00:00:00Z".to_string(),
    };

    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(
        value,
        serde_json::json!({ "status": "healthy", "timestamp": "2024-01-01T00:00:00Z" })
    );
}
