//! Request ID middleware for request tracing.
//!
//! Ensures every request has a unique identifier for tracing and
//! correlation purposes. Uses an existing X-Request-ID header when
//! present, otherwise generates a new UUID.

use axum::{
    Json,
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::api::dto::ErrorResponse;

/// Header name for request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID stored in request extensions for downstream access.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Middleware that ensures every request has a unique request ID.
///
/// # Behavior
/// - If the request contains an X-Request-ID header, uses that value
/// - If no header is present, generates a new UUID v4
/// - Stores the request ID in request extensions for downstream handlers
/// - Stamps the request ID into error response bodies
/// - Adds the request ID to the response headers
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let response = next.run(request).await;
    let mut response = stamp_error_body(response, &request_id);

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    response
}

/// Re-serializes an error body with the request ID filled in.
///
/// Error responses leave a clone of their `ErrorResponse` body in the
/// response extensions; successful responses pass through untouched.
fn stamp_error_body(mut response: Response, request_id: &str) -> Response {
    match response.extensions_mut().remove::<ErrorResponse>() {
        Some(body) => {
            let status = response.status();
            (status, Json(body.with_request_id(request_id))).into_response()
        }
        None => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    use crate::error::AppError;

    #[test]
    fn test_request_id_struct_clone() {
        let id = RequestId("test-id".to_string());
        let cloned = id.clone();
        assert_eq!(id.0, cloned.0);
    }

    #[test]
    fn test_request_id_header_constant() {
        assert_eq!(REQUEST_ID_HEADER, "x-request-id");
    }

    #[tokio::test]
    async fn test_error_body_carries_request_id() {
        let response = AppError::not_found("customer", 5).into_response();
        let stamped = stamp_error_body(response, "req-123");
        assert_eq!(stamped.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(stamped.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["request_id"], "req-123");
    }

    #[tokio::test]
    async fn test_success_body_left_untouched() {
        let response = (StatusCode::OK, "ok").into_response();
        let stamped = stamp_error_body(response, "req-123");
        assert_eq!(stamped.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(stamped.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"ok");
    }
}
