use crate::error::{AppError, AppResult};
use axum::extract::{FromRequest, Json, Request, rejection::JsonRejection};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that runs `validator` rules after deserialization.
///
/// Deserialization failures become `AppError::BadRequest`; rule
/// failures become `AppError::ValidationErrors` with one entry per
/// offending field.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(min = 1, max = 20, message = "Name is required"))]
        name: String,
        #[validate(email(message = "Invalid email format"))]
        email: String,
        #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
        rating: f64,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let body = r#"{"name":"Asha","email":"asha@example.com","rating":4.5}"#;
        let result = ValidatedJson::<TestBody>::from_request(json_request(body), &()).await;

        assert!(result.is_ok());
        let ValidatedJson(parsed) = result.unwrap();
        assert_eq!(parsed.name, "Asha");
        assert_eq!(parsed.email, "asha@example.com");
    }

    #[tokio::test]
    async fn test_validation_error_empty_name() {
        let body = r#"{"name":"","email":"asha@example.com","rating":4.5}"#;
        let result = ValidatedJson::<TestBody>::from_request(json_request(body), &()).await;

        let error = result.unwrap_err();
        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "name");
                assert!(errors[0].message.contains("required"));
            }
            _ => panic!("Expected ValidationErrors error, got {:?}", error),
        }
    }

    #[tokio::test]
    async fn test_validation_error_multiple_fields() {
        let body = r#"{"name":"","email":"not-an-email","rating":9.0}"#;
        let result = ValidatedJson::<TestBody>::from_request(json_request(body), &()).await;

        let error = result.unwrap_err();
        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 3);
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"name"));
                assert!(fields.contains(&"email"));
                assert!(fields.contains(&"rating"));
            }
            _ => panic!("Expected ValidationErrors error, got {:?}", error),
        }
    }

    #[tokio::test]
    async fn test_rejection_missing_field() {
        let body = r#"{"name":"Asha","email":"asha@example.com"}"#;
        let result = ValidatedJson::<TestBody>::from_request(json_request(body), &()).await;

        let error = result.unwrap_err();
        match error {
            AppError::BadRequest { message } => assert!(!message.is_empty()),
            _ => panic!("Expected BadRequest error, got {:?}", error),
        }
    }

    #[tokio::test]
    async fn test_rejection_malformed_json() {
        let body = r#"{"name": "Asha""#;
        let result = ValidatedJson::<TestBody>::from_request(json_request(body), &()).await;

        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }
}
