use crate::error::{AppError, AppResult};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that runs `validator` checks after deserialization.
///
/// Malformed bodies become `AppError::BadRequest`; failed constraints
/// become `AppError::Validation`, so handlers only see valid payloads.
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

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(min = 1, max = 10, message = "name must be between 1 and 10 characters"))]
        name: String,
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
        let result =
            ValidatedJson::<TestBody>::from_request(json_request(r#"{"name":"abc"}"#), &()).await;

        let ValidatedJson(body) = result.unwrap();
        assert_eq!(body.name, "abc");
    }

    #[tokio::test]
    async fn test_constraint_violation() {
        let result =
            ValidatedJson::<TestBody>::from_request(json_request(r#"{"name":""}"#), &()).await;

        match result.unwrap_err() {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "name");
                assert!(reason.contains("between 1 and 10"));
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let result =
            ValidatedJson::<TestBody>::from_request(json_request(r#"{"name":"#), &()).await;

        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let result = ValidatedJson::<TestBody>::from_request(json_request("{}"), &()).await;

        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }
}
