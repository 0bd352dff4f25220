//! JSON body extractor that also runs `validator::Validate`
//!
//! Malformed or mistyped JSON is rejected with 400. A body that parses but
//! fails validation is rejected with 422 and a `field: message` list joined
//! by `; `.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiResponse;

/// Drop-in replacement for `Json<T>` on request DTOs deriving `Validate`.
///
/// ```ignore
/// async fn create_review(ValidatedJson(body): ValidatedJson<CreateReviewRequest>) { .. }
/// ```
pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    Json(JsonRejection),
    Invalid(ValidationErrors),
}

/// Flatten field errors into `field: message` strings, sorted by field.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, msg)
            })
        })
        .collect();

    if messages.is_empty() {
        "Validation failed".to_string()
    } else {
        messages.join("; ")
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Json(rejection) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid JSON: {}", rejection.body_text()),
            ),
            Self::Invalid(errors) => (StatusCode::UNPROCESSABLE_ENTITY, describe(&errors)),
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: axum::extract::Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Json)?;
        value.validate().map_err(ValidatedJsonRejection::Invalid)?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct ReviewBody {
        #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
        rating: i32,
        #[validate(length(min = 10, message = "comment too short"))]
        comment: String,
    }

    async fn handler(ValidatedJson(body): ValidatedJson<ReviewBody>) -> String {
        format!("{} {}", body.rating, body.comment)
    }

    async fn post_json(body: &str) -> (StatusCode, String) {
        let app = Router::new().route("/reviews", post(handler));
        let req = Request::builder()
            .method("POST")
            .uri("/reviews")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn valid_body_reaches_handler() {
        let (status, body) = post_json(r#"{"rating": 5, "comment": "Great car, clean"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "5 Great car, clean");
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let (status, _) = post_json("{rating: 5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn failed_validation_is_422_with_field_messages() {
        let (status, body) = post_json(r#"{"rating": 9, "comment": "meh"}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(
            json["error"],
            "comment: comment too short; rating: rating must be between 1 and 5"
        );
    }
}
