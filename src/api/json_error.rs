use axum::{
    extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse,
    response::Response, Json,
};
use validator::ValidationErrors;

/// Rejection for request bodies: malformed JSON or a body that fails
/// field validation.
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("invalid JSON body")]
    InvalidJson(#[from] JsonRejection),
    #[error("validation failed")]
    Validation(#[from] ValidationErrors),
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidJson(rejection) => {
                (StatusCode::BAD_REQUEST, rejection.body_text()).into_response()
            }
            Self::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(serde_json::json!(errors))).into_response()
            }
        }
    }
}
