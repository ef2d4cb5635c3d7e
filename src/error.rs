//! API-facing error type. Assessment never fails; what can go wrong is a bad
//! request or a session that does not exist (anymore).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::session::SessionError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Session(SessionError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Session(SessionError::DuplicateWord(_)) => StatusCode::CONFLICT,
            ApiError::Session(SessionError::UnknownWord(_)) | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Session(SessionError::EmptyWord) | ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(ApiError::from(SessionError::NotFound(Uuid::nil())).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(SessionError::DuplicateWord("x".into())).status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::InvalidRequest("empty".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("unknown exercise: x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(SessionError::EmptyWord).to_string(), "word must not be empty");
    }
}
