use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, error};

use crate::services::{request_store::RequestError, search_session::SearchError};

/// Error returned by handlers, rendered as `{ "success": false, "error": ... }`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "Administrator access required.")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": self.message,
        }));

        (self.status, body).into_response()
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::MissingField(_) => ApiError::bad_request(err.to_string()),
            RequestError::NotFound(_) => ApiError::not_found(err.to_string()),
            RequestError::Store(e) => {
                error!("Request storage failed: {}", e);
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to save the request. Please try again.",
                )
            }
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        ApiError::new(StatusCode::CONFLICT, err.to_string())
    }
}

// Extractor failures keep axum's status code but use the JSON error body
macro_rules! from_rejection {
    ($($rejection:ty),+) => {
        $(
            impl From<$rejection> for ApiError {
                fn from(rejection: $rejection) -> Self {
                    debug!("Rejected request: {}", rejection.body_text());
                    ApiError::new(rejection.status(), rejection.body_text())
                }
            }
        )+
    };
}

from_rejection!(JsonRejection, QueryRejection, PathRejection);

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_domain_errors_map_to_status() {
        let err: ApiError = RequestError::MissingField("address").into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("address"));

        let err: ApiError = RequestError::NotFound(Uuid::nil()).into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err: ApiError = SearchError::AlreadyRunning.into();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_error_response_status() {
        let response = ApiError::forbidden().into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
