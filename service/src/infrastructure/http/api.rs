use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::error::DomainError;
use crate::domain::repository::RepositoryError;

// ApiSucess is a wrapper around a response that includes a status code.

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub(crate) fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

// ApiError is a wrapper around a response that includes a status code.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::InternalServerError(_) => "internal",
            ApiError::BadRequest(_) => "validation",
            ApiError::Unauthorized(_) => "unauthenticated",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "not_found",
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(value: RepositoryError) -> Self {
        DomainError::from(value).into()
    }
}

impl From<DomainError> for ApiError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(cause) => Self::BadRequest(cause.to_string()),
            DomainError::Forbidden(action) => {
                Self::Forbidden(DomainError::Forbidden(action).to_string())
            }
            DomainError::NotFound => Self::NotFound(DomainError::NotFound.to_string()),
            DomainError::Repository(cause) => Self::InternalServerError(cause.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let kind = self.kind();

        let message = match self {
            ApiError::InternalServerError(cause) => {
                tracing::error!("{}", cause);
                "Internal server error".to_string()
            }
            ApiError::BadRequest(message)
            | ApiError::Unauthorized(message)
            | ApiError::Forbidden(message)
            | ApiError::NotFound(message) => message,
        };

        (
            status_code,
            Json(ApiResponseBody::new_error(status_code, kind, message)),
        )
            .into_response()
    }
}

// Generic response structure shared by all API responses.

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    pub status_code: u16,
    pub data: T,
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, kind: &'static str, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { kind, message },
        }
    }
}

/// The response data format for all error responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub kind: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::error::{MutatingAction, ValidationError};

    #[rstest]
    #[case::validation(
        DomainError::Validation(ValidationError::TitleTooShort),
        ApiError::BadRequest("Title should be at least 5 characters long.".to_string())
    )]
    #[case::forbidden(
        DomainError::Forbidden(MutatingAction::Delete),
        ApiError::Forbidden("You are not authorized to delete this question".to_string())
    )]
    #[case::not_found(DomainError::NotFound, ApiError::NotFound("Question not found".to_string()))]
    #[case::vanished_row(
        DomainError::from(RepositoryError::NotFound),
        ApiError::NotFound("Question not found".to_string())
    )]
    fn domain_errors_map_to_client_errors(#[case] error: DomainError, #[case] expected: ApiError) {
        assert_eq!(ApiError::from(error), expected);
    }

    #[test]
    fn database_failures_are_not_shown_to_the_client() {
        let error = ApiError::from(RepositoryError::DatabaseError("connection reset".to_string()));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
