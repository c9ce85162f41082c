use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Persistence error: {0}")]
    PersistenceError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Search superseded by a newer request")]
    Superseded,

    #[error("Internal server error: {0}")]
    InternalError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let error = ErrorResponse {
            error: self.to_string(),
        };

        match self {
            ApiError::InvalidInput(_) => HttpResponse::BadRequest().json(error),
            ApiError::NotFound(_) => HttpResponse::NotFound().json(error),
            ApiError::NetworkError(_) => HttpResponse::BadGateway().json(error),
            ApiError::Superseded => HttpResponse::Conflict().json(error),
            _ => HttpResponse::InternalServerError().json(error),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::SerializationError(err.to_string())
        } else {
            ApiError::NetworkError(err.to_string())
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::PersistenceError(err.to_string())
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

/// Observable state of a fallible operation.
///
/// `Loading` is published while the operation is in flight; the final
/// outcome replaces it with either the data or a human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum LoadState<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Success(data) => Some(data),
            _ => None,
        }
    }
}

impl<T> From<Result<T>> for LoadState<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => LoadState::Success(data),
            Err(err) => LoadState::Error(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::NotFound("Meal not found".into())
                .error_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::NetworkError("timeout".into())
                .error_response()
                .status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::Superseded.error_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::PersistenceError("disk full".into())
                .error_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_load_state_carries_error_message() {
        let state: LoadState<Vec<String>> =
            Err(ApiError::NetworkError("connection refused".into())).into();

        assert_eq!(
            state,
            LoadState::Error("Network error: connection refused".to_string())
        );
        assert!(state.data().is_none());
    }

    #[test]
    fn test_load_state_serializes_with_status_tag() {
        let state = LoadState::Success(vec![1, 2]);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"], serde_json::json!([1, 2]));

        let loading: LoadState<()> = LoadState::Loading;
        assert_eq!(serde_json::to_value(&loading).unwrap()["status"], "loading");
    }
}
