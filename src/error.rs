//! Error Taxonomy
//!
//! Two layers of failure: [`StoreError`] for the persistence boundary and
//! [`ApiError`] for everything a handler can surface to a caller. Store
//! detail is logged server-side and flattened to a generic message on the
//! wire; validation failures carry field-level messages.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Field-level validation messages, keyed by field name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Messages recorded for `field`, empty when the field passed.
    pub fn messages(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }
}

/// Failures at the persistence boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record already exists: {0}")]
    Duplicate(String),

    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed data file: {0}")]
    Data(#[from] serde_json::Error),
}

/// Failures surfaced through the HTTP interface.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request data")]
    Validation(ValidationErrors),

    #[error("Certificate ID already exists")]
    DuplicateId(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Internal server error")]
    Store(StoreError),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(id) => ApiError::DuplicateId(id),
            other => ApiError::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid request data", "errors": errors.into_map() }),
            ),
            ApiError::DuplicateId(_) => (
                StatusCode::CONFLICT,
                json!({ "error": "Certificate ID already exists" }),
            ),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "error": message })),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, json!({ "error": "Unauthorized" })),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, json!({ "error": "Forbidden" })),
            ApiError::Store(err) => {
                error!("store failure: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_collect_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("title", "Title is required");
        errors.add("title", "Title must be 255 characters or fewer");
        errors.add("slug", "Slug is required");

        assert!(!errors.is_empty());
        assert!(errors.contains("title"));
        assert_eq!(errors.messages("title").len(), 2);
        assert_eq!(errors.messages("slug"), ["Slug is required"]);
        assert!(errors.messages("status").is_empty());
    }

    #[test]
    fn test_duplicate_store_error_maps_to_duplicate_id() {
        let err: ApiError = StoreError::Duplicate("AMBXJAN260001".to_string()).into();
        assert!(matches!(err, ApiError::DuplicateId(id) if id == "AMBXJAN260001"));
    }

    #[test]
    fn test_io_store_error_maps_to_generic_store_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err: ApiError = StoreError::Io(io).into();
        assert!(matches!(err, ApiError::Store(_)));
    }
}
