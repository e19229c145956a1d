//! API error taxonomy and the policy that renders it.
//!
//! # Design Decisions
//! - Handlers only classify failures; `ErrorPolicy` picks status and text
//! - Legacy mapping answers 500 for a missing id and for not-found
//! - Raw storage text reaches clients only when exposure is enabled
//! - The raw error is always logged, whatever the client sees

use axum::{
    extract::rejection::{BytesRejection, PathRejection},
    http::StatusCode,
};
use thiserror::Error;

use crate::config::{ApiConfig, StatusMapping};
use crate::http::response::ErrorResponse;
use crate::store::StoreError;

/// Message returned when a path id is empty.
pub const MISSING_ID: &str = "id is null";

/// Failures a handler can report.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body is not JSON of the expected shape.
    #[error("{0}")]
    InvalidBody(#[from] serde_json::Error),

    /// Body could not be read (too large, aborted).
    #[error("{0}")]
    UnreadableBody(#[from] BytesRejection),

    /// Path parameter could not be decoded (e.g. invalid UTF-8).
    #[error("{0}")]
    InvalidPath(#[from] PathRejection),

    /// Path parameter `id` was empty.
    #[error("id is null")]
    MissingId,

    #[error("route not found")]
    RouteNotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    /// Request handling exceeded the write timeout.
    #[error("request timed out")]
    Timeout,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Maps `ApiError`s to status codes and client-visible messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPolicy {
    mapping: StatusMapping,
    expose_internal_errors: bool,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        Self::from_config(&ApiConfig::default())
    }
}

impl ErrorPolicy {
    pub fn new(mapping: StatusMapping, expose_internal_errors: bool) -> Self {
        Self {
            mapping,
            expose_internal_errors,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.status_mapping, config.expose_internal_errors)
    }

    /// Status code for an error under this policy.
    pub fn status(&self, err: &ApiError) -> StatusCode {
        let strict = self.mapping == StatusMapping::Strict;
        match err {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::UnreadableBody(rejection) => rejection.status(),
            ApiError::InvalidPath(rejection) => rejection.status(),
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::MissingId if strict => StatusCode::BAD_REQUEST,
            ApiError::MissingId => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Store(StoreError::NotFound) if strict => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::Conflict(_)) if strict => StatusCode::CONFLICT,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-visible message for an error under this policy.
    pub fn message(&self, err: &ApiError) -> String {
        if self.expose_internal_errors {
            return err.to_string();
        }
        let sanitized = match err {
            ApiError::InvalidBody(_) => "invalid request body",
            ApiError::UnreadableBody(_) => "unreadable request body",
            ApiError::InvalidPath(_) => "invalid article id",
            ApiError::MissingId => MISSING_ID,
            ApiError::RouteNotFound => "route not found",
            ApiError::MethodNotAllowed => "method not allowed",
            ApiError::Timeout => "request timed out",
            ApiError::Store(StoreError::NotFound) => "article not found",
            ApiError::Store(StoreError::Conflict(_)) => "article already exists",
            ApiError::Store(StoreError::Database(_)) => "internal storage error",
        };
        sanitized.to_string()
    }

    /// Log the failure and produce the client response.
    pub fn render(&self, err: ApiError) -> ErrorResponse {
        let status = self.status(&err);
        if status.is_server_error() {
            tracing::error!(status = %status, error = %err, "Request failed");
        } else {
            tracing::warn!(status = %status, error = %err, "Request rejected");
        }
        ErrorResponse::new(status, self.message(&err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bad_json() -> ApiError {
        ApiError::InvalidBody(serde_json::from_str::<serde_json::Value>("{").unwrap_err())
    }

    #[test]
    fn legacy_mapping_preserves_historical_codes() {
        let policy = ErrorPolicy::default();

        assert_eq!(policy.status(&bad_json()), StatusCode::BAD_REQUEST);
        assert_eq!(policy.status(&ApiError::MissingId), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            policy.status(&ApiError::Store(StoreError::NotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            policy.status(&ApiError::Store(StoreError::Conflict("dup".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn strict_mapping_distinguishes_client_errors() {
        let policy = ErrorPolicy::new(StatusMapping::Strict, true);

        assert_eq!(policy.status(&ApiError::MissingId), StatusCode::BAD_REQUEST);
        assert_eq!(
            policy.status(&ApiError::Store(StoreError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            policy.status(&ApiError::Store(StoreError::Conflict("dup".into()))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            policy.status(&ApiError::Store(StoreError::Database(sqlx::Error::PoolClosed))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn exposed_messages_are_verbatim() {
        let policy = ErrorPolicy::default();
        assert_eq!(
            policy.message(&ApiError::Store(StoreError::NotFound)),
            "no rows returned by a query that expected to return at least one row"
        );
        assert_eq!(policy.message(&ApiError::MissingId), "id is null");
    }

    #[test]
    fn sanitized_messages_hide_driver_text() {
        let policy = ErrorPolicy::new(StatusMapping::Legacy, false);
        let err = ApiError::Store(StoreError::Database(sqlx::Error::PoolClosed));

        assert_eq!(policy.message(&err), "internal storage error");
        assert_eq!(policy.message(&bad_json()), "invalid request body");
        assert_eq!(policy.message(&ApiError::MissingId), MISSING_ID);
    }

    #[test]
    fn framework_failures_keep_their_status() {
        for policy in [
            ErrorPolicy::default(),
            ErrorPolicy::new(StatusMapping::Strict, false),
        ] {
            assert_eq!(policy.status(&ApiError::RouteNotFound), StatusCode::NOT_FOUND);
            assert_eq!(
                policy.status(&ApiError::MethodNotAllowed),
                StatusCode::METHOD_NOT_ALLOWED
            );
            assert_eq!(policy.status(&ApiError::Timeout), StatusCode::REQUEST_TIMEOUT);
        }
    }

    #[test]
    fn render_builds_envelope() {
        let policy = ErrorPolicy::new(StatusMapping::Strict, false);
        let response = policy.render(ApiError::Store(StoreError::NotFound));
        assert_eq!(response, ErrorResponse::new(StatusCode::NOT_FOUND, "article not found"));
    }
}
