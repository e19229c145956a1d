//! Request identification.
//!
//! # Responsibilities
//! - Name the request id header shared by the id layers and the trace span
//! - Read the id back out of a request for logging
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing (outermost layer)
//! - Ids are UUID v4, generated only when the client sent none

use axum::http::Request;

/// Header carrying the request id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Access to the request id set by `SetRequestIdLayer`.
pub trait RequestIdExt {
    /// The request id, or `"unknown"` when absent or not valid UTF-8.
    fn request_id(&self) -> &str;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}
