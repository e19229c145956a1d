//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (hyper HTTP/1.1, header limits, middleware)
//!     → request.rs (request ID)
//!     → handlers.rs (decode, call ArticleService)
//!     → error.rs (classify failure, apply policy)
//!     → response.rs (entity or envelope)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use error::{ApiError, ErrorPolicy};
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use response::{ErrorBody, StatusBody};
pub use server::{AppState, HttpServer};
