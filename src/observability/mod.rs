//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!
//! Per request (installed in http::server):
//!     → x-request-id set/propagated
//!     → tower-http TraceLayer span per request
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing outside local runs
//! - Request ID flows through the trace span and the response headers

pub mod logging;
