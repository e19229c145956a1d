//! Articles API Library
//!
//! CRUD over HTTP/JSON for a single `articles` table.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ───────────────▶ net::listener ──▶ http::server ──▶ http::handlers
//!                                                              │
//!                                                              ▼
//!                                                     service::ArticleService
//!                                                              │
//!                                                              ▼
//!                                                     store::ArticleStore
//!                                                       (PostgreSQL / memory)
//!
//!     Cross-cutting: config, observability, lifecycle (startup/shutdown)
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod net;
pub mod observability;
pub mod service;
pub mod store;

pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::{Application, Shutdown};
pub use model::{Article, ArticleDraft};
