//! Domain model.
//!
//! # Data Flow
//! ```text
//! request body (JSON)
//!     → ArticleDraft (client-settable fields only)
//!     → store assigns id / created_at
//!     → Article (full row, returned to clients)
//! ```

pub mod article;

pub use article::{Article, ArticleDraft};
