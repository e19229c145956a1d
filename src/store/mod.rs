//! Article storage subsystem.
//!
//! # Data Flow
//! ```text
//! ArticleService
//!     → ArticleStore (object-safe trait, boxed futures)
//!         → postgres.rs (sqlx::PgPool, one statement per operation)
//!         → memory.rs   (RwLock<Vec<Article>>, same semantics)
//! ```
//!
//! # Design Decisions
//! - Every operation is a single autonomous statement; no transactions
//! - "No rows" from the driver surfaces as `StoreError::NotFound`
//! - Delete is idempotent: zero rows affected is success

pub mod memory;
pub mod postgres;

use futures_util::future::BoxFuture;
use thiserror::Error;

use crate::model::{Article, ArticleDraft};

pub use memory::InMemoryArticleStore;
pub use postgres::PostgresArticleStore;

/// Errors raised by article stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row matched the requested id.
    ///
    /// Carries the driver's own wording so both backends read the same.
    #[error("no rows returned by a query that expected to return at least one row")]
    NotFound,

    /// Insert collided with an existing primary key.
    #[error("{0}")]
    Conflict(String),

    /// Any other driver or connectivity failure.
    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Conflict(db.message().to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable CRUD over the articles table.
pub trait ArticleStore: Send + Sync {
    /// Insert a new article. Uses `draft.id` when set, otherwise mints one.
    fn create(&self, draft: ArticleDraft) -> BoxFuture<'_, StoreResult<Article>>;

    /// All articles, newest first.
    fn get_all(&self) -> BoxFuture<'_, StoreResult<Vec<Article>>>;

    fn get_one<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<Article>>;

    /// Overwrite title, text and authors. `draft.id` is ignored.
    fn update<'a>(&'a self, id: &'a str, draft: ArticleDraft)
        -> BoxFuture<'a, StoreResult<Article>>;

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<()>>;
}
