//! Article service layer.
//!
//! # Responsibilities
//! - Define the domain-facing contract used by request handlers
//! - Forward every operation to an injected `ArticleStore`
//!
//! # Design Decisions
//! - No validation, enrichment or transformation happens here
//! - Handlers depend on `Arc<dyn ArticleService>`, never on a concrete store

pub mod article;

use futures_util::future::BoxFuture;

use crate::model::{Article, ArticleDraft};
use crate::store::StoreResult;

pub use article::Articles;

/// Article use cases exposed to the HTTP layer.
pub trait ArticleService: Send + Sync {
    fn create(&self, draft: ArticleDraft) -> BoxFuture<'_, StoreResult<Article>>;

    fn get_all(&self) -> BoxFuture<'_, StoreResult<Vec<Article>>>;

    fn get_one<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<Article>>;

    fn update<'a>(&'a self, id: &'a str, draft: ArticleDraft)
        -> BoxFuture<'a, StoreResult<Article>>;

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<()>>;
}
