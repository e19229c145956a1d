//! In-memory article store.
//!
//! Mirrors the PostgreSQL store's observable behavior: same not-found
//! outcome, same listing order, idempotent delete. Rows live only as long
//! as the process.

use chrono::Utc;
use futures_util::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::model::{Article, ArticleDraft};
use crate::store::{ArticleStore, StoreError, StoreResult};

/// A thread-safe, process-local article table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArticleStore {
    /// Rows in insertion order.
    rows: Arc<RwLock<Vec<Article>>>,
}

impl InMemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArticleStore for InMemoryArticleStore {
    fn create(&self, draft: ArticleDraft) -> BoxFuture<'_, StoreResult<Article>> {
        async move {
            let id = draft.id_or_generate();
            let mut rows = self.rows.write().await;

            if rows.iter().any(|a| a.id == id) {
                return Err(StoreError::Conflict(
                    "duplicate key value violates unique constraint \"articles_pkey\"".to_string(),
                ));
            }

            let article = Article {
                id,
                title: draft.title,
                text: draft.text,
                authors: draft.authors,
                created_at: Utc::now(),
            };
            rows.push(article.clone());
            Ok(article)
        }
        .boxed()
    }

    fn get_all(&self) -> BoxFuture<'_, StoreResult<Vec<Article>>> {
        async move {
            let mut articles: Vec<Article> = self.rows.read().await.iter().rev().cloned().collect();
            // Stable sort: equal timestamps keep newest-insert-first.
            articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(articles)
        }
        .boxed()
    }

    fn get_one<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<Article>> {
        async move {
            self.rows
                .read()
                .await
                .iter()
                .find(|a| a.id == id)
                .cloned()
                .ok_or(StoreError::NotFound)
        }
        .boxed()
    }

    fn update<'a>(
        &'a self,
        id: &'a str,
        draft: ArticleDraft,
    ) -> BoxFuture<'a, StoreResult<Article>> {
        async move {
            let mut rows = self.rows.write().await;
            let article = rows
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or(StoreError::NotFound)?;

            article.title = draft.title;
            article.text = draft.text;
            article.authors = draft.authors;
            Ok(article.clone())
        }
        .boxed()
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<()>> {
        async move {
            self.rows.write().await.retain(|a| a.id != id);
            Ok(())
        }
        .boxed()
    }
}
