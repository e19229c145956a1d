//! PostgreSQL-backed article store.

use futures_util::future::{BoxFuture, FutureExt};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::model::{Article, ArticleDraft};
use crate::store::{ArticleStore, StoreResult};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS articles (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    text TEXT NOT NULL,
    authors TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)";

const INSERT: &str = "INSERT INTO articles (id, title, text, authors) VALUES ($1, $2, $3, $4) \
     RETURNING id, title, text, authors, created_at";

const SELECT_ALL: &str =
    "SELECT id, title, text, authors, created_at FROM articles ORDER BY created_at DESC";

const SELECT_ONE: &str =
    "SELECT id, title, text, authors, created_at FROM articles WHERE id = $1";

const UPDATE: &str = "UPDATE articles SET title = $2, text = $3, authors = $4 WHERE id = $1 \
     RETURNING id, title, text, authors, created_at";

const DELETE: &str = "DELETE FROM articles WHERE id = $1";

/// Article store over a shared `PgPool`.
///
/// The pool is safe for concurrent use; each operation holds a connection
/// only for its single statement.
#[derive(Debug, Clone)]
pub struct PostgresArticleStore {
    pool: PgPool,
}

impl PostgresArticleStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool from configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await?;

        tracing::info!(
            max_connections = config.max_connections,
            "Database pool opened"
        );
        Ok(pool)
    }

    /// Create the articles table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        tracing::debug!("Articles table ready");
        Ok(())
    }
}

impl ArticleStore for PostgresArticleStore {
    fn create(&self, draft: ArticleDraft) -> BoxFuture<'_, StoreResult<Article>> {
        async move {
            let id = draft.id_or_generate();
            let article = sqlx::query_as::<_, Article>(INSERT)
                .bind(&id)
                .bind(&draft.title)
                .bind(&draft.text)
                .bind(&draft.authors)
                .fetch_one(&self.pool)
                .await?;
            Ok(article)
        }
        .boxed()
    }

    fn get_all(&self) -> BoxFuture<'_, StoreResult<Vec<Article>>> {
        async move {
            let articles = sqlx::query_as::<_, Article>(SELECT_ALL)
                .fetch_all(&self.pool)
                .await?;
            Ok(articles)
        }
        .boxed()
    }

    fn get_one<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<Article>> {
        async move {
            let article = sqlx::query_as::<_, Article>(SELECT_ONE)
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
            Ok(article)
        }
        .boxed()
    }

    fn update<'a>(
        &'a self,
        id: &'a str,
        draft: ArticleDraft,
    ) -> BoxFuture<'a, StoreResult<Article>> {
        async move {
            let article = sqlx::query_as::<_, Article>(UPDATE)
                .bind(id)
                .bind(&draft.title)
                .bind(&draft.text)
                .bind(&draft.authors)
                .fetch_one(&self.pool)
                .await?;
            Ok(article)
        }
        .boxed()
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<()>> {
        async move {
            let result = sqlx::query(DELETE).bind(id).execute(&self.pool).await?;
            if result.rows_affected() == 0 {
                tracing::debug!(id = %id, "Delete matched no rows");
            }
            Ok(())
        }
        .boxed()
    }
}
