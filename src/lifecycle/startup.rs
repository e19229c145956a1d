//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the storage backend (pool + schema, or in-memory)
//! - Wire Store → Service → HTTP server in dependency order
//! - Bind the listener last, so traffic only arrives when ready
//! - Release the pool once the server has drained
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Config is validated again here, since library callers may skip `config::load`
//! - `Application` owns every resource it opens; nothing is global

use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::config::validation::validate_config;
use crate::config::{AppConfig, ConfigError, StorageBackend};
use crate::http::HttpServer;
use crate::net::{Listener, ListenerError};
use crate::service::{ArticleService, Articles};
use crate::store::{ArticleStore, InMemoryArticleStore, PostgresArticleStore};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to initialize database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to start listener: {0}")]
    Listener(#[from] ListenerError),
}

/// A fully wired, bound, not-yet-serving service.
pub struct Application {
    server: HttpServer,
    listener: Listener,
    pool: Option<PgPool>,
    local_addr: SocketAddr,
}

impl Application {
    /// Open storage, build the layers and bind the listener.
    pub async fn build(config: AppConfig) -> Result<Self, StartupError> {
        validate_config(&config).map_err(ConfigError::Validation)?;
        tracing::info!(env = %config.env, "Starting articles service");

        let (store, pool) = open_store(&config).await?;
        tracing::info!(backend = ?config.database.backend, "Store initialized");

        let articles: Arc<dyn ArticleService> = Arc::new(Articles::new(store));
        tracing::info!("Service initialized");

        let listener = Listener::bind(&config.listener).await?;
        let local_addr = listener.local_addr().map_err(ListenerError::Bind)?;

        let server = HttpServer::new(config, articles);
        tracing::info!("Handlers initialized");

        Ok(Self {
            server,
            listener,
            pool,
            local_addr,
        })
    }

    /// The address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until `shutdown` fires, drain, then close the database pool.
    pub async fn run(self, shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let result = self.server.run(self.listener, shutdown).await;

        if let Some(pool) = self.pool {
            pool.close().await;
            tracing::info!("Database connection closed");
        }

        result
    }
}

async fn open_store(
    config: &AppConfig,
) -> Result<(Arc<dyn ArticleStore>, Option<PgPool>), StartupError> {
    match config.database.backend {
        StorageBackend::Postgres => {
            let pool = PostgresArticleStore::connect(&config.database).await?;
            let store = PostgresArticleStore::new(pool.clone());
            if config.database.create_schema {
                store.ensure_schema().await?;
            }
            let store: Arc<dyn ArticleStore> = Arc::new(store);
            Ok((store, Some(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; articles will not survive a restart");
            let store: Arc<dyn ArticleStore> = Arc::new(InMemoryArticleStore::new());
            Ok((store, None))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::ValidationError;

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.listener.bind_address = "127.0.0.1:0".to_string();
        config.database.backend = StorageBackend::Memory;
        config
    }

    #[tokio::test]
    async fn build_binds_an_ephemeral_port() {
        let app = Application::build(memory_config()).await.unwrap();
        assert_ne!(app.local_addr().port(), 0);
    }

    #[tokio::test]
    async fn build_rejects_invalid_config() {
        let mut config = memory_config();
        config.limits.max_header_bytes = 1024;

        let err = Application::build(config).await.err().unwrap();
        match err {
            StartupError::Config(ConfigError::Validation(errors)) => {
                assert!(matches!(errors[..], [ValidationError::HeaderLimit { .. }]));
            }
            other => panic!("expected config error, got {}", other),
        }
    }
}
