//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;
use tokio::task::JoinHandle;

use articles_api::config::{AppConfig, StorageBackend};
use articles_api::{Application, Shutdown};

/// A running server on an ephemeral port, backed by the in-memory store.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the server to finish draining.
    #[allow(dead_code)]
    pub async fn stop(self) {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not stop in time")
            .expect("server task panicked")
            .expect("server returned an error");
    }
}

/// Config for a local, in-memory test server.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.database.backend = StorageBackend::Memory;
    config.timeouts.shutdown_secs = 2;
    config
}

/// Start a server with the given config.
pub async fn spawn_app_with(config: AppConfig) -> TestApp {
    let app = Application::build(config).await.unwrap();
    let addr = app.local_addr();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(app.run(server_shutdown));

    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap();

    TestApp {
        addr,
        client,
        shutdown,
        handle,
    }
}

/// Start a server with default test settings.
#[allow(dead_code)]
pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}
