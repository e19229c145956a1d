//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the article handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Give framework-produced failures (timeouts) the JSON error envelope
//! - Serve each accepted connection over HTTP/1.1 with header limits
//! - Drain live connections on shutdown within the configured deadline

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, State},
    http::{Request, StatusCode},
    middleware::map_response_with_state,
    response::{IntoResponse, Response},
    Router,
};
use hyper::{body::Incoming, server::conn::http1, service::service_fn};
use hyper_util::rt::{TokioIo, TokioTimer};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tower::ServiceExt;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::error::{ApiError, ErrorPolicy};
use crate::http::handlers;
use crate::http::request::RequestIdExt;
use crate::http::response::ErrorResponse;
use crate::net::connection::ConnectionTracker;
use crate::net::listener::{ConnectionPermit, Listener};
use crate::service::ArticleService;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub articles: Arc<dyn ArticleService>,
    pub errors: ErrorPolicy,
}

impl AppState {
    pub fn new(articles: Arc<dyn ArticleService>, errors: ErrorPolicy) -> Self {
        Self { articles, errors }
    }

    /// Render a failure through the error policy.
    pub fn fail(&self, err: impl Into<ApiError>) -> ErrorResponse {
        self.errors.render(err.into())
    }
}

/// HTTP server for the articles API.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server around an article service.
    pub fn new(config: AppConfig, articles: Arc<dyn ArticleService>) -> Self {
        let state = AppState::new(articles, ErrorPolicy::from_config(&config.api));
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        handlers::routes()
            .with_state(state.clone())
            .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                config.timeouts.write(),
            ))
            .layer(map_response_with_state(state, envelope_timeout))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request.request_id(),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for serving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain connections.
    pub async fn run(
        self,
        listener: Listener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let tracker = ConnectionTracker::new();

        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer, permit)) => self.spawn_connection(stream, peer, permit, &tracker),
                    Err(e) => {
                        tracing::warn!(error = %e, "Accept failed");
                        tokio::time::sleep(Duration::from_millis(100)).await;
                    }
                },
                _ = shutdown.recv() => {
                    tracing::info!("Shutdown signal received");
                    break;
                }
            }
        }

        // Stop accepting before asking connections to wind down.
        drop(listener);

        let deadline = self.config.timeouts.shutdown();
        tracing::info!(
            active_connections = tracker.active_count(),
            deadline_secs = deadline.as_secs(),
            "Draining connections"
        );
        tracker.begin_drain();

        if tokio::time::timeout(deadline, tracker.wait_for_idle()).await.is_err() {
            tracing::warn!(
                remaining = tracker.active_count(),
                "Drain deadline elapsed, abandoning connections"
            );
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    fn spawn_connection(
        &self,
        stream: TcpStream,
        peer: SocketAddr,
        permit: ConnectionPermit,
        tracker: &ConnectionTracker,
    ) {
        let router = self.router.clone();
        let guard = tracker.track();
        let mut drain = tracker.drain_receiver();
        let read_timeout = self.config.timeouts.read();
        let max_header_bytes = self.config.limits.max_header_bytes;

        tokio::spawn(async move {
            let _permit = permit;
            let service = service_fn(move |request: Request<Incoming>| {
                router.clone().oneshot(request)
            });

            let mut builder = http1::Builder::new();
            builder
                .timer(TokioTimer::new())
                .header_read_timeout(read_timeout)
                .max_buf_size(max_header_bytes);

            let conn = builder.serve_connection(TokioIo::new(stream), service);
            let mut conn = std::pin::pin!(conn);
            let mut draining = false;

            let result = loop {
                tokio::select! {
                    res = conn.as_mut() => break res,
                    _ = drain.changed(), if !draining => {
                        draining = true;
                        conn.as_mut().graceful_shutdown();
                    }
                }
            };

            if let Err(e) = result {
                tracing::debug!(
                    connection_id = %guard.id(),
                    peer_addr = %peer,
                    error = %e,
                    "Connection ended with error"
                );
            }
        });
    }
}

/// Replace the bare timeout response with the error envelope.
async fn envelope_timeout(State(state): State<AppState>, response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return state.fail(ApiError::Timeout).into_response();
    }
    response
}
