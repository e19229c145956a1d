//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Pick output format and default level from the deployment environment
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for dev/prod, pretty format for local development
//! - `RUST_LOG` wins over `observability.log_level`, which wins over the
//!   environment default

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{schema::ObservabilityConfig, Environment};

/// Default filter directive for an environment.
pub fn default_directive(env: Environment) -> &'static str {
    match env {
        Environment::Local | Environment::Dev => "articles_api=debug,tower_http=debug,sqlx=warn,info",
        Environment::Prod => "articles_api=info,tower_http=info,sqlx=warn,info",
    }
}

/// Build the filter, honoring `RUST_LOG` first.
pub fn build_filter(env: Environment, config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = if config.log_level.trim().is_empty() {
            default_directive(env)
        } else {
            config.log_level.as_str()
        };
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(default_directive(env)))
    })
}

/// Install the global subscriber.
///
/// Returns an error if a subscriber has already been installed.
pub fn init(
    env: Environment,
    config: &ObservabilityConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = build_filter(env, config);
    let registry = tracing_subscriber::registry().with(filter);

    match env {
        Environment::Local => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
        Environment::Dev | Environment::Prod => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    }
}
