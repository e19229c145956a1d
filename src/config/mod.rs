//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (ARTICLES_ENV, ARTICLES_ADDRESS, DATABASE_URL)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → handed to Application at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, ConfigError};
pub use schema::AppConfig;
pub use schema::ApiConfig;
pub use schema::DatabaseConfig;
pub use schema::Environment;
pub use schema::ListenerConfig;
pub use schema::StatusMapping;
pub use schema::StorageBackend;
