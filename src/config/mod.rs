//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → ClientRegistry + RouteTable built once at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; instances are never reconfigured
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::AppConfig;
pub use schema::CredentialConfig;
pub use schema::CredentialMode;
pub use schema::ObservabilityConfig;
pub use schema::RouteConfig;
pub use schema::SegmentConfig;
pub use schema::TimeoutConfig;
