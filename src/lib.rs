//! Parking backend client library.
//!
//! Named HTTP client instances for the admin, auth and parking API segments,
//! all sharing one bearer-credential policy, plus the navigation table that
//! maps paths to views.

pub mod api;
pub mod client;
pub mod config;
pub mod observability;
pub mod routing;
pub mod storage;

pub use client::{ClientError, ClientInstance, ClientRegistry};
pub use config::AppConfig;
pub use routing::{Dispatcher, RouteTable};
pub use storage::CredentialStore;
