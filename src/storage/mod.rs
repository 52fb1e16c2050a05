//! Credential storage subsystem.
//!
//! # Data Flow
//! ```text
//! Session login
//!     → store.set("access_token", token)
//!
//! Every outgoing request (any client instance):
//!     → BearerAuth interceptor
//!     → store.get("access_token")
//!     → Authorization header (or none)
//! ```
//!
//! # Design Decisions
//! - The store owns the credential; client instances only look it up by key
//! - Injected as `Arc<dyn CredentialStore>`, never a process-wide global
//! - Reads are synchronous and never mutate the store

pub mod file;
pub mod memory;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a credential store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backing medium could not be read or written.
    #[error("storage unavailable: {0}")]
    Io(#[from] std::io::Error),

    /// Backing medium holds data that cannot be interpreted.
    #[error("storage corrupt: {0}")]
    Corrupt(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A key-value string store holding credentials.
pub trait CredentialStore: Send + Sync + std::fmt::Debug {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete the value under `key`. Missing keys are not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
