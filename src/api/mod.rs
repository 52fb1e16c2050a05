//! Typed endpoints over the three backend segments.
//!
//! # Data Flow
//! ```text
//! AuthApi / ParkingApi / AdminApi (borrow a ClientInstance)
//!     → instance verb (credential injected by the registry policy)
//!     → typed response model
//!
//! Session
//!     → AuthApi::login
//!     → store.set(storage_key, access_token)
//! ```
//!
//! # Design Decisions
//! - Wrappers hold no state of their own; auth is entirely the instance's job
//! - Response envelopes (`{"lots": [...]}`) are unwrapped here
//! - Unknown response fields are ignored

pub mod admin;
pub mod auth;
pub mod export;
pub mod parking;
pub mod session;

use serde::{Deserialize, Serialize};

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use export::CsvExport;
pub use parking::ParkingApi;
pub use session::Session;

/// Plain `{"message": "..."}` acknowledgement.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Message {
    #[serde(default)]
    pub message: String,
}

/// Account details as returned by the `me` endpoints.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub role: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}
