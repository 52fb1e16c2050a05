//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Store file used when persistence is on and no path is configured,
/// relative to the home directory.
pub const DEFAULT_STORE_FILE: &str = ".parking-client/store.json";

/// Root configuration for the parking client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend API segments, one client instance per entry.
    pub segments: Vec<SegmentConfig>,

    /// Credential lookup settings shared by every client instance.
    pub credentials: CredentialConfig,

    /// Transport timeouts.
    pub timeouts: TimeoutConfig,

    /// Navigation table, consulted in order.
    pub routes: Vec<RouteConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            segments: ["admin", "auth", "parking"]
                .into_iter()
                .map(|name| SegmentConfig {
                    name: name.to_string(),
                    base_address: format!("http://localhost:5000/api/{name}"),
                    credential_mode: CredentialMode::WithCredentials,
                })
                .collect(),
            credentials: CredentialConfig::default(),
            timeouts: TimeoutConfig::default(),
            routes: vec![
                RouteConfig {
                    path: "/".to_string(),
                    view: "HomePage".to_string(),
                },
                RouteConfig {
                    path: "/admin".to_string(),
                    view: "AdminDashboard".to_string(),
                },
            ],
            observability: ObservabilityConfig::default(),
        }
    }
}

/// A named backend API segment.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SegmentConfig {
    /// Logical client name (e.g. "admin").
    pub name: String,

    /// Base address every relative path is resolved against.
    pub base_address: String,

    /// Whether cookies travel alongside header auth.
    #[serde(default)]
    pub credential_mode: CredentialMode,
}

/// Cross-origin credential handling for a client instance.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CredentialMode {
    /// Keep a cookie jar and send cookies with every request.
    #[default]
    WithCredentials,
    /// Never store or send cookies.
    None,
}

/// Credential store settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CredentialConfig {
    /// Key the bearer token is stored under.
    pub storage_key: String,

    /// Keep credentials on disk between runs.
    pub persist: bool,

    /// File-backed store location. `~/.parking-client/store.json` when unset.
    pub store_path: Option<String>,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            storage_key: "access_token".to_string(),
            persist: true,
            store_path: None,
        }
    }
}

impl CredentialConfig {
    /// Where the file store lives, or None for an in-memory store.
    ///
    /// Also None when persistence is on but no home directory can be found.
    pub fn resolved_store_path(&self) -> Option<PathBuf> {
        if !self.persist {
            return None;
        }
        match &self.store_path {
            Some(path) => Some(PathBuf::from(path)),
            None => dirs::home_dir().map(|home| home.join(DEFAULT_STORE_FILE)),
        }
    }
}

/// Timeout configuration handed to the transport.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// A single path to view mapping.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Exact path to match.
    pub path: String,

    /// View identifier rendered for the path.
    pub view: String,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
