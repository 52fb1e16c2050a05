//! Named client instances sharing one credential-injection policy.
//!
//! # Responsibilities
//! - Build one `ClientInstance` per configured segment
//! - Attach the same bearer policy to every instance
//! - Hand out instances by logical name
//!
//! # Design Decisions
//! - Built once at startup; instances are never added, removed or reconfigured
//! - One cookie jar per registry, shared by every `with_credentials` instance
//! - The store is injected, so tests and the CLI choose where tokens live

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use url::Url;

use crate::client::error::{ClientError, ClientResult};
use crate::client::instance::{ClientConfig, ClientInstance};
use crate::client::interceptor::{BearerAuth, RequestId};
use crate::config::{AppConfig, CredentialMode, SegmentConfig, TimeoutConfig};
use crate::storage::CredentialStore;

pub const ADMIN: &str = "admin";
pub const AUTH: &str = "auth";
pub const PARKING: &str = "parking";

/// Attach the bearer credential policy to an instance.
///
/// This is the only place the policy is configured; the registry calls it
/// once per instance. Calling it again on the same instance replaces the
/// policy rather than stacking a second copy.
pub fn attach_auth_policy(
    instance: ClientInstance,
    store: Arc<dyn CredentialStore>,
    key: &str,
) -> ClientInstance {
    instance
        .with_interceptor(Arc::new(RequestId))
        .with_interceptor(Arc::new(BearerAuth::new(store, key)))
}

/// The fixed set of named client instances.
#[derive(Debug)]
pub struct ClientRegistry {
    instances: BTreeMap<String, ClientInstance>,
    store: Arc<dyn CredentialStore>,
    storage_key: String,
}

impl ClientRegistry {
    /// Build every instance from the application configuration.
    pub fn from_config(config: &AppConfig, store: Arc<dyn CredentialStore>) -> ClientResult<Self> {
        Self::new(
            &config.segments,
            store,
            &config.credentials.storage_key,
            &config.timeouts,
        )
    }

    /// Build one instance per segment.
    pub fn new(
        segments: &[SegmentConfig],
        store: Arc<dyn CredentialStore>,
        storage_key: &str,
        timeouts: &TimeoutConfig,
    ) -> ClientResult<Self> {
        let jar = Arc::new(Jar::default());
        let mut instances = BTreeMap::new();

        for segment in segments {
            if instances.contains_key(&segment.name) {
                return Err(ClientError::DuplicateClient(segment.name.clone()));
            }

            let base_address =
                Url::parse(&segment.base_address).map_err(|e| ClientError::InvalidUrl {
                    path: segment.base_address.clone(),
                    reason: e.to_string(),
                })?;

            let mut builder = reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(timeouts.connect_secs))
                .timeout(Duration::from_secs(timeouts.request_secs));
            if segment.credential_mode == CredentialMode::WithCredentials {
                builder = builder.cookie_provider(jar.clone());
            }
            let http = builder.build()?;

            let config = ClientConfig {
                base_address,
                credential_mode: segment.credential_mode,
            };
            let instance = attach_auth_policy(
                ClientInstance::new(segment.name.clone(), config, http),
                store.clone(),
                storage_key,
            );

            tracing::info!(
                client = %segment.name,
                base_address = %segment.base_address,
                credential_mode = ?segment.credential_mode,
                "Client instance registered"
            );

            instances.insert(segment.name.clone(), instance);
        }

        Ok(Self {
            instances,
            store,
            storage_key: storage_key.to_string(),
        })
    }

    /// Look up an instance by logical name.
    pub fn get(&self, name: &str) -> ClientResult<&ClientInstance> {
        self.instances
            .get(name)
            .ok_or_else(|| ClientError::UnknownClient(name.to_string()))
    }

    pub fn admin(&self) -> ClientResult<&ClientInstance> {
        self.get(ADMIN)
    }

    pub fn auth(&self) -> ClientResult<&ClientInstance> {
        self.get(AUTH)
    }

    pub fn parking(&self) -> ClientResult<&ClientInstance> {
        self.get(PARKING)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.instances.keys().map(String::as_str)
    }

    pub fn instances(&self) -> impl Iterator<Item = &ClientInstance> {
        self.instances.values()
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
