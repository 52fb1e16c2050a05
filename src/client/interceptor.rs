//! Request interceptors.
//!
//! # Responsibilities
//! - Mutate an outgoing request after it is built and before it is sent
//! - Attach the bearer credential looked up from the store
//! - Tag each request with a correlation ID
//!
//! # Design Decisions
//! - Interceptors are identified by name; registering a name twice replaces
//!   the earlier entry, so a policy can never run twice on one instance
//! - Headers are inserted, never appended
//! - An interceptor error aborts the send; nothing reaches the network

use std::sync::Arc;

use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Request;

use crate::client::error::ClientResult;
use crate::storage::{CredentialStore, StorageError};

/// Header carrying the per-request correlation ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Trait for hooks applied to every outgoing request.
pub trait RequestInterceptor: Send + Sync + std::fmt::Debug {
    /// Stable identifier used for de-duplication.
    fn name(&self) -> &'static str;

    /// Modify the request in place, or fail the send.
    fn intercept(&self, request: &mut Request) -> ClientResult<()>;
}

/// Ordered list of interceptors owned by one client instance.
#[derive(Debug, Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interceptor, replacing one already registered under the same name.
    pub fn register(&mut self, interceptor: Arc<dyn RequestInterceptor>) {
        match self
            .interceptors
            .iter_mut()
            .find(|existing| existing.name() == interceptor.name())
        {
            Some(slot) => *slot = interceptor,
            None => self.interceptors.push(interceptor),
        }
    }

    /// Run every interceptor in registration order.
    pub fn apply(&self, request: &mut Request) -> ClientResult<()> {
        self.interceptors
            .iter()
            .try_for_each(|interceptor| interceptor.intercept(request))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.interceptors.iter().map(|i| i.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}

/// Attaches `Authorization: Bearer <token>` when the store holds a token.
#[derive(Debug, Clone)]
pub struct BearerAuth {
    store: Arc<dyn CredentialStore>,
    key: String,
}

impl BearerAuth {
    pub fn new(store: Arc<dyn CredentialStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl RequestInterceptor for BearerAuth {
    fn name(&self) -> &'static str {
        "bearer-auth"
    }

    fn intercept(&self, request: &mut Request) -> ClientResult<()> {
        let token = self.store.get(&self.key).map_err(|e| {
            tracing::error!(key = %self.key, error = %e, "Credential store read failed");
            e
        })?;

        // An empty string counts as no credential.
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(());
        };

        let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            StorageError::Corrupt(format!(
                "credential under '{}' is not a valid header value",
                self.key
            ))
        })?;
        value.set_sensitive(true);

        request.headers_mut().insert(AUTHORIZATION, value);
        Ok(())
    }
}

/// Generates a UUID v4 `x-request-id` unless the caller already set one.
#[derive(Debug, Clone, Default)]
pub struct RequestId;

impl RequestInterceptor for RequestId {
    fn name(&self) -> &'static str {
        "request-id"
    }

    fn intercept(&self, request: &mut Request) -> ClientResult<()> {
        let header = HeaderName::from_static(REQUEST_ID_HEADER);
        if !request.headers().contains_key(&header) {
            let id = uuid::Uuid::new_v4().to_string();
            if let Ok(value) = HeaderValue::from_str(&id) {
                request.headers_mut().insert(header, value);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::error::ClientError;
    use crate::storage::{MemoryStore, StorageResult};
    use reqwest::Method;

    fn request() -> Request {
        Request::new(
            Method::GET,
            "http://localhost:5000/api/admin/users".parse().unwrap(),
        )
    }

    #[derive(Debug)]
    struct BrokenStore;

    impl CredentialStore for BrokenStore {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Io(std::io::Error::other("disk gone")))
        }
        fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Ok(())
        }
        fn remove(&self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_bearer_attached_when_present() {
        let store = Arc::new(MemoryStore::with_entry("access_token", "abc123"));
        let auth = BearerAuth::new(store, "access_token");

        let mut req = request();
        auth.intercept(&mut req).unwrap();

        let values: Vec<_> = req.headers().get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0], "Bearer abc123");
        assert!(values[0].is_sensitive());
    }

    #[test]
    fn test_no_header_when_absent_or_empty() {
        let store = Arc::new(MemoryStore::new());
        let auth = BearerAuth::new(store.clone(), "access_token");

        let mut req = request();
        auth.intercept(&mut req).unwrap();
        assert!(req.headers().get(AUTHORIZATION).is_none());

        store.set("access_token", "").unwrap();
        auth.intercept(&mut req).unwrap();
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_replaces_existing_authorization() {
        let store = Arc::new(MemoryStore::with_entry("access_token", "fresh"));
        let auth = BearerAuth::new(store, "access_token");

        let mut req = request();
        req.headers_mut()
            .insert(AUTHORIZATION, HeaderValue::from_static("Bearer stale"));
        auth.intercept(&mut req).unwrap();
        auth.intercept(&mut req).unwrap();

        let values: Vec<_> = req.headers().get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values, ["Bearer fresh"]);
    }

    #[test]
    fn test_store_failure_propagates() {
        let auth = BearerAuth::new(Arc::new(BrokenStore), "access_token");
        let mut req = request();
        let err = auth.intercept(&mut req).unwrap_err();
        assert!(matches!(err, ClientError::StorageRead(StorageError::Io(_))));
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_unencodable_token_is_corrupt() {
        let store = Arc::new(MemoryStore::with_entry("access_token", "abc\n123"));
        let auth = BearerAuth::new(store, "access_token");
        let err = auth.intercept(&mut request()).unwrap_err();
        assert!(matches!(err, ClientError::StorageRead(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_chain_deduplicates_by_name() {
        let store: Arc<dyn CredentialStore> = Arc::new(MemoryStore::new());
        let mut chain = InterceptorChain::new();
        chain.register(Arc::new(RequestId));
        chain.register(Arc::new(BearerAuth::new(store.clone(), "access_token")));
        chain.register(Arc::new(BearerAuth::new(store, "access_token")));

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.names(), ["request-id", "bearer-auth"]);
    }

    #[test]
    fn test_request_id_preserved() {
        let mut req = request();
        RequestId.intercept(&mut req).unwrap();
        let first = req.headers().get(REQUEST_ID_HEADER).cloned().unwrap();
        RequestId.intercept(&mut req).unwrap();
        assert_eq!(req.headers().get(REQUEST_ID_HEADER), Some(&first));
        assert_eq!(first.to_str().unwrap().len(), 36);
    }
}
