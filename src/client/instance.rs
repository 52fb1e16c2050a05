//! A named HTTP client bound to one backend API segment.
//!
//! # Responsibilities
//! - Resolve relative paths against the segment's base address
//! - Run the interceptor chain on every request before it leaves
//! - Map transport, status and decoding failures onto `ClientError`
//!
//! # Design Decisions
//! - Paths are concatenated onto the base address, so `/users` on
//!   `http://host/api/admin` targets `http://host/api/admin/users`
//! - Absolute URLs bypass the base address
//! - JSON bodies are encoded before the request is built, so an unencodable
//!   body is a `Serialization` error and never a transport one
//! - No retries; every failure reaches the caller unmodified

use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Request, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::client::error::{ClientError, ClientResult};
use crate::client::interceptor::{InterceptorChain, RequestInterceptor};
use crate::config::CredentialMode;
use crate::observability::metrics;

/// Immutable transport settings for one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_address: Url,
    pub credential_mode: CredentialMode,
}

/// Optional request payload for `execute`.
#[derive(Debug, Clone, Default)]
pub enum Payload {
    #[default]
    Empty,
    /// JSON request body.
    Json(serde_json::Value),
    /// URL query parameters.
    Query(Vec<(String, String)>),
}

/// A completed, successful response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Decode the body as JSON. An empty body decodes as `null`.
    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        let bytes: &[u8] = if self.body.is_empty() { b"null" } else { &self.body };
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A configured HTTP sender for one backend segment.
#[derive(Debug, Clone)]
pub struct ClientInstance {
    name: String,
    config: ClientConfig,
    http: reqwest::Client,
    chain: InterceptorChain,
}

impl ClientInstance {
    /// Create an instance with an empty interceptor chain.
    pub fn new(name: impl Into<String>, config: ClientConfig, http: reqwest::Client) -> Self {
        Self {
            name: name.into(),
            config,
            http,
            chain: InterceptorChain::new(),
        }
    }

    /// Register an interceptor, replacing any with the same name.
    pub fn with_interceptor(mut self, interceptor: std::sync::Arc<dyn RequestInterceptor>) -> Self {
        self.chain.register(interceptor);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_address(&self) -> &Url {
        &self.config.base_address
    }

    pub fn interceptors(&self) -> &InterceptorChain {
        &self.chain
    }

    /// Resolve a relative path (or absolute URL) to a full request URL.
    pub fn url_for(&self, path: &str) -> ClientResult<Url> {
        resolve_url(&self.config.base_address, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.call(Method::GET, path, |b| b).await?.json()
    }

    pub async fn get_with_query<Q, T>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(Method::GET, path, |b| b.query(query)).await?.json()
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_vec(body)?;
        self.call(Method::POST, path, |b| with_json(b, body)).await?.json()
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_vec(body)?;
        self.call(Method::PUT, path, |b| with_json(b, body)).await?.json()
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_vec(body)?;
        self.call(Method::PATCH, path, |b| with_json(b, body)).await?.json()
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.call(Method::DELETE, path, |b| b).await?.json()
    }

    /// Send any method with an optional payload and return the raw response.
    pub async fn execute(&self, method: Method, path: &str, payload: Payload) -> ClientResult<ApiResponse> {
        let request = self.prepare(method, path, payload)?;
        self.send(request).await
    }

    /// Build a request and run the interceptor chain on it without sending.
    pub fn prepare(&self, method: Method, path: &str, payload: Payload) -> ClientResult<Request> {
        match payload {
            Payload::Empty => self.build(method, path, |b| b),
            Payload::Json(value) => {
                let body = serde_json::to_vec(&value)?;
                self.build(method, path, |b| with_json(b, body))
            }
            Payload::Query(query) => self.build(method, path, |b| b.query(&query)),
        }
    }

    async fn call<F>(&self, method: Method, path: &str, customize: F) -> ClientResult<ApiResponse>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let request = self.build(method, path, customize)?;
        self.send(request).await
    }

    fn build<F>(&self, method: Method, path: &str, customize: F) -> ClientResult<Request>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url_for(path)?;
        let mut request = customize(self.http.request(method, url))
            .build()
            .map_err(ClientError::InvalidRequest)?;
        self.chain.apply(&mut request)?;
        Ok(request)
    }

    /// Send a prepared request.
    pub async fn send(&self, request: Request) -> ClientResult<ApiResponse> {
        let start = Instant::now();
        let method = request.method().clone();
        let url = request.url().clone();
        let authenticated = request.headers().contains_key(AUTHORIZATION);

        if !authenticated {
            metrics::record_credential_missing(&self.name);
        }

        tracing::debug!(
            client = %self.name,
            method = %method,
            url = %url,
            authenticated,
            "Sending request"
        );

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_request(&self.name, method.as_str(), None, start);
                tracing::warn!(
                    client = %self.name,
                    method = %method,
                    url = %url,
                    error = %e,
                    "Request failed before a response arrived"
                );
                return Err(ClientError::Transport(e));
            }
        };

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        metrics::record_request(&self.name, method.as_str(), Some(status.as_u16()), start);

        if !status.is_success() {
            tracing::warn!(
                client = %self.name,
                method = %method,
                url = %url,
                status = status.as_u16(),
                "Backend returned error status"
            );
            return Err(ClientError::HttpStatus {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(ApiResponse { status, headers, body })
    }
}

fn with_json(builder: RequestBuilder, body: Vec<u8>) -> RequestBuilder {
    builder
        .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .body(body)
}

/// Join `path` onto `base`, keeping the base's own path segments.
pub fn resolve_url(base: &Url, path: &str) -> ClientResult<Url> {
    let invalid = |e: url::ParseError| ClientError::InvalidUrl {
        path: path.to_string(),
        reason: e.to_string(),
    };

    if is_absolute_url(path) {
        return Url::parse(path).map_err(invalid);
    }

    let base = base.as_str().trim_end_matches('/');
    let joined = match path.trim_start_matches('/') {
        "" => base.to_string(),
        rest => format!("{}/{}", base, rest),
    };
    Url::parse(&joined).map_err(invalid)
}

fn is_absolute_url(path: &str) -> bool {
    let Some((scheme, _)) = path.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
