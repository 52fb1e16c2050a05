//! HTTP client subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     SegmentConfig[] + Arc<dyn CredentialStore>
//!     → registry.rs (one ClientInstance per segment)
//!     → attach_auth_policy (same interceptors on every instance)
//!
//! Per request:
//!     instance.get/post/put/patch/delete(path, payload)
//!     → instance.rs (resolve path against base address)
//!     → interceptor.rs (request ID, bearer credential)
//!     → reqwest send
//!     → ApiResponse or ClientError
//! ```
//!
//! # Design Decisions
//! - Instances are independent; concurrent sends on different instances may race
//! - The only shared state is the read-only credential lookup and the cookie jar
//! - No retries or silent recovery in this layer

pub mod error;
pub mod instance;
pub mod interceptor;
pub mod registry;

pub use error::{ClientError, ClientResult};
pub use instance::{ApiResponse, ClientConfig, ClientInstance, Payload};
pub use interceptor::{BearerAuth, InterceptorChain, RequestId, RequestInterceptor};
pub use registry::{attach_auth_policy, ClientRegistry};
