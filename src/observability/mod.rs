//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Client instances and the navigation dispatcher produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stderr (human or JSON lines)
//!     → whatever metrics recorder the host application installs
//! ```
//!
//! # Design Decisions
//! - Request ID (`x-request-id`) stamped on every outgoing request
//! - Metrics are cheap (atomic increments) and no-ops without a recorder

pub mod logging;
pub mod metrics;
