//! Navigation routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation event ("navigate to P")
//!     → dispatcher.rs (strip query/fragment, push onto history)
//!     → router.rs (ordered table scan)
//!     → matcher.rs (exact path comparison)
//!     → Render { view } or no match
//!
//! Table construction (at startup):
//!     RouteConfig[]
//!     → RouteEntry[] in declaration order
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes built at startup, immutable at runtime
//! - No regex or prefix matching
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)

pub mod dispatcher;
pub mod history;
pub mod matcher;
pub mod router;

pub use dispatcher::{Dispatcher, Render};
pub use history::{History, Location, MemoryHistory};
pub use router::{RouteEntry, RouteMatch, RouteTable};
