//! Navigation history boundary.
//!
//! # Responsibilities
//! - Hold the current path
//! - Notify listeners whenever the path changes
//!
//! # Design Decisions
//! - Listener registration is a `tokio::sync::watch` subscription; slow
//!   listeners only ever see the latest location
//! - Every change gets a strictly increasing sequence number, so a listener
//!   can tell whether it has already handled a change
//! - `MemoryHistory` keeps a bounded back stack; once full, the oldest entry
//!   is dropped (browsers cap session history the same way)

use std::sync::{Mutex, MutexGuard};

use tokio::sync::watch;

/// Default back-stack depth for `MemoryHistory`.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// A history entry as seen by listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    /// Sequence number of the change that produced this entry.
    pub seq: u64,
}

/// Path-based history surface the dispatcher drives.
pub trait History: Send + Sync + std::fmt::Debug {
    /// The path currently displayed.
    fn current(&self) -> String {
        self.location().path
    }

    /// The current entry with its sequence number.
    fn location(&self) -> Location;

    /// Make `path` the current path and notify listeners.
    fn push(&self, path: &str) -> Location;

    /// Return to the previous path. None when already at the oldest entry.
    fn back(&self) -> Option<Location>;

    /// Register a listener for path changes.
    fn subscribe(&self) -> watch::Receiver<Location>;
}

#[derive(Debug)]
struct Stack {
    entries: Vec<String>,
    seq: u64,
}

/// In-process history stack.
#[derive(Debug)]
pub struct MemoryHistory {
    stack: Mutex<Stack>,
    max_depth: usize,
    tx: watch::Sender<Location>,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self::with_max_depth(initial, DEFAULT_MAX_DEPTH)
    }

    /// History keeping at most `max_depth` entries (at least one).
    pub fn with_max_depth(initial: impl Into<String>, max_depth: usize) -> Self {
        let initial = initial.into();
        let (tx, _) = watch::channel(Location {
            path: initial.clone(),
            seq: 0,
        });
        Self {
            stack: Mutex::new(Stack {
                entries: vec![initial],
                seq: 0,
            }),
            max_depth: max_depth.max(1),
            tx,
        }
    }

    /// Number of entries on the back stack, current included.
    pub fn depth(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn lock(&self) -> MutexGuard<'_, Stack> {
        self.stack.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, stack: &mut Stack, path: String) -> Location {
        stack.seq += 1;
        let location = Location {
            path,
            seq: stack.seq,
        };
        self.tx.send_replace(location.clone());
        location
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Location {
        self.tx.borrow().clone()
    }

    fn push(&self, path: &str) -> Location {
        let mut stack = self.lock();
        stack.entries.push(path.to_string());
        if stack.entries.len() > self.max_depth {
            let excess = stack.entries.len() - self.max_depth;
            stack.entries.drain(..excess);
        }
        self.publish(&mut stack, path.to_string())
    }

    fn back(&self) -> Option<Location> {
        let mut stack = self.lock();
        if stack.entries.len() < 2 {
            return None;
        }
        stack.entries.pop();
        let previous = stack.entries.last()?.clone();
        Some(self.publish(&mut stack, previous))
    }

    fn subscribe(&self) -> watch::Receiver<Location> {
        self.tx.subscribe()
    }
}
