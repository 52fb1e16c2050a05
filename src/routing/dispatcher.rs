//! Navigation dispatch.
//!
//! # Responsibilities
//! - Turn a "navigate to P" event into a single "render V" outcome
//! - Push navigations onto the history boundary
//! - Follow history changes and invoke a render callback per change
//!
//! # Design Decisions
//! - History is the only navigation memory; the dispatcher only remembers
//!   the sequence number of the last change it rendered
//! - A change rendered by `navigate` or `back` is not rendered again by the
//!   `run` listener, so every event yields exactly one render
//! - Query strings and fragments are stripped before resolution
//! - Resolution is synchronous; only `run` awaits

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::observability::metrics;
use crate::routing::history::{History, Location};
use crate::routing::router::RouteTable;

/// Outcome of one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Render {
    /// Path that was resolved.
    pub path: String,
    /// View to render, or None when no route matched.
    pub view: Option<String>,
}

impl Render {
    pub fn is_resolved(&self) -> bool {
        self.view.is_some()
    }
}

/// Resolves navigations against a route table.
#[derive(Debug)]
pub struct Dispatcher<H: History> {
    table: Arc<RouteTable>,
    history: H,
    rendered: Mutex<u64>,
}

impl<H: History> Dispatcher<H> {
    pub fn new(table: Arc<RouteTable>, history: H) -> Self {
        let rendered = Mutex::new(history.location().seq);
        Self {
            table,
            history,
            rendered,
        }
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Navigate to a location (path, optionally with query/fragment).
    pub fn navigate(&self, location: &str) -> Render {
        let mut rendered = self.lock_rendered();
        let entry = self.history.push(path_of(location));
        *rendered = entry.seq;
        self.render(&entry.path)
    }

    /// Go back one history entry.
    pub fn back(&self) -> Option<Render> {
        let mut rendered = self.lock_rendered();
        let entry = self.history.back()?;
        *rendered = entry.seq;
        Some(self.render(&entry.path))
    }

    /// Resolve whatever history currently shows.
    pub fn current(&self) -> Render {
        self.render(&self.history.current())
    }

    /// Resolve a path without touching history.
    pub fn render(&self, path: &str) -> Render {
        let resolved = self.table.resolve(path);
        metrics::record_navigation(resolved.is_match());

        match resolved.view() {
            Some(view) => tracing::debug!(path, view, "Navigation resolved"),
            None => tracing::debug!(path, "No route matched"),
        }

        Render {
            path: path.to_string(),
            view: resolved.view().map(str::to_string),
        }
    }

    /// Invoke `on_render` for every history change until `shutdown` completes.
    ///
    /// Changes made through this dispatcher were already rendered by the
    /// call that made them and are skipped.
    pub async fn run<F, S>(&self, mut on_render: F, shutdown: S)
    where
        F: FnMut(Render),
        S: Future<Output = ()>,
    {
        let mut changes = self.history.subscribe();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                changed = changes.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let location = changes.borrow_and_update().clone();
                    if let Some(render) = self.render_unseen(&location) {
                        on_render(render);
                    }
                }
                _ = &mut shutdown => break,
            }
        }

        tracing::debug!("Navigation listener stopped");
    }

    fn render_unseen(&self, location: &Location) -> Option<Render> {
        let mut rendered = self.lock_rendered();
        if location.seq <= *rendered {
            return None;
        }
        *rendered = location.seq;
        Some(self.render(&location.path))
    }

    fn lock_rendered(&self) -> MutexGuard<'_, u64> {
        self.rendered.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Strip query string and fragment; an empty path means the root.
pub fn path_of(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    match &location[..end] {
        "" => "/",
        path => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::history::MemoryHistory;
    use crate::routing::router::RouteEntry;

    fn dispatcher() -> Dispatcher<MemoryHistory> {
        let table = RouteTable::new(vec![
            RouteEntry::new("/", "Home"),
            RouteEntry::new("/admin", "Admin"),
        ]);
        Dispatcher::new(Arc::new(table), MemoryHistory::default())
    }

    #[test]
    fn test_path_of() {
        assert_eq!(path_of("/admin?tab=users"), "/admin");
        assert_eq!(path_of("/admin#top"), "/admin");
        assert_eq!(path_of("?x=1"), "/");
        assert_eq!(path_of(""), "/");
        assert_eq!(path_of("/lots/3"), "/lots/3");
    }

    #[test]
    fn test_navigate_resolves_and_records_history() {
        let dispatcher = dispatcher();

        let render = dispatcher.navigate("/admin?tab=users");
        assert_eq!(render.view.as_deref(), Some("Admin"));
        assert_eq!(dispatcher.history().current(), "/admin");

        let render = dispatcher.navigate("/missing");
        assert!(!render.is_resolved());
        assert_eq!(render.path, "/missing");

        let render = dispatcher.back().unwrap();
        assert_eq!(render.view.as_deref(), Some("Admin"));
        assert_eq!(dispatcher.current().view.as_deref(), Some("Admin"));
    }

    #[test]
    fn test_navigations_are_independent() {
        let dispatcher = dispatcher();
        let first = dispatcher.navigate("/admin");
        dispatcher.navigate("/missing");
        let again = dispatcher.navigate("/admin");
        assert_eq!(first.view, again.view);
    }

    #[tokio::test]
    async fn test_run_follows_history() {
        let dispatcher = Arc::new(dispatcher());
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
        let (seen_tx, mut seen_rx) = tokio::sync::mpsc::unbounded_channel();

        let listener = {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                dispatcher
                    .run(
                        move |render| {
                            let _ = seen_tx.send(render);
                        },
                        async move {
                            let _ = stop_rx.await;
                        },
                    )
                    .await;
            })
        };

        tokio::task::yield_now().await;
        dispatcher.history().push("/admin");

        let render = seen_rx.recv().await.unwrap();
        assert_eq!(render.view.as_deref(), Some("Admin"));

        stop_tx.send(()).unwrap();
        listener.await.unwrap();
    }

    #[tokio::test]
    async fn test_navigate_renders_once_while_listening() {
        let dispatcher = Arc::new(dispatcher());
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
        let (seen_tx, mut seen_rx) = tokio::sync::mpsc::unbounded_channel();

        let listener = {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                dispatcher
                    .run(
                        move |render| {
                            let _ = seen_tx.send(render);
                        },
                        async move {
                            let _ = stop_rx.await;
                        },
                    )
                    .await;
            })
        };
        tokio::task::yield_now().await;

        let render = dispatcher.navigate("/admin");
        assert_eq!(render.view.as_deref(), Some("Admin"));
        tokio::task::yield_now().await;

        dispatcher.back().unwrap();
        tokio::task::yield_now().await;

        // Only the change made outside the dispatcher reaches the listener.
        dispatcher.history().push("/missing");
        let render = seen_rx.recv().await.unwrap();
        assert_eq!(render.path, "/missing");

        stop_tx.send(()).unwrap();
        listener.await.unwrap();
        assert!(seen_rx.try_recv().is_err());
    }
}
