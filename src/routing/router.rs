//! Route lookup.
//!
//! # Responsibilities
//! - Store route entries in declaration order
//! - Look up the view for a navigation path
//! - Return matched entry or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) linear scan (acceptable for typical route counts)
//! - First match wins
//! - Explicit NoMatch rather than silent default; the host application
//!   decides whether that means a 404 view or nothing

use crate::config::RouteConfig;
use crate::routing::matcher::{ExactPathMatcher, Matcher};

/// A single path to view mapping.
#[derive(Debug)]
pub struct RouteEntry {
    matcher: Box<dyn Matcher>,
    view_id: String,
}

impl RouteEntry {
    /// Create an entry matching `path` exactly.
    pub fn new(path: impl Into<String>, view_id: impl Into<String>) -> Self {
        Self::with_matcher(Box::new(ExactPathMatcher::new(path)), view_id)
    }

    pub fn with_matcher(matcher: Box<dyn Matcher>, view_id: impl Into<String>) -> Self {
        Self {
            matcher,
            view_id: view_id.into(),
        }
    }

    pub fn path_pattern(&self) -> &str {
        self.matcher.pattern()
    }

    pub fn view_id(&self) -> &str {
        &self.view_id
    }
}

/// Result of resolving a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatch<'a> {
    Matched(&'a str),
    NoMatch,
}

impl<'a> RouteMatch<'a> {
    pub fn view(&self) -> Option<&'a str> {
        match *self {
            RouteMatch::Matched(view) => Some(view),
            RouteMatch::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, RouteMatch::Matched(_))
    }
}

/// Ordered, immutable navigation table.
#[derive(Debug, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        Self { entries }
    }

    /// Build the table from configured routes, preserving their order.
    pub fn from_config(routes: &[RouteConfig]) -> Self {
        Self::new(
            routes
                .iter()
                .map(|r| RouteEntry::new(r.path.clone(), r.view.clone()))
                .collect(),
        )
    }

    /// Return the view of the first entry matching `path`.
    pub fn resolve(&self, path: &str) -> RouteMatch<'_> {
        self.entries
            .iter()
            .find(|entry| entry.matcher.matches(path))
            .map_or(RouteMatch::NoMatch, |entry| RouteMatch::Matched(entry.view_id()))
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::new(vec![
            RouteEntry::new("/", "Home"),
            RouteEntry::new("/admin", "Admin"),
        ])
    }

    #[test]
    fn test_resolve_exact() {
        let table = table();
        assert_eq!(table.resolve("/admin"), RouteMatch::Matched("Admin"));
        assert_eq!(table.resolve("/"), RouteMatch::Matched("Home"));
        assert_eq!(table.resolve("/missing"), RouteMatch::NoMatch);
        assert_eq!(table.resolve("/admin/users"), RouteMatch::NoMatch);
    }

    #[test]
    fn test_first_match_wins() {
        let table = RouteTable::new(vec![
            RouteEntry::new("/admin", "First"),
            RouteEntry::new("/admin", "Second"),
        ]);
        assert_eq!(table.resolve("/admin").view(), Some("First"));
    }

    #[test]
    fn test_empty_table() {
        let table = RouteTable::default();
        assert!(table.is_empty());
        assert!(!table.resolve("/").is_match());
    }

    #[test]
    fn test_from_default_config() {
        let config = crate::config::AppConfig::default();
        let table = RouteTable::from_config(&config.routes);
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("/").view(), Some("HomePage"));
        assert_eq!(table.resolve("/admin").view(), Some("AdminDashboard"));
        assert_eq!(table.entries()[1].path_pattern(), "/admin");
    }
}
