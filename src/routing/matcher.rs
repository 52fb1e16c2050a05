//! Route matching logic.
//!
//! # Responsibilities
//! - Match a navigation path against a route pattern
//!
//! # Design Decisions
//! - Path matching is exact and case-sensitive
//! - No prefix, parameter or regex matching
//! - Matchers sit behind a trait so richer patterns can be added later
//!   without touching the table scan

/// Trait for matching navigation paths against a pattern.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this pattern.
    fn matches(&self, path: &str) -> bool;

    /// The pattern as written in the route table.
    fn pattern(&self) -> &str;
}

/// Matches one path exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactPathMatcher {
    path: String,
}

impl ExactPathMatcher {
    /// Create a new exact path matcher.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Matcher for ExactPathMatcher {
    fn matches(&self, path: &str) -> bool {
        self.path == path
    }

    fn pattern(&self) -> &str {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_matcher() {
        let matcher = ExactPathMatcher::new("/admin");
        assert!(matcher.matches("/admin"));
        assert_eq!(matcher.pattern(), "/admin");

        assert!(!matcher.matches("/admin/users")); // No prefix matching
        assert!(!matcher.matches("/Admin")); // Case sensitive
        assert!(!matcher.matches("/admin/"));
        assert!(!matcher.matches("/"));
    }

    #[test]
    fn test_root_matcher() {
        let matcher = ExactPathMatcher::new("/");
        assert!(matcher.matches("/"));
        assert!(!matcher.matches(""));
        assert!(!matcher.matches("/anything"));
    }
}
