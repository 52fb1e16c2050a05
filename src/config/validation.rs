//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check segment names are unique and base addresses parse as http(s) URLs
//! - Validate value ranges (timeouts > 0, non-empty keys)
//! - Detect route entries that first-match would never reach
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::fmt;

use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NoSegments,
    EmptySegmentName,
    DuplicateSegment(String),
    InvalidBaseAddress { segment: String, reason: String },
    EmptyStorageKey,
    ZeroTimeout(&'static str),
    RelativeRoutePath(String),
    EmptyView(String),
    ShadowedRoute(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NoSegments => write!(f, "at least one segment is required"),
            ValidationError::EmptySegmentName => write!(f, "segment name must not be empty"),
            ValidationError::DuplicateSegment(name) => {
                write!(f, "segment '{}' is defined more than once", name)
            }
            ValidationError::InvalidBaseAddress { segment, reason } => {
                write!(f, "segment '{}' has an invalid base address: {}", segment, reason)
            }
            ValidationError::EmptyStorageKey => write!(f, "credentials.storage_key must not be empty"),
            ValidationError::ZeroTimeout(field) => write!(f, "timeouts.{} must be greater than 0", field),
            ValidationError::RelativeRoutePath(path) => {
                write!(f, "route path '{}' must start with '/'", path)
            }
            ValidationError::EmptyView(path) => write!(f, "route '{}' has an empty view", path),
            ValidationError::ShadowedRoute(path) => {
                write!(f, "route '{}' is unreachable behind an earlier entry", path)
            }
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.segments.is_empty() {
        errors.push(ValidationError::NoSegments);
    }

    let mut names = HashSet::new();
    for segment in &config.segments {
        if segment.name.trim().is_empty() {
            errors.push(ValidationError::EmptySegmentName);
        } else if !names.insert(segment.name.as_str()) {
            errors.push(ValidationError::DuplicateSegment(segment.name.clone()));
        }

        match Url::parse(&segment.base_address) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::InvalidBaseAddress {
                segment: segment.name.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ValidationError::InvalidBaseAddress {
                segment: segment.name.clone(),
                reason: e.to_string(),
            }),
        }
    }

    if config.credentials.storage_key.trim().is_empty() {
        errors.push(ValidationError::EmptyStorageKey);
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }

    let mut paths = HashSet::new();
    for route in &config.routes {
        if !route.path.starts_with('/') {
            errors.push(ValidationError::RelativeRoutePath(route.path.clone()));
        }
        if route.view.trim().is_empty() {
            errors.push(ValidationError::EmptyView(route.path.clone()));
        }
        if !paths.insert(route.path.as_str()) {
            errors.push(ValidationError::ShadowedRoute(route.path.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{CredentialMode, RouteConfig, SegmentConfig};

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.segments.push(SegmentConfig {
            name: "admin".into(),
            base_address: "ftp://localhost/api".into(),
            credential_mode: CredentialMode::None,
        });
        config.credentials.storage_key = " ".into();
        config.timeouts.request_secs = 0;
        config.routes.push(RouteConfig {
            path: "/admin".into(),
            view: "Other".into(),
        });
        config.routes.push(RouteConfig {
            path: "lots".into(),
            view: "".into(),
        });

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::DuplicateSegment("admin".into())));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::InvalidBaseAddress { .. })));
        assert!(errors.contains(&ValidationError::EmptyStorageKey));
        assert!(errors.contains(&ValidationError::ZeroTimeout("request_secs")));
        assert!(errors.contains(&ValidationError::ShadowedRoute("/admin".into())));
        assert!(errors.contains(&ValidationError::RelativeRoutePath("lots".into())));
        assert!(errors.contains(&ValidationError::EmptyView("lots".into())));
    }

    #[test]
    fn test_no_segments() {
        let mut config = AppConfig::default();
        config.segments.clear();
        assert_eq!(validate_config(&config).unwrap_err(), vec![ValidationError::NoSegments]);
    }

    #[test]
    fn test_unparseable_address() {
        let mut config = AppConfig::default();
        config.segments[1].base_address = "not a url".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("'auth'"));
    }
}
