//! Unified error handling for slirc-perms.
//!
//! [`PermissionSet`](crate::PermissionSet) itself never fails: unknown
//! modules and permissions are absence, not errors. The types here cover
//! the surfaces around it, grant template loading and level parsing.

use crate::config::ValidationError;
use thiserror::Error;

// ============================================================================
// Config Errors (grant template loading)
// ============================================================================

/// Errors raised while loading or applying grant templates.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),

    #[error("unknown role: {0}")]
    UnknownRole(String),
}

impl ConfigError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "config_io",
            Self::Parse(_) => "config_parse",
            Self::Invalid(_) => "config_invalid",
            Self::UnknownRole(_) => "unknown_role",
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// Level Errors
// ============================================================================

/// A string that names no [`Level`](crate::Level).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown permission level: {0}")]
pub struct ParseLevelError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let io = ConfigError::Io(std::io::Error::other("boom"));
        assert_eq!(io.error_code(), "config_io");
        assert_eq!(
            ConfigError::UnknownRole("x".to_string()).error_code(),
            "unknown_role"
        );
        assert_eq!(ConfigError::Invalid(Vec::new()).error_code(), "config_invalid");
    }

    #[test]
    fn test_invalid_message_lists_every_error() {
        let err = ConfigError::Invalid(vec![
            ValidationError::EmptyRoleName,
            ValidationError::EmptyPermission {
                role: "editor".to_string(),
                module: "blog".to_string(),
            },
        ]);
        let msg = err.to_string();
        assert!(msg.starts_with("invalid config: "));
        assert!(msg.contains("role name must not be empty"));
        assert!(msg.contains("; "));
        assert!(msg.contains("editor"));
    }

    #[test]
    fn test_parse_level_error_message() {
        let err = ParseLevelError("root".to_string());
        assert_eq!(err.to_string(), "unknown permission level: root");
    }
}
