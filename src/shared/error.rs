use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every listed project is in sync, or the check was not requested
    Success = 0,
    /// At least one listed project is not synced (only with --fail-on-unsynced)
    UnsyncedProjects = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (API error, network error, registry error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::UnsyncedProjects => write!(f, "Unsynced Projects (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Failures reported by a source platform adapter.
///
/// `NotFound` is the only variant the status fetcher recovers from;
/// everything else is surfaced to the caller unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Resource not found on the platform: {resource}")]
    NotFound { resource: String },

    #[error("Platform request failed: {details}")]
    Upstream { details: String },
}

impl PlatformError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        PlatformError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn upstream(details: impl Into<String>) -> Self {
        PlatformError::Upstream {
            details: details.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PlatformError::NotFound { .. })
    }
}

impl From<reqwest::Error> for PlatformError {
    fn from(err: reqwest::Error) -> Self {
        if err.status() == Some(reqwest::StatusCode::NOT_FOUND) {
            PlatformError::not_found(
                err.url()
                    .map(|u| u.path().to_string())
                    .unwrap_or_default(),
            )
        } else {
            PlatformError::upstream(err.to_string())
        }
    }
}

/// Application-specific errors for the dashboard.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// keeping user-facing messages next to the variants they describe.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Failed to fetch status for project '{project}'\nDetails: {details}\n\n💡 Hint: Check GITLAB_URL, GITLAB_PRIVATE_TOKEN and your network connection")]
    Upstream { project: String, details: String },

    #[error("Invalid project identifier '{identifier}'\nReason: {reason}\n\n💡 Hint: Use the full project path, e.g. group/subgroup/repo")]
    InvalidProjectIdentifier { identifier: String, reason: String },

    #[error("Project registry error: {path}\nDetails: {details}\n\n💡 Hint: Verify that the registry file is writable and not corrupted")]
    Registry { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    /// Validation error for configuration and requests
    #[error("Validation error: {message}")]
    Validation { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::UnsyncedProjects.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::UnsyncedProjects),
            "Unsynced Projects (1)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_platform_error_not_found_helper() {
        let err = PlatformError::not_found("projects/team%2Fapp");
        assert!(err.is_not_found());
        assert!(format!("{}", err).contains("projects/team%2Fapp"));
    }

    #[test]
    fn test_platform_error_upstream_is_not_not_found() {
        let err = PlatformError::upstream("401 Unauthorized");
        assert!(!err.is_not_found());
        assert!(format!("{}", err).contains("401 Unauthorized"));
    }

    #[test]
    fn test_upstream_error_display() {
        let error = DashboardError::Upstream {
            project: "team/app".to_string(),
            details: "502 Bad Gateway".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("team/app"));
        assert!(display.contains("502 Bad Gateway"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_invalid_identifier_display() {
        let error = DashboardError::InvalidProjectIdentifier {
            identifier: "/app".to_string(),
            reason: "must not start with '/'".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid project identifier"));
        assert!(display.contains("/app"));
    }

    #[test]
    fn test_registry_error_display() {
        let error = DashboardError::Registry {
            path: PathBuf::from(".projects.db"),
            details: "database is locked".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains(".projects.db"));
        assert!(display.contains("database is locked"));
    }
}
