//! Application error types
//!
//! The error returned by setup paths that combine configuration, storage
//! bootstrapping and the punishment ports.

use bans_core::DomainError;

use crate::config::ConfigError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    // Bootstrapping failures (pool creation, migrations)
    #[error("Internal error: {0:#}")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// Get error code for logs
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if the caller or the deployment caused this error
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_configuration(),
            Self::Config(_) => true,
            Self::Internal(_) => false,
        }
    }

    /// Check if retrying later may succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_transient())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
