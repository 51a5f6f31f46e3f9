//! Domain errors - error types for the domain layer
//!
//! Logical conflicts (a blocked draft, a stale compare-and-delete) are not
//! errors and never appear here; they are ordinary return values.

use thiserror::Error;

use crate::value_objects::VictimDecodeError;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Punishment type must be set")]
    MissingType,

    #[error("Victim must be set")]
    MissingVictim,

    #[error("Reason must be set")]
    MissingReason,

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("{0} is not a singular punishment type")]
    NotSingular(crate::value_objects::PunishmentType),

    // =========================================================================
    // Data Integrity Errors
    // =========================================================================
    #[error("Unknown victim type: {0}")]
    UnknownVictimType(#[from] VictimDecodeError),

    #[error("Unknown punishment type ordinal: {0}")]
    UnknownPunishmentType(i16),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Retries exhausted after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },
}

impl DomainError {
    /// Get an error code string
    pub fn code(&self) -> &'static str {
        match self {
            // Configuration
            Self::MissingType => "MISSING_TYPE",
            Self::MissingVictim => "MISSING_VICTIM",
            Self::MissingReason => "MISSING_REASON",
            Self::InvalidDuration(_) => "INVALID_DURATION",
            Self::NotSingular(_) => "NOT_SINGULAR",

            // Data integrity
            Self::UnknownVictimType(_) => "UNKNOWN_VICTIM_TYPE",
            Self::UnknownPunishmentType(_) => "UNKNOWN_PUNISHMENT_TYPE",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::RetriesExhausted { .. } => "RETRIES_EXHAUSTED",
        }
    }

    /// Check if this is a programmer error raised before any I/O
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingType
                | Self::MissingVictim
                | Self::MissingReason
                | Self::InvalidDuration(_)
                | Self::NotSingular(_)
        )
    }

    /// Check if this error came from transient failures that were retried until exhausted
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::RetriesExhausted { .. })
    }

    /// Check if stored data could not be decoded
    pub fn is_corrupt_data(&self) -> bool {
        matches!(
            self,
            Self::UnknownVictimType(_) | Self::UnknownPunishmentType(_)
        )
    }
}
