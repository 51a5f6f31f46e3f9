//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. These traits are the only way into the
//! punishment and account history data.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{KnownAccount, Punishment};
use crate::error::DomainError;
use crate::query::{DraftPunishment, SelectionOrder};
use crate::value_objects::{NetworkAddress, Operator, PunishmentType, Victim};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Selection
// ============================================================================

#[async_trait]
pub trait PunishmentSelector: Send + Sync {
    /// The first punishment matching the order, if any
    async fn first_specific_punishment(&self, order: &SelectionOrder) -> RepoResult<Option<Punishment>>;

    /// All punishments matching the order, most recent first, paginated
    async fn all_specific_punishments(&self, order: &SelectionOrder) -> RepoResult<Vec<Punishment>>;
}

// ============================================================================
// Drafting
// ============================================================================

#[async_trait]
pub trait PunishmentDrafter: Send + Sync {
    /// Enact a draft. Returns `None` if an active singular punishment of the
    /// same type already exists for the victim.
    async fn enact_punishment(&self, draft: &DraftPunishment) -> RepoResult<Option<Punishment>>;
}

// ============================================================================
// Revocation
// ============================================================================

#[async_trait]
pub trait PunishmentRevoker: Send + Sync {
    /// Revoke an active punishment by id. Returns `false` if nothing active matched.
    async fn undo_punishment(&self, id: i64, operator: Operator) -> RepoResult<bool>;

    /// Revoke the active singular punishment of `punishment_type` for `victim`
    async fn undo_punishment_by_type_and_victim(
        &self,
        punishment_type: PunishmentType,
        victim: &Victim,
        operator: Operator,
    ) -> RepoResult<bool>;
}

// ============================================================================
// Account History
// ============================================================================

#[async_trait]
pub trait AccountHistory: Send + Sync {
    /// Known accounts linked to a victim, oldest first
    async fn known_accounts(&self, victim: &Victim) -> RepoResult<Vec<KnownAccount>>;

    /// Delete the association rows for `uuid` whose timestamp equals `recorded`.
    /// Returns `false` if the row was re-observed or removed since it was read.
    async fn delete_account(&self, uuid: Uuid, recorded: DateTime<Utc>) -> RepoResult<bool>;
}

#[async_trait]
pub trait AccountRecorder: Send + Sync {
    /// Record that `uuid` was seen with `address` under `name`
    async fn record_observation(
        &self,
        uuid: Uuid,
        address: NetworkAddress,
        name: &str,
    ) -> RepoResult<KnownAccount>;
}
