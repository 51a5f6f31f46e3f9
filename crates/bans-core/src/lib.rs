//! # bans-core
//!
//! Domain layer for punishment tracking: victims, punishments, selection and
//! draft specifications, known accounts, and repository traits.
//! This crate has zero dependencies on infrastructure (database, runtime, etc.).

pub mod entities;
pub mod error;
pub mod query;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{KnownAccount, Punishment};
pub use error::DomainError;
pub use query::{DraftPunishment, DraftPunishmentBuilder, SelectionOrder, SelectionOrderBuilder};
pub use traits::{
    AccountHistory, AccountRecorder, PunishmentDrafter, PunishmentRevoker, PunishmentSelector,
    RepoResult,
};
pub use value_objects::{
    AddressDecodeError, NetworkAddress, Operator, PunishmentType, Scope, Victim, VictimColumns,
    VictimDecodeError, VictimType,
};
