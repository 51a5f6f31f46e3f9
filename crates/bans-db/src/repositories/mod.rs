//! Repository implementations
//!
//! PostgreSQL implementations of the port traits defined in bans-core.
//! Every repository routes its statements through a shared `QueryExecutor`.

mod account_history;
mod drafter;
mod error;
mod predicates;
mod revoker;
mod selector;

pub(crate) use error::map_db_error;

pub use account_history::PgAccountHistory;
pub use drafter::PgPunishmentDrafter;
pub use revoker::PgPunishmentRevoker;
pub use selector::PgPunishmentSelector;
