//! Entity to model mappers
//!
//! - `TryFrom<Model> for Entity`: Convert database rows to domain objects,
//!   rejecting rows whose encoded victim or type is unknown
//! - `*Insert` structs: Prepare entity data for database operations

mod known_account;
mod punishment;

pub use punishment::PunishmentInsert;
