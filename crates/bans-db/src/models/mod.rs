//! Database models - SQLx-compatible structs for PostgreSQL tables

mod known_account;
mod punishment;

pub use known_account::KnownAccountModel;
pub use punishment::{PunishmentModel, PUNISHMENT_COLUMNS};
