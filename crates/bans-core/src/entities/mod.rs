//! Domain entities

mod known_account;
mod punishment;

pub use known_account::KnownAccount;
pub use punishment::Punishment;
