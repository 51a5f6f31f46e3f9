//! Repository traits

mod repositories;

pub use repositories::{
    AccountHistory, AccountRecorder, PunishmentDrafter, PunishmentRevoker, PunishmentSelector,
    RepoResult,
};
