//! Known account - a historical link between an identifier and an address

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::NetworkAddress;

/// One observed (identifier, address) pair
///
/// `updated` advances every time the pair is observed again, and doubles as
/// the version checked by compare-and-delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownAccount {
    pub uuid: Uuid,
    /// Most recently seen display name for `uuid`
    pub latest_name: String,
    pub address: NetworkAddress,
    pub updated: DateTime<Utc>,
}
