//! Victim - the subject of a punishment
//!
//! A victim is a player, an IP address, or both at once. The persisted
//! ordinals are fixed: Player = 0, Address = 1. A composite victim has no
//! ordinal of its own; it is stored as an identifier and an address side
//! by side.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::network_address::{AddressDecodeError, NetworkAddress};

/// Discriminant of a [`Victim`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VictimType {
    Player,
    Address,
    Composite,
}

impl VictimType {
    pub const PLAYER_ORDINAL: i16 = 0;
    pub const ADDRESS_ORDINAL: i16 = 1;

    /// Persisted ordinal, or `None` for the composite shape
    pub const fn ordinal(self) -> Option<i16> {
        match self {
            Self::Player => Some(Self::PLAYER_ORDINAL),
            Self::Address => Some(Self::ADDRESS_ORDINAL),
            Self::Composite => None,
        }
    }

    /// Get a VictimType from a persisted ordinal, or `None` if no such ordinal exists
    pub const fn from_ordinal(ordinal: i16) -> Option<Self> {
        match ordinal {
            Self::PLAYER_ORDINAL => Some(Self::Player),
            Self::ADDRESS_ORDINAL => Some(Self::Address),
            _ => None,
        }
    }
}

impl fmt::Display for VictimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Player => "PLAYER",
            Self::Address => "ADDRESS",
            Self::Composite => "COMPOSITE",
        };
        f.write_str(name)
    }
}

/// The subject of a punishment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Victim {
    Player { uuid: Uuid },
    Address { address: NetworkAddress },
    Composite { uuid: Uuid, address: NetworkAddress },
}

impl Victim {
    pub const fn player(uuid: Uuid) -> Self {
        Self::Player { uuid }
    }

    pub const fn address(address: NetworkAddress) -> Self {
        Self::Address { address }
    }

    pub const fn composite(uuid: Uuid, address: NetworkAddress) -> Self {
        Self::Composite { uuid, address }
    }

    pub const fn victim_type(&self) -> VictimType {
        match self {
            Self::Player { .. } => VictimType::Player,
            Self::Address { .. } => VictimType::Address,
            Self::Composite { .. } => VictimType::Composite,
        }
    }

    /// The identifier component, if this victim has one
    pub const fn uuid(&self) -> Option<Uuid> {
        match self {
            Self::Player { uuid } | Self::Composite { uuid, .. } => Some(*uuid),
            Self::Address { .. } => None,
        }
    }

    /// The address component, if this victim has one
    pub const fn network_address(&self) -> Option<NetworkAddress> {
        match self {
            Self::Address { address } | Self::Composite { address, .. } => Some(*address),
            Self::Player { .. } => None,
        }
    }

    /// Columns used to persist this victim: (ordinal, uuid, address bytes)
    pub fn to_columns(&self) -> VictimColumns {
        VictimColumns {
            ordinal: self.victim_type().ordinal(),
            uuid: self.uuid(),
            address: self.network_address().map(|a| a.to_bytes()),
        }
    }

    /// Rebuild a victim from its persisted columns
    pub fn from_columns(columns: VictimColumns) -> Result<Self, VictimDecodeError> {
        let address = columns
            .address
            .as_deref()
            .map(NetworkAddress::from_bytes)
            .transpose()?;

        match (columns.ordinal, columns.uuid, address) {
            (Some(VictimType::PLAYER_ORDINAL), Some(uuid), None) => Ok(Self::Player { uuid }),
            (Some(VictimType::ADDRESS_ORDINAL), None, Some(address)) => {
                Ok(Self::Address { address })
            }
            (None, Some(uuid), Some(address)) => Ok(Self::Composite { uuid, address }),
            (ordinal, uuid, address) => Err(VictimDecodeError::UnknownShape {
                ordinal,
                has_uuid: uuid.is_some(),
                has_address: address.is_some(),
            }),
        }
    }
}

impl fmt::Display for Victim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player { uuid } => write!(f, "{uuid}"),
            Self::Address { address } => write!(f, "{address}"),
            Self::Composite { uuid, address } => write!(f, "{uuid}/{address}"),
        }
    }
}

/// Persisted shape of a victim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VictimColumns {
    pub ordinal: Option<i16>,
    pub uuid: Option<Uuid>,
    pub address: Option<Vec<u8>>,
}

/// Error when rebuilding a victim from persisted columns
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VictimDecodeError {
    #[error("unknown victim shape: ordinal={ordinal:?}, uuid={has_uuid}, address={has_address}")]
    UnknownShape {
        ordinal: Option<i16>,
        has_uuid: bool,
        has_address: bool,
    },

    #[error(transparent)]
    Address(#[from] AddressDecodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_address() -> NetworkAddress {
        "203.0.113.7".parse().unwrap()
    }

    #[test]
    fn test_ordinals_are_stable() {
        assert_eq!(VictimType::Player.ordinal(), Some(0));
        assert_eq!(VictimType::Address.ordinal(), Some(1));
        assert_eq!(VictimType::Composite.ordinal(), None);

        assert_eq!(VictimType::from_ordinal(0), Some(VictimType::Player));
        assert_eq!(VictimType::from_ordinal(1), Some(VictimType::Address));
        assert_eq!(VictimType::from_ordinal(2), None);
        assert_eq!(VictimType::from_ordinal(-1), None);
    }

    #[test]
    fn test_victim_type() {
        let uuid = Uuid::new_v4();
        assert_eq!(Victim::player(uuid).victim_type(), VictimType::Player);
        assert_eq!(Victim::address(test_address()).victim_type(), VictimType::Address);
        assert_eq!(
            Victim::composite(uuid, test_address()).victim_type(),
            VictimType::Composite
        );
    }

    #[test]
    fn test_structural_equality() {
        let uuid = Uuid::new_v4();
        assert_eq!(Victim::player(uuid), Victim::player(uuid));
        assert_ne!(Victim::player(uuid), Victim::composite(uuid, test_address()));
        assert_ne!(Victim::player(uuid), Victim::player(Uuid::new_v4()));
    }

    #[test]
    fn test_columns_for_each_variant() {
        let uuid = Uuid::new_v4();
        for victim in [
            Victim::player(uuid),
            Victim::address(test_address()),
            Victim::composite(uuid, test_address()),
        ] {
            let columns = victim.to_columns();
            assert_eq!(Victim::from_columns(columns).unwrap(), victim);
        }
    }

    #[test]
    fn test_composite_columns_have_no_ordinal() {
        let columns = Victim::composite(Uuid::new_v4(), test_address()).to_columns();
        assert_eq!(columns.ordinal, None);
        assert!(columns.uuid.is_some());
        assert_eq!(columns.address.as_deref(), Some(&[203, 0, 113, 7][..]));
    }

    #[test]
    fn test_unknown_shape_is_rejected() {
        let err = Victim::from_columns(VictimColumns {
            ordinal: Some(7),
            uuid: Some(Uuid::new_v4()),
            address: None,
        })
        .unwrap_err();
        assert!(matches!(err, VictimDecodeError::UnknownShape { ordinal: Some(7), .. }));

        // A player ordinal must not carry an address
        let err = Victim::from_columns(VictimColumns {
            ordinal: Some(0),
            uuid: Some(Uuid::new_v4()),
            address: Some(vec![127, 0, 0, 1]),
        })
        .unwrap_err();
        assert!(matches!(err, VictimDecodeError::UnknownShape { .. }));
    }

    #[test]
    fn test_bad_address_bytes() {
        let err = Victim::from_columns(VictimColumns {
            ordinal: Some(1),
            uuid: None,
            address: Some(vec![1, 2]),
        })
        .unwrap_err();
        assert_eq!(err, VictimDecodeError::Address(AddressDecodeError::InvalidLength(2)));
    }

    #[test]
    fn test_serialize_json() {
        let uuid = Uuid::nil();
        let json = serde_json::to_value(Victim::player(uuid)).unwrap();
        assert_eq!(json["type"], "player");
        assert_eq!(json["uuid"], uuid.to_string());
    }
}
