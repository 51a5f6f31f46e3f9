//! Network address - an IPv4 or IPv6 address stored as raw bytes
//!
//! Addresses are persisted as fixed-length binary: 4 bytes for IPv4 and
//! 16 bytes for IPv6. IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) are
//! folded to plain IPv4 on construction, so one host has one encoding.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// An IP address that can be the subject of a punishment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "IpAddr", into = "IpAddr")]
pub struct NetworkAddress(IpAddr);

impl NetworkAddress {
    /// Create a new NetworkAddress in canonical form
    #[inline]
    pub fn new(address: IpAddr) -> Self {
        Self(address.to_canonical())
    }

    /// Get the inner IpAddr
    #[inline]
    pub const fn into_inner(self) -> IpAddr {
        self.0
    }

    /// Raw bytes in network order (4 or 16 bytes)
    pub fn to_bytes(&self) -> Vec<u8> {
        match self.0 {
            IpAddr::V4(v4) => v4.octets().to_vec(),
            IpAddr::V6(v6) => v6.octets().to_vec(),
        }
    }

    /// Decode from raw bytes. Any length other than 4 or 16 is rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressDecodeError> {
        if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
            return Ok(Self(IpAddr::V4(Ipv4Addr::from(octets))));
        }
        if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
            return Ok(Self::from(Ipv6Addr::from(octets)));
        }
        Err(AddressDecodeError::InvalidLength(bytes.len()))
    }
}

/// Error when decoding a NetworkAddress from bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AddressDecodeError {
    #[error("invalid address length: {0} bytes")]
    InvalidLength(usize),
}

impl fmt::Display for NetworkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<IpAddr> for NetworkAddress {
    fn from(address: IpAddr) -> Self {
        Self::new(address)
    }
}

impl From<NetworkAddress> for IpAddr {
    fn from(address: NetworkAddress) -> Self {
        address.0
    }
}

impl From<Ipv4Addr> for NetworkAddress {
    fn from(address: Ipv4Addr) -> Self {
        Self(IpAddr::V4(address))
    }
}

impl From<Ipv6Addr> for NetworkAddress {
    fn from(address: Ipv6Addr) -> Self {
        Self::new(IpAddr::V6(address))
    }
}

impl std::str::FromStr for NetworkAddress {
    type Err = std::net::AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<IpAddr>().map(Self::new)
    }
}
