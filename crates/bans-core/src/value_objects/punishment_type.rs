//! Punishment type - ban, mute, warn or kick

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of punishment. Ordinals are persisted and must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PunishmentType {
    Ban,
    Mute,
    Warn,
    Kick,
}

impl PunishmentType {
    pub const ALL: [Self; 4] = [Self::Ban, Self::Mute, Self::Warn, Self::Kick];

    pub const fn ordinal(self) -> i16 {
        match self {
            Self::Ban => 0,
            Self::Mute => 1,
            Self::Warn => 2,
            Self::Kick => 3,
        }
    }

    pub const fn from_ordinal(ordinal: i16) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Ban),
            1 => Some(Self::Mute),
            2 => Some(Self::Warn),
            3 => Some(Self::Kick),
            _ => None,
        }
    }

    /// At most one punishment of a singular type may be active per victim
    #[inline]
    pub const fn is_singular(self) -> bool {
        matches!(self, Self::Ban | Self::Mute)
    }

    /// Kicks are instantaneous and never remain active
    #[inline]
    pub const fn is_instantaneous(self) -> bool {
        matches!(self, Self::Kick)
    }
}

impl fmt::Display for PunishmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ban => "BAN",
            Self::Mute => "MUTE",
            Self::Warn => "WARN",
            Self::Kick => "KICK",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals() {
        for ty in PunishmentType::ALL {
            assert_eq!(PunishmentType::from_ordinal(ty.ordinal()), Some(ty));
        }
        assert_eq!(PunishmentType::Ban.ordinal(), 0);
        assert_eq!(PunishmentType::Kick.ordinal(), 3);
        assert_eq!(PunishmentType::from_ordinal(4), None);
    }

    #[test]
    fn test_singular() {
        assert!(PunishmentType::Ban.is_singular());
        assert!(PunishmentType::Mute.is_singular());
        assert!(!PunishmentType::Warn.is_singular());
        assert!(!PunishmentType::Kick.is_singular());
    }
}
