//! Operator - who issued a punishment

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The staff member (or console) responsible for a punishment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operator {
    #[default]
    Console,
    Player { uuid: Uuid },
}

impl Operator {
    pub const fn player(uuid: Uuid) -> Self {
        Self::Player { uuid }
    }

    /// Persisted form: the console is stored as the nil UUID
    pub const fn to_uuid(self) -> Uuid {
        match self {
            Self::Console => Uuid::nil(),
            Self::Player { uuid } => uuid,
        }
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        if uuid.is_nil() {
            Self::Console
        } else {
            Self::Player { uuid }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Console => f.write_str("CONSOLE"),
            Self::Player { uuid } => write!(f, "{uuid}"),
        }
    }
}
