//! Scope - the server or group a punishment applies to
//!
//! Scopes arrive already resolved; this layer only compares them for equality.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    #[default]
    Global,
    Specific(String),
}

impl Scope {
    const GLOBAL_TOKEN: &'static str = "";

    /// Scope for a single named server
    pub fn specific(server: impl Into<String>) -> Self {
        let server = server.into();
        if server.is_empty() {
            Self::Global
        } else {
            Self::Specific(server)
        }
    }

    /// Persisted token; the global scope is the empty string
    pub fn as_token(&self) -> &str {
        match self {
            Self::Global => Self::GLOBAL_TOKEN,
            Self::Specific(server) => server,
        }
    }

    pub fn from_token(token: String) -> Self {
        Self::specific(token)
    }

    #[inline]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("*"),
            Self::Specific(server) => f.write_str(server),
        }
    }
}
