//! Punishment entity - an enacted ban, mute, warn or kick

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Operator, PunishmentType, Scope, Victim};

/// Punishment entity
///
/// Immutable once enacted. Revocation is tracked separately and never
/// edits the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Punishment {
    pub id: i64,
    pub punishment_type: PunishmentType,
    pub victim: Victim,
    pub operator: Operator,
    pub reason: String,
    pub scope: Scope,
    pub start: DateTime<Utc>,
    /// `None` means permanent
    pub end: Option<DateTime<Utc>>,
}

impl Punishment {
    #[inline]
    pub fn is_permanent(&self) -> bool {
        self.end.is_none()
    }

    /// Length of the punishment, or `None` if permanent
    pub fn duration(&self) -> Option<Duration> {
        self.end.map(|end| end - self.start)
    }

    /// Check if the punishment has run out at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.end.is_some_and(|end| end <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_punishment(end: Option<DateTime<Utc>>) -> Punishment {
        Punishment {
            id: 1,
            punishment_type: PunishmentType::Ban,
            victim: Victim::player(Uuid::new_v4()),
            operator: Operator::Console,
            reason: "test".to_string(),
            scope: Scope::Global,
            start: Utc::now(),
            end,
        }
    }

    #[test]
    fn test_permanent() {
        let punishment = test_punishment(None);
        assert!(punishment.is_permanent());
        assert!(punishment.duration().is_none());
        assert!(!punishment.is_expired(Utc::now() + Duration::days(365)));
    }

    #[test]
    fn test_temporary() {
        let start = Utc::now();
        let mut punishment = test_punishment(Some(start + Duration::seconds(30)));
        punishment.start = start;

        assert_eq!(punishment.duration(), Some(Duration::seconds(30)));
        assert!(!punishment.is_expired(start + Duration::seconds(10)));
        assert!(punishment.is_expired(start + Duration::seconds(30)));
    }
}
