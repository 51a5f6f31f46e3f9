//! Draft punishment - a punishment that has not been enacted yet

use chrono::Duration;

use crate::error::DomainError;
use crate::value_objects::{Operator, PunishmentType, Scope, Victim};

/// Description of a punishment to enact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftPunishment {
    punishment_type: PunishmentType,
    victim: Victim,
    operator: Operator,
    reason: String,
    scope: Scope,
    duration: Option<Duration>,
}

impl DraftPunishment {
    pub fn builder() -> DraftPunishmentBuilder {
        DraftPunishmentBuilder::default()
    }

    pub fn punishment_type(&self) -> PunishmentType {
        self.punishment_type
    }

    pub fn victim(&self) -> &Victim {
        &self.victim
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// `None` means permanent
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }
}

/// Builder for [`DraftPunishment`]
///
/// Defaults: console operator, global scope, permanent.
#[derive(Debug, Clone, Default)]
pub struct DraftPunishmentBuilder {
    punishment_type: Option<PunishmentType>,
    victim: Option<Victim>,
    operator: Operator,
    reason: Option<String>,
    scope: Scope,
    duration: Option<Duration>,
}

impl DraftPunishmentBuilder {
    pub fn punishment_type(mut self, punishment_type: PunishmentType) -> Self {
        self.punishment_type = Some(punishment_type);
        self
    }

    pub fn victim(mut self, victim: Victim) -> Self {
        self.victim = Some(victim);
        self
    }

    pub fn operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Build the draft
    ///
    /// # Errors
    /// Fails if type, victim or reason are missing, if the duration is
    /// shorter than one millisecond, or if a kick is given a duration.
    pub fn build(self) -> Result<DraftPunishment, DomainError> {
        let punishment_type = self.punishment_type.ok_or(DomainError::MissingType)?;
        let victim = self.victim.ok_or(DomainError::MissingVictim)?;
        let reason = self.reason.ok_or(DomainError::MissingReason)?;

        if let Some(duration) = self.duration {
            // Durations are persisted in whole milliseconds
            if duration < Duration::milliseconds(1) {
                return Err(DomainError::InvalidDuration(format!(
                    "must be at least 1ms, got {}us",
                    duration.num_microseconds().unwrap_or(i64::MIN)
                )));
            }
            if punishment_type.is_instantaneous() {
                return Err(DomainError::InvalidDuration(format!(
                    "{punishment_type} cannot have a duration"
                )));
            }
        }

        Ok(DraftPunishment {
            punishment_type,
            victim,
            operator: self.operator,
            reason,
            scope: self.scope,
            duration: self.duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn base() -> DraftPunishmentBuilder {
        DraftPunishment::builder()
            .punishment_type(PunishmentType::Ban)
            .victim(Victim::player(Uuid::new_v4()))
            .reason("griefing")
    }

    #[test]
    fn test_defaults() {
        let draft = base().build().unwrap();
        assert_eq!(draft.operator(), Operator::Console);
        assert_eq!(draft.scope(), &Scope::Global);
        assert!(draft.duration().is_none());
        assert_eq!(draft.reason(), "griefing");
    }

    #[test]
    fn test_missing_fields() {
        assert!(matches!(
            DraftPunishment::builder().victim(Victim::player(Uuid::new_v4())).reason("r").build(),
            Err(DomainError::MissingType)
        ));
        assert!(matches!(
            DraftPunishment::builder().punishment_type(PunishmentType::Mute).reason("r").build(),
            Err(DomainError::MissingVictim)
        ));
        assert!(matches!(
            DraftPunishment::builder()
                .punishment_type(PunishmentType::Mute)
                .victim(Victim::player(Uuid::new_v4()))
                .build(),
            Err(DomainError::MissingReason)
        ));
    }

    #[test]
    fn test_duration_must_be_positive() {
        assert!(matches!(
            base().duration(Duration::zero()).build(),
            Err(DomainError::InvalidDuration(_))
        ));
        assert!(matches!(
            base().duration(Duration::seconds(-5)).build(),
            Err(DomainError::InvalidDuration(_))
        ));
        let draft = base().duration(Duration::seconds(1)).build().unwrap();
        assert_eq!(draft.duration(), Some(Duration::seconds(1)));
    }

    #[test]
    fn test_sub_millisecond_duration_is_rejected() {
        for short in [Duration::microseconds(500), Duration::nanoseconds(1)] {
            let err = base().duration(short).build().unwrap_err();
            assert!(matches!(err, DomainError::InvalidDuration(_)));
        }
        let draft = base().duration(Duration::milliseconds(1)).build().unwrap();
        assert_eq!(draft.duration(), Some(Duration::milliseconds(1)));
    }

    #[test]
    fn test_kick_rejects_duration() {
        let err = base()
            .punishment_type(PunishmentType::Kick)
            .duration(Duration::minutes(5))
            .build()
            .unwrap_err();
        assert!(err.is_configuration());
    }
}
