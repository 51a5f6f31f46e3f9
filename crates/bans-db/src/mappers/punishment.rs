//! Punishment entity <-> model mapper

use bans_core::{
    DomainError, DraftPunishment, Operator, Punishment, PunishmentType, Scope, Victim,
    VictimColumns,
};

use crate::models::PunishmentModel;

/// Convert PunishmentModel to Punishment entity
///
/// Fails if the stored victim or type cannot be decoded; a row like that
/// means the schema invariants were broken and is never skipped silently.
impl TryFrom<PunishmentModel> for Punishment {
    type Error = DomainError;

    fn try_from(model: PunishmentModel) -> Result<Self, Self::Error> {
        let punishment_type = PunishmentType::from_ordinal(model.punishment_type)
            .ok_or(DomainError::UnknownPunishmentType(model.punishment_type))?;

        let victim = Victim::from_columns(VictimColumns {
            ordinal: model.victim_type,
            uuid: model.victim_uuid,
            address: model.victim_address,
        })?;

        Ok(Punishment {
            id: model.id,
            punishment_type,
            victim,
            operator: Operator::from_uuid(model.operator),
            reason: model.reason,
            scope: Scope::from_token(model.scope),
            start: model.start_time,
            end: model.end_time,
        })
    }
}

/// Owned column values for inserting a draft
///
/// Owned rather than borrowed because a unit of work may run more than once.
#[derive(Debug, Clone)]
pub struct PunishmentInsert {
    pub punishment_type: i16,
    pub victim: VictimColumns,
    pub operator: uuid::Uuid,
    pub reason: String,
    pub scope: String,
    /// `None` for permanent punishments
    pub duration_ms: Option<i64>,
    /// Kicks end the moment they start
    pub instantaneous: bool,
}

impl PunishmentInsert {
    pub fn new(draft: &DraftPunishment) -> Self {
        Self {
            punishment_type: draft.punishment_type().ordinal(),
            victim: draft.victim().to_columns(),
            operator: draft.operator().to_uuid(),
            reason: draft.reason().to_string(),
            scope: draft.scope().as_token().to_string(),
            duration_ms: draft.duration().map(|d| d.num_milliseconds()),
            instantaneous: draft.punishment_type().is_instantaneous(),
        }
    }
}
