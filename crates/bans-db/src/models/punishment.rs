//! Punishment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Column list shared by every query returning [`PunishmentModel`]
pub const PUNISHMENT_COLUMNS: &str = "p.id, p.punishment_type, p.victim_type, p.victim_uuid, \
     p.victim_address, p.operator, p.reason, p.scope, p.start_time, p.end_time";

/// Database model for punishments table
#[derive(Debug, Clone, FromRow)]
pub struct PunishmentModel {
    pub id: i64,
    pub punishment_type: i16,
    pub victim_type: Option<i16>,
    pub victim_uuid: Option<Uuid>,
    pub victim_address: Option<Vec<u8>>,
    pub operator: Uuid,
    pub reason: String,
    pub scope: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}
