//! Known account database model (addresses joined with latest_names)

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct KnownAccountModel {
    pub uuid: Uuid,
    pub address: Vec<u8>,
    pub name: String,
    pub updated: DateTime<Utc>,
}
