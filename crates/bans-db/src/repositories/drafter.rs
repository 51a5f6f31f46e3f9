//! PostgreSQL implementation of PunishmentDrafter

use async_trait::async_trait;
use sqlx::PgConnection;
use tracing::{debug, info, instrument};

use bans_core::{DraftPunishment, Punishment, PunishmentDrafter, RepoResult};

use crate::execute::QueryExecutor;
use crate::mappers::PunishmentInsert;
use crate::models::{PunishmentModel, PUNISHMENT_COLUMNS};

use super::predicates::{ACTIVE_PREDICATE, EXACT_VICTIM_PREDICATE};

/// PostgreSQL implementation of PunishmentDrafter
#[derive(Clone)]
pub struct PgPunishmentDrafter {
    executor: QueryExecutor,
}

impl PgPunishmentDrafter {
    /// Create a new PgPunishmentDrafter
    pub fn new(executor: QueryExecutor) -> Self {
        Self { executor }
    }
}

async fn has_active_singular(
    conn: &mut PgConnection,
    insert: &PunishmentInsert,
) -> Result<bool, sqlx::Error> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM punishments p \
         WHERE p.punishment_type = $1 AND {EXACT_VICTIM_PREDICATE} AND {ACTIVE_PREDICATE})"
    );
    sqlx::query_scalar::<_, bool>(&sql)
        .bind(insert.punishment_type)
        .bind(insert.victim.ordinal)
        .bind(insert.victim.uuid)
        .bind(insert.victim.address.clone())
        .fetch_one(conn)
        .await
}

async fn insert_punishment(
    conn: &mut PgConnection,
    insert: &PunishmentInsert,
) -> Result<PunishmentModel, sqlx::Error> {
    // Start and end come from the database clock, the same clock the active predicate reads
    let sql = format!(
        "INSERT INTO punishments AS p \
             (punishment_type, victim_type, victim_uuid, victim_address, operator, reason, scope, start_time, end_time) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), \
             CASE WHEN $8 THEN NOW() ELSE NOW() + ($9::BIGINT * INTERVAL '1 millisecond') END) \
         RETURNING {PUNISHMENT_COLUMNS}"
    );
    sqlx::query_as::<_, PunishmentModel>(&sql)
        .bind(insert.punishment_type)
        .bind(insert.victim.ordinal)
        .bind(insert.victim.uuid)
        .bind(insert.victim.address.clone())
        .bind(insert.operator)
        .bind(insert.reason.clone())
        .bind(insert.scope.clone())
        .bind(insert.instantaneous)
        .bind(insert.duration_ms)
        .fetch_one(conn)
        .await
}

#[async_trait]
impl PunishmentDrafter for PgPunishmentDrafter {
    #[instrument(skip(self), fields(punishment_type = %draft.punishment_type(), victim = %draft.victim()))]
    async fn enact_punishment(&self, draft: &DraftPunishment) -> RepoResult<Option<Punishment>> {
        let insert = PunishmentInsert::new(draft);
        let singular = draft.punishment_type().is_singular();

        // The existence check and the insert share one serializable transaction,
        // so two concurrent drafts for one victim cannot both pass the check.
        let model = self
            .executor
            .query_with_retry(move |conn| {
                let insert = insert.clone();
                Box::pin(async move {
                    if singular && has_active_singular(&mut *conn, &insert).await? {
                        return Ok(None);
                    }
                    insert_punishment(conn, &insert).await.map(Some)
                })
            })
            .await?;

        match model {
            Some(model) => {
                let punishment = Punishment::try_from(model)?;
                info!(id = punishment.id, "punishment enacted");
                Ok(Some(punishment))
            }
            None => {
                debug!("blocked by an active punishment of the same type");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgPunishmentDrafter>();
    }
}
