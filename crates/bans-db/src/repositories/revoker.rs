//! PostgreSQL implementation of PunishmentRevoker
//!
//! Revocation adds a row to `revocations`; the punishment row is left untouched
//! so it stays visible to selections that include history.

use async_trait::async_trait;
use tracing::{info, instrument};

use bans_core::{
    DomainError, Operator, PunishmentRevoker, PunishmentType, RepoResult, Victim,
};

use crate::execute::QueryExecutor;

use super::predicates::{ACTIVE_PREDICATE, EXACT_VICTIM_PREDICATE};

/// PostgreSQL implementation of PunishmentRevoker
#[derive(Clone)]
pub struct PgPunishmentRevoker {
    executor: QueryExecutor,
}

impl PgPunishmentRevoker {
    /// Create a new PgPunishmentRevoker
    pub fn new(executor: QueryExecutor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl PunishmentRevoker for PgPunishmentRevoker {
    #[instrument(skip(self))]
    async fn undo_punishment(&self, id: i64, operator: Operator) -> RepoResult<bool> {
        let sql = format!(
            "INSERT INTO revocations (punishment_id, operator, revoked_at) \
             SELECT p.id, $2, NOW() FROM punishments p WHERE p.id = $1 AND {ACTIVE_PREDICATE} \
             ON CONFLICT (punishment_id) DO NOTHING"
        );
        let operator = operator.to_uuid();

        let rows = self
            .executor
            .query_with_retry(move |conn| {
                let sql = sql.clone();
                Box::pin(async move {
                    let result = sqlx::query(&sql).bind(id).bind(operator).execute(conn).await?;
                    Ok(result.rows_affected())
                })
            })
            .await?;

        if rows > 0 {
            info!(id, "punishment revoked");
        }
        Ok(rows > 0)
    }

    #[instrument(skip(self))]
    async fn undo_punishment_by_type_and_victim(
        &self,
        punishment_type: PunishmentType,
        victim: &Victim,
        operator: Operator,
    ) -> RepoResult<bool> {
        if !punishment_type.is_singular() {
            return Err(DomainError::NotSingular(punishment_type));
        }

        let sql = format!(
            "INSERT INTO revocations (punishment_id, operator, revoked_at) \
             SELECT p.id, $5, NOW() FROM punishments p \
             WHERE p.punishment_type = $1 AND {EXACT_VICTIM_PREDICATE} AND {ACTIVE_PREDICATE} \
             ON CONFLICT (punishment_id) DO NOTHING"
        );
        let columns = victim.to_columns();
        let operator = operator.to_uuid();

        let rows = self
            .executor
            .query_with_retry(move |conn| {
                let sql = sql.clone();
                let columns = columns.clone();
                Box::pin(async move {
                    let result = sqlx::query(&sql)
                        .bind(punishment_type.ordinal())
                        .bind(columns.ordinal)
                        .bind(columns.uuid)
                        .bind(columns.address)
                        .bind(operator)
                        .execute(conn)
                        .await?;
                    Ok(result.rows_affected())
                })
            })
            .await?;

        if rows > 0 {
            info!(%punishment_type, %victim, "punishment revoked");
        }
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgPunishmentRevoker>();
    }

    #[tokio::test]
    async fn test_non_singular_is_rejected_before_io() {
        let pool = crate::create_lazy_pool(&crate::DatabaseConfig::default()).unwrap();
        let revoker = PgPunishmentRevoker::new(QueryExecutor::new(pool));

        let err = revoker
            .undo_punishment_by_type_and_victim(
                PunishmentType::Warn,
                &Victim::player(uuid::Uuid::new_v4()),
                Operator::Console,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotSingular(PunishmentType::Warn)));
    }
}
