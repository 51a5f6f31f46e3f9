//! PostgreSQL implementation of PunishmentSelector
//!
//! A selection order compiles into exactly one statement: the type filter,
//! whichever optional filters are set (ANDed), the active predicate unless
//! everything was requested, a deterministic ordering, then LIMIT/OFFSET.

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use tracing::{debug, instrument};

use bans_core::{Punishment, PunishmentSelector, RepoResult, SelectionOrder};

use crate::execute::QueryExecutor;
use crate::models::{PunishmentModel, PUNISHMENT_COLUMNS};

use super::predicates::{push_victim_filter, ACTIVE_PREDICATE, SELECTION_ORDERING};

/// PostgreSQL implementation of PunishmentSelector
#[derive(Clone)]
pub struct PgPunishmentSelector {
    executor: QueryExecutor,
}

impl PgPunishmentSelector {
    /// Create a new PgPunishmentSelector
    pub fn new(executor: QueryExecutor) -> Self {
        Self { executor }
    }

    async fn fetch(&self, order: &SelectionOrder) -> RepoResult<Vec<Punishment>> {
        if order.is_trivially_empty() {
            return Ok(Vec::new());
        }

        let order = order.clone();
        let models = self
            .executor
            .query(move |conn| {
                let order = order.clone();
                Box::pin(async move {
                    let mut builder = selection_query(&order);
                    builder
                        .build_query_as::<PunishmentModel>()
                        .fetch_all(conn)
                        .await
                })
            })
            .await?;

        debug!(count = models.len(), "selected punishments");
        models.into_iter().map(Punishment::try_from).collect()
    }
}

/// Compile a selection order into a single ordered, paginated statement
pub(crate) fn selection_query(order: &SelectionOrder) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "SELECT {PUNISHMENT_COLUMNS} FROM punishments p WHERE p.punishment_type = "
    ));
    builder.push_bind(order.punishment_type().ordinal());

    if let Some(victim) = order.victim() {
        builder.push(" AND ");
        push_victim_filter(&mut builder, victim);
    }
    if let Some(operator) = order.operator() {
        builder.push(" AND p.operator = ").push_bind(operator.to_uuid());
    }
    if let Some(scope) = order.scope() {
        builder.push(" AND p.scope = ").push_bind(scope.as_token().to_string());
    }
    if !order.selects_all() {
        builder.push(" AND ").push(ACTIVE_PREDICATE);
    }

    builder.push(SELECTION_ORDERING);

    if let Some(limit) = order.limit_to_retrieve() {
        builder.push(" LIMIT ").push_bind(i64::from(limit));
    }
    if order.skip_count() > 0 {
        builder.push(" OFFSET ").push_bind(i64::from(order.skip_count()));
    }

    builder
}

#[async_trait]
impl PunishmentSelector for PgPunishmentSelector {
    #[instrument(skip(self))]
    async fn first_specific_punishment(&self, order: &SelectionOrder) -> RepoResult<Option<Punishment>> {
        let punishments = self.fetch(&order.first_only()).await?;
        Ok(punishments.into_iter().next())
    }

    #[instrument(skip(self))]
    async fn all_specific_punishments(&self, order: &SelectionOrder) -> RepoResult<Vec<Punishment>> {
        self.fetch(order).await
    }
}
