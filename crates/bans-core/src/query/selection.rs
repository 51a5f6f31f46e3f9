//! Selection order - an immutable description of one punishment query
//!
//! All set filters are combined with AND. Results are ordered by start time,
//! most recent first, with the punishment id as tie breaker. Pagination is
//! applied after ordering.

use crate::error::DomainError;
use crate::value_objects::{Operator, PunishmentType, Scope, Victim};

/// Filters and pagination for a single punishment query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOrder {
    punishment_type: PunishmentType,
    victim: Option<Victim>,
    operator: Option<Operator>,
    scope: Option<Scope>,
    select_all: bool,
    skip_count: u32,
    limit_to_retrieve: Option<u32>,
}

impl SelectionOrder {
    pub fn builder() -> SelectionOrderBuilder {
        SelectionOrderBuilder::default()
    }

    pub fn punishment_type(&self) -> PunishmentType {
        self.punishment_type
    }

    pub fn victim(&self) -> Option<&Victim> {
        self.victim.as_ref()
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn scope(&self) -> Option<&Scope> {
        self.scope.as_ref()
    }

    /// Whether expired and revoked punishments are included
    pub fn selects_all(&self) -> bool {
        self.select_all
    }

    pub fn skip_count(&self) -> u32 {
        self.skip_count
    }

    /// Maximum number of results, `None` meaning unlimited
    pub fn limit_to_retrieve(&self) -> Option<u32> {
        self.limit_to_retrieve
    }

    /// True if the pagination can only ever produce an empty result
    pub fn is_trivially_empty(&self) -> bool {
        self.limit_to_retrieve == Some(0)
    }

    /// Same order, retrieving at most one result
    pub fn first_only(&self) -> Self {
        let limit = match self.limit_to_retrieve {
            Some(0) => 0,
            _ => 1,
        };
        Self {
            limit_to_retrieve: Some(limit),
            ..self.clone()
        }
    }
}

/// Builder for [`SelectionOrder`]
///
/// Each setter consumes and returns the builder, so a builder is never
/// shared between callers.
#[derive(Debug, Clone, Default)]
pub struct SelectionOrderBuilder {
    punishment_type: Option<PunishmentType>,
    victim: Option<Victim>,
    operator: Option<Operator>,
    scope: Option<Scope>,
    select_all: bool,
    skip_count: u32,
    limit_to_retrieve: Option<u32>,
}

impl SelectionOrderBuilder {
    pub fn punishment_type(mut self, punishment_type: PunishmentType) -> Self {
        self.punishment_type = Some(punishment_type);
        self
    }

    pub fn victim(mut self, victim: Victim) -> Self {
        self.victim = Some(victim);
        self
    }

    pub fn operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Include expired and revoked punishments
    pub fn select_all(mut self) -> Self {
        self.select_all = true;
        self
    }

    /// Discard the first `skip` ordered results
    pub fn skip_first_retrieved(mut self, skip: u32) -> Self {
        self.skip_count = skip;
        self
    }

    /// Cap the number of results after skipping
    pub fn maximum_to_retrieve(mut self, maximum: u32) -> Self {
        self.limit_to_retrieve = Some(maximum);
        self
    }

    /// Build the order
    ///
    /// # Errors
    /// Returns `DomainError::MissingType` if no punishment type was set.
    pub fn build(self) -> Result<SelectionOrder, DomainError> {
        let punishment_type = self.punishment_type.ok_or(DomainError::MissingType)?;
        Ok(SelectionOrder {
            punishment_type,
            victim: self.victim,
            operator: self.operator,
            scope: self.scope,
            select_all: self.select_all,
            skip_count: self.skip_count,
            limit_to_retrieve: self.limit_to_retrieve,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_build_without_type_fails() {
        let err = SelectionOrder::builder().select_all().build().unwrap_err();
        assert!(matches!(err, DomainError::MissingType));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_defaults() {
        let order = SelectionOrder::builder()
            .punishment_type(PunishmentType::Ban)
            .build()
            .unwrap();

        assert_eq!(order.punishment_type(), PunishmentType::Ban);
        assert!(order.victim().is_none());
        assert!(order.operator().is_none());
        assert!(order.scope().is_none());
        assert!(!order.selects_all());
        assert_eq!(order.skip_count(), 0);
        assert_eq!(order.limit_to_retrieve(), None);
    }

    #[test]
    fn test_all_filters() {
        let victim = Victim::player(Uuid::new_v4());
        let operator = Operator::player(Uuid::new_v4());
        let order = SelectionOrder::builder()
            .punishment_type(PunishmentType::Warn)
            .victim(victim)
            .operator(operator)
            .scope(Scope::specific("lobby"))
            .select_all()
            .skip_first_retrieved(10)
            .maximum_to_retrieve(30)
            .build()
            .unwrap();

        assert_eq!(order.victim(), Some(&victim));
        assert_eq!(order.operator(), Some(operator));
        assert_eq!(order.scope(), Some(&Scope::specific("lobby")));
        assert!(order.selects_all());
        assert_eq!(order.skip_count(), 10);
        assert_eq!(order.limit_to_retrieve(), Some(30));
    }

    #[test]
    fn test_builder_is_a_value() {
        let base = SelectionOrder::builder().punishment_type(PunishmentType::Mute);
        let paged = base.clone().maximum_to_retrieve(1).build().unwrap();
        let unpaged = base.build().unwrap();

        assert_eq!(paged.limit_to_retrieve(), Some(1));
        assert_eq!(unpaged.limit_to_retrieve(), None);
    }

    #[test]
    fn test_first_only() {
        let order = SelectionOrder::builder()
            .punishment_type(PunishmentType::Ban)
            .skip_first_retrieved(3)
            .maximum_to_retrieve(20)
            .build()
            .unwrap();
        let first = order.first_only();
        assert_eq!(first.skip_count(), 3);
        assert_eq!(first.limit_to_retrieve(), Some(1));

        let empty = SelectionOrder::builder()
            .punishment_type(PunishmentType::Ban)
            .maximum_to_retrieve(0)
            .build()
            .unwrap();
        assert!(empty.is_trivially_empty());
        assert!(empty.first_only().is_trivially_empty());
    }
}
