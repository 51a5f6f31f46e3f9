//! SQL fragments shared by the punishment repositories
//!
//! Every fragment expects the punishments table to be aliased as `p`.

use sqlx::{Postgres, QueryBuilder};

use bans_core::{Victim, VictimType};

/// Not revoked and not expired. Kicks end when they start, so they never match.
pub const ACTIVE_PREDICATE: &str = "NOT EXISTS (SELECT 1 FROM revocations r WHERE r.punishment_id = p.id) \
     AND (p.end_time IS NULL OR p.end_time > NOW())";

/// Exact victim match against binds `$2` (ordinal), `$3` (uuid) and `$4` (address)
pub const EXACT_VICTIM_PREDICATE: &str = "p.victim_type IS NOT DISTINCT FROM $2 \
     AND p.victim_uuid IS NOT DISTINCT FROM $3 \
     AND p.victim_address IS NOT DISTINCT FROM $4";

/// Most recent first, id breaking ties so pagination is stable
pub const SELECTION_ORDERING: &str = " ORDER BY p.start_time DESC, p.id DESC";

/// Push the victim filter used by selections.
///
/// Player and address victims match exactly. A composite victim matches any
/// punishment sharing its identifier or its address.
pub fn push_victim_filter(builder: &mut QueryBuilder<'_, Postgres>, victim: &Victim) {
    match *victim {
        Victim::Player { uuid } => {
            builder
                .push("(p.victim_type = ")
                .push_bind(VictimType::PLAYER_ORDINAL)
                .push(" AND p.victim_uuid = ")
                .push_bind(uuid)
                .push(")");
        }
        Victim::Address { address } => {
            builder
                .push("(p.victim_type = ")
                .push_bind(VictimType::ADDRESS_ORDINAL)
                .push(" AND p.victim_address = ")
                .push_bind(address.to_bytes())
                .push(")");
        }
        Victim::Composite { uuid, address } => {
            builder
                .push("(p.victim_uuid = ")
                .push_bind(uuid)
                .push(" OR p.victim_address = ")
                .push_bind(address.to_bytes())
                .push(")");
        }
    }
}
