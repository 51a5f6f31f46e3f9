//! Value objects - immutable types that represent domain concepts

mod network_address;
mod operator;
mod punishment_type;
mod scope;
mod victim;

pub use network_address::{AddressDecodeError, NetworkAddress};
pub use operator::Operator;
pub use punishment_type::PunishmentType;
pub use scope::Scope;
pub use victim::{Victim, VictimColumns, VictimDecodeError, VictimType};
