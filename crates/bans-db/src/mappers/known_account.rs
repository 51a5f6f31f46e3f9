//! KnownAccount entity <-> model mapper

use bans_core::{DomainError, KnownAccount, NetworkAddress, VictimDecodeError};

use crate::models::KnownAccountModel;

impl TryFrom<KnownAccountModel> for KnownAccount {
    type Error = DomainError;

    fn try_from(model: KnownAccountModel) -> Result<Self, Self::Error> {
        let address = NetworkAddress::from_bytes(&model.address).map_err(VictimDecodeError::from)?;
        Ok(KnownAccount {
            uuid: model.uuid,
            latest_name: model.name,
            address,
            updated: model.updated,
        })
    }
}
