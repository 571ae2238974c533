use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::store::Entity;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetOwnership {
    pub id: String,
    pub creator_obligor: Address,
    pub creator_beneficiary: Address,
    pub counterparty_obligor: Address,
    pub counterparty_beneficiary: Address,
}

impl Entity for AssetOwnership {
    const ENTITY_TYPE: &'static str = "AssetOwnership";

    fn id(&self) -> &str {
        &self.id
    }

    fn new(id: String) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
}
