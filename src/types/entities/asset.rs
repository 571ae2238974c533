use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use super::AssetId;
use crate::store::Entity;

/// Root record of a registered asset. Sub-records are referenced by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub asset_id: AssetId,
    /// Contract family code, e.g. `"PAM"`.
    pub family: String,
    pub terms: String,
    pub state: String,
    pub schedule: String,
    pub ownership: String,
    pub admins: String,
    pub engine: Address,
    pub actor: Address,
    pub registry: Address,
    /// Only set for families with an extension contract.
    pub extension: Option<Address>,
    /// Timestamp of the block that first registered the asset.
    pub created_on: u64,
}

impl Entity for Asset {
    const ENTITY_TYPE: &'static str = "Asset";

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
