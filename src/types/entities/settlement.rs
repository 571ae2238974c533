use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// Delivery-versus-payment settlement, keyed `<settlementId>-dvp`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub id: String,
    pub settlement_id: U256,
    pub creator: Address,
    pub creator_token: Address,
    pub creator_amount: U256,
    pub creator_beneficiary: Address,
    pub counterparty: Address,
    pub counterparty_token: Address,
    pub counterparty_amount: U256,
    pub expiration_date: U256,
    pub status: u8,
}

impl Settlement {
    pub fn id_for(settlement_id: U256) -> String {
        format!("{}-dvp", settlement_id)
    }
}

impl Entity for Settlement {
    const ENTITY_TYPE: &'static str = "Settlement";

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
