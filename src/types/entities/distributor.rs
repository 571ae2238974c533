use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::store::Entity;
use crate::transformations::util::format_address;

/// Funds distribution token deployed by the FDT factory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distributor {
    pub id: String,
    pub address: Address,
    /// Holder record ids, each listed once.
    pub holders: Vec<String>,
}

impl Distributor {
    pub fn id_for(distributor: Address) -> String {
        format_address(&distributor)
    }

    /// Adds a holder id unless it is already listed.
    pub fn track_holder(&mut self, holder_id: &str) {
        if !self.holders.iter().any(|existing| existing == holder_id) {
            self.holders.push(holder_id.to_string());
        }
    }
}

impl Entity for Distributor {
    const ENTITY_TYPE: &'static str = "Distributor";

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

/// Balance of one account in one distributor, keyed `<distributor>-<holder>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holder {
    pub id: String,
    pub address: Address,
    pub balance: U256,
    pub withdrawable_funds: U256,
}

impl Holder {
    pub fn id_for(distributor: Address, holder: Address) -> String {
        format!("{}-{}", format_address(&distributor), format_address(&holder))
    }
}

impl Entity for Holder {
    const ENTITY_TYPE: &'static str = "Holder";

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_holder_dedupes() {
        let mut distributor = Distributor::new("0xd".to_string());
        distributor.track_holder("0xd-0x1");
        distributor.track_holder("0xd-0x2");
        distributor.track_holder("0xd-0x1");
        assert_eq!(distributor.holders, vec!["0xd-0x1", "0xd-0x2"]);
    }

    #[test]
    fn test_holder_id_joins_addresses() {
        let id = Holder::id_for(Address::repeat_byte(0x0d), Address::repeat_byte(0x01));
        assert_eq!(
            id,
            format!("0x{}-0x{}", "0d".repeat(20), "01".repeat(20))
        );
    }
}
