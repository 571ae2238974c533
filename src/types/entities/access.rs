use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// Accounts holding root access over an asset.
///
/// Grants append without deduplication, so an account may appear more than
/// once. Revokes remove every occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admins {
    pub id: String,
    pub accounts: Vec<Address>,
}

impl Admins {
    pub fn grant(&mut self, account: Address) {
        self.accounts.push(account);
    }

    pub fn revoke(&mut self, account: Address) {
        self.accounts.retain(|existing| *existing != account);
    }
}

impl Entity for Admins {
    const ENTITY_TYPE: &'static str = "Admins";

    fn id(&self) -> &str {
        &self.id
    }

    fn new(id: String) -> Self {
        Self {
            id,
            accounts: Vec::new(),
        }
    }
}
