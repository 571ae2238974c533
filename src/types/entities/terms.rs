use std::collections::BTreeMap;

use alloy_primitives::{B256, U256};
use serde::{Deserialize, Serialize};

use super::FieldMap;
use crate::store::Entity;

/// Contractual parameters of an asset.
///
/// Scalars live in `fields`. Nested periods, cycles and contract references
/// are stored as their own records and referenced from `components` by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terms {
    pub id: String,
    pub family: String,
    pub fields: FieldMap,
    pub components: BTreeMap<String, String>,
}

impl Entity for Terms {
    const ENTITY_TYPE: &'static str = "Terms";

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

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub id: String,
    pub i: U256,
    pub p: u8,
    pub is_set: bool,
}

impl Entity for Period {
    const ENTITY_TYPE: &'static str = "Period";

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

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    pub id: String,
    pub i: U256,
    pub p: u8,
    pub s: u8,
    pub is_set: bool,
}

impl Entity for Cycle {
    const ENTITY_TYPE: &'static str = "Cycle";

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

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractReference {
    pub id: String,
    pub object: B256,
    pub object2: B256,
    pub reference_type: u8,
    pub role: u8,
}

impl Entity for ContractReference {
    const ENTITY_TYPE: &'static str = "ContractReference";

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
