use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// Data set published through the data registry, keyed by set id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSet {
    pub id: String,
    pub provider: Address,
}

impl Entity for DataSet {
    const ENTITY_TYPE: &'static str = "DataSet";

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
pub struct MarketObject {
    pub id: String,
    pub provider: Address,
}

impl Entity for MarketObject {
    const ENTITY_TYPE: &'static str = "MarketObject";

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
