use serde::{Deserialize, Serialize};

use super::FieldMap;
use crate::store::Entity;

/// Current lifecycle state of an asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: String,
    pub family: String,
    pub fields: FieldMap,
}

impl Entity for State {
    const ENTITY_TYPE: &'static str = "State";

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
