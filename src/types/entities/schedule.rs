use alloy_primitives::{B256, U256};
use serde::{Deserialize, Serialize};

use crate::store::Entity;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: String,
    /// Encoded schedule events, in on-chain order.
    pub events: Vec<B256>,
    pub next_schedule_index: U256,
    pub pending_event: B256,
    pub next_scheduled_event: B256,
    pub next_underlying_event: B256,
}

impl Entity for Schedule {
    const ENTITY_TYPE: &'static str = "Schedule";

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
