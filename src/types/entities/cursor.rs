use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// Position of the last fully processed event for one chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexerCursor {
    /// Chain name.
    pub id: String,
    pub block_number: u64,
    pub log_index: u32,
}

impl IndexerCursor {
    /// Whether an event at `(block_number, log_index)` was already processed.
    pub fn covers(&self, block_number: u64, log_index: u32) -> bool {
        (block_number, log_index) <= (self.block_number, self.log_index)
    }

    /// Moves the cursor forward to `(block_number, log_index)`, never back.
    pub fn advance(&mut self, block_number: u64, log_index: u32) {
        if !self.covers(block_number, log_index) {
            self.block_number = block_number;
            self.log_index = log_index;
        }
    }
}

impl Entity for IndexerCursor {
    const ENTITY_TYPE: &'static str = "IndexerCursor";

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
