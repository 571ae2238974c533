//! Persisted entity records.
//!
//! Every record is stored under `(entity_type, id)`. Per-asset records are
//! keyed by the hex asset id plus a fixed suffix, see [`AssetKey`].

mod access;
mod asset;
mod cursor;
mod distributor;
mod market;
mod ownership;
mod schedule;
mod settlement;
mod state;
mod terms;
mod value;

pub use access::Admins;
pub use asset::Asset;
pub use cursor::IndexerCursor;
pub use distributor::{Distributor, Holder};
pub use market::{DataSet, MarketObject};
pub use ownership::AssetOwnership;
pub use schedule::Schedule;
pub use settlement::Settlement;
pub use state::State;
pub use terms::{ContractReference, Cycle, Period, Terms};
pub use value::{FieldMap, FieldValue};

use alloy_primitives::B256;

use crate::transformations::util::format_bytes32;

/// On-chain asset identifier.
pub type AssetId = B256;

/// Canonical `0x`-prefixed lowercase hex form of an asset id.
pub fn format_asset_id(asset_id: &AssetId) -> String {
    format_bytes32(asset_id)
}

/// Id derivation for every record hanging off an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetKey(String);

impl AssetKey {
    pub fn new(asset_id: &AssetId) -> Self {
        Self(format_asset_id(asset_id))
    }

    pub fn asset(&self) -> String {
        self.0.clone()
    }

    pub fn ownership(&self) -> String {
        format!("{}-ownership", self.0)
    }

    pub fn terms(&self) -> String {
        format!("{}-terms", self.0)
    }

    /// Id of a nested terms component, e.g. `0x..-terms-gracePeriod`.
    pub fn terms_component(&self, component: &str) -> String {
        format!("{}-terms-{}", self.0, component)
    }

    pub fn state(&self) -> String {
        format!("{}-state", self.0)
    }

    pub fn schedule(&self) -> String {
        format!("{}-schedule", self.0)
    }

    pub fn admins(&self) -> String {
        format!("{}-admins", self.0)
    }
}

impl std::fmt::Display for AssetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
