//! Read access to on-chain contract state.
//!
//! Handlers never decode events into records directly: they re-read the
//! authoritative values from the emitting contract at the event's block
//! through a [`ChainReader`]. Every call can revert, which is an expected
//! outcome and surfaces as [`CallError::Reverted`].

use std::collections::BTreeMap;

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use thiserror::Error;

use super::error::TransformationError;
use crate::rpc::RpcError;
use crate::types::entities::{AssetId, FieldMap};
use crate::types::family::FamilySchema;

#[derive(Debug, Error)]
pub enum CallError {
    #[error("execution reverted: {0}")]
    Reverted(String),

    #[error(transparent)]
    Rpc(RpcError),

    #[error("decode error: {0}")]
    Decode(String),
}

impl From<RpcError> for CallError {
    fn from(err: RpcError) -> Self {
        if err.is_revert() {
            CallError::Reverted(err.to_string())
        } else {
            CallError::Rpc(err)
        }
    }
}

pub type CallResult<T> = Result<T, CallError>;

/// Contract and block a read-call is executed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallTarget {
    pub address: Address,
    pub block_number: u64,
}

impl CallTarget {
    pub fn new(address: Address, block_number: u64) -> Self {
        Self {
            address,
            block_number,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnershipSnapshot {
    pub creator_obligor: Address,
    pub creator_beneficiary: Address,
    pub counterparty_obligor: Address,
    pub counterparty_beneficiary: Address,
}

/// A nested terms struct as returned by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermsComponent {
    Period {
        i: U256,
        p: u8,
        is_set: bool,
    },
    Cycle {
        i: U256,
        p: u8,
        s: u8,
        is_set: bool,
    },
    ContractReference {
        object: B256,
        object2: B256,
        reference_type: u8,
        role: u8,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermsSnapshot {
    pub fields: FieldMap,
    pub components: BTreeMap<String, TermsComponent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateSnapshot {
    pub fields: FieldMap,
}

/// The four schedule pointers kept next to the schedule itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulePointers {
    pub next_schedule_index: U256,
    pub pending_event: B256,
    pub next_scheduled_event: B256,
    pub next_underlying_event: B256,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettlementSnapshot {
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

#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn get_ownership(
        &self,
        target: CallTarget,
        asset_id: AssetId,
    ) -> CallResult<OwnershipSnapshot>;

    async fn get_terms(
        &self,
        target: CallTarget,
        family: &'static FamilySchema,
        asset_id: AssetId,
    ) -> CallResult<TermsSnapshot>;

    async fn get_state(
        &self,
        target: CallTarget,
        family: &'static FamilySchema,
        asset_id: AssetId,
    ) -> CallResult<StateSnapshot>;

    async fn get_schedule(&self, target: CallTarget, asset_id: AssetId) -> CallResult<Vec<B256>>;

    async fn get_engine(&self, target: CallTarget, asset_id: AssetId) -> CallResult<Address>;

    async fn get_actor(&self, target: CallTarget, asset_id: AssetId) -> CallResult<Address>;

    async fn get_extension(&self, target: CallTarget, asset_id: AssetId) -> CallResult<Address>;

    async fn get_next_schedule_index(
        &self,
        target: CallTarget,
        asset_id: AssetId,
    ) -> CallResult<U256>;

    async fn get_pending_event(&self, target: CallTarget, asset_id: AssetId) -> CallResult<B256>;

    async fn get_next_scheduled_event(
        &self,
        target: CallTarget,
        asset_id: AssetId,
    ) -> CallResult<B256>;

    async fn get_next_underlying_event(
        &self,
        target: CallTarget,
        asset_id: AssetId,
    ) -> CallResult<B256>;

    /// Registry backing an actor contract.
    async fn asset_registry(&self, target: CallTarget) -> CallResult<Address>;

    async fn settlements(
        &self,
        target: CallTarget,
        settlement_id: U256,
    ) -> CallResult<SettlementSnapshot>;

    async fn balance_of(&self, target: CallTarget, holder: Address) -> CallResult<U256>;

    async fn withdrawable_funds_of(&self, target: CallTarget, holder: Address) -> CallResult<U256>;
}

/// Turns reverts into `None` so handlers can skip, and anything else into
/// a [`TransformationError`].
pub trait RevertedAsNone<T> {
    fn reverted_as_none(self, call: &str) -> Result<Option<T>, TransformationError>;
}

impl<T> RevertedAsNone<T> for CallResult<T> {
    fn reverted_as_none(self, call: &str) -> Result<Option<T>, TransformationError> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(CallError::Reverted(reason)) => {
                tracing::debug!("Call {} reverted: {}", call, reason);
                Ok(None)
            }
            Err(source) => Err(TransformationError::CallFailed {
                call: call.to_string(),
                source,
            }),
        }
    }
}
