//! Scripted [`ChainReader`] and event builders for handler tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;

use super::chain::{
    CallError, CallResult, CallTarget, ChainReader, OwnershipSnapshot, SchedulePointers,
    SettlementSnapshot, StateSnapshot, TermsComponent, TermsSnapshot,
};
use super::context::{DecodedEvent, DecodedValue, TransformationContext};
use crate::store::MemoryEntityStore;
use crate::types::config::RevertPolicy;
use crate::types::entities::{AssetId, FieldValue};
use crate::types::family::{ComponentKind, FamilySchema, FieldKind, FieldSpec, TermsField};

pub const REGISTRY: Address = Address::repeat_byte(0x01);
pub const ACTOR: Address = Address::repeat_byte(0x02);

/// On-chain view of one asset as the mock registry returns it.
#[derive(Debug, Clone, Default)]
pub struct MockAsset {
    pub ownership: OwnershipSnapshot,
    pub terms: TermsSnapshot,
    pub state: StateSnapshot,
    pub schedule: Vec<B256>,
    pub pointers: SchedulePointers,
    pub engine: Address,
    pub actor: Address,
    pub extension: Address,
}

fn sample_field(spec: &FieldSpec) -> FieldValue {
    match (spec.kind, spec.name) {
        (FieldKind::Uint, "statusDate") => FieldValue::Uint(U256::from(100)),
        (FieldKind::Enum, _) => FieldValue::Enum(0),
        (FieldKind::Address, _) => FieldValue::Address(Address::repeat_byte(0x11)),
        (FieldKind::Bytes32, _) => FieldValue::Bytes32(B256::ZERO),
        (FieldKind::Uint, _) => FieldValue::Uint(U256::ZERO),
        (FieldKind::Int, _) => FieldValue::Int(Default::default()),
        (FieldKind::Bool, _) => FieldValue::Bool(false),
    }
}

impl MockAsset {
    /// A fully populated asset of `family` with `statusDate = 100`.
    pub fn sample(family: &FamilySchema) -> Self {
        let mut terms = TermsSnapshot::default();
        for field in family.terms {
            match field {
                TermsField::Scalar(spec) => {
                    terms.fields.insert(spec.name.to_string(), sample_field(spec));
                }
                TermsField::Component { name, kind } => {
                    let component = match kind {
                        ComponentKind::Period => TermsComponent::Period {
                            i: U256::from(1),
                            p: 0,
                            is_set: true,
                        },
                        ComponentKind::Cycle => TermsComponent::Cycle {
                            i: U256::from(1),
                            p: 2,
                            s: 0,
                            is_set: true,
                        },
                        ComponentKind::ContractReference => TermsComponent::ContractReference {
                            object: B256::repeat_byte(0x22),
                            object2: B256::ZERO,
                            reference_type: 0,
                            role: 0,
                        },
                    };
                    terms.components.insert(name.to_string(), component);
                }
            }
        }

        let state = StateSnapshot {
            fields: family
                .state
                .iter()
                .map(|spec| (spec.name.to_string(), sample_field(spec)))
                .collect(),
        };

        Self {
            ownership: OwnershipSnapshot {
                creator_obligor: Address::repeat_byte(0xc0),
                creator_beneficiary: Address::repeat_byte(0xc1),
                counterparty_obligor: Address::repeat_byte(0xd0),
                counterparty_beneficiary: Address::repeat_byte(0xd1),
            },
            terms,
            state,
            schedule: vec![B256::repeat_byte(0x05), B256::repeat_byte(0x06)],
            pointers: SchedulePointers {
                next_schedule_index: U256::from(0),
                pending_event: B256::ZERO,
                next_scheduled_event: B256::repeat_byte(0x05),
                next_underlying_event: B256::ZERO,
            },
            engine: Address::repeat_byte(0xe0),
            actor: ACTOR,
            extension: Address::repeat_byte(0xe1),
        }
    }

    pub fn with_state_field(mut self, name: &str, value: FieldValue) -> Self {
        self.state.fields.insert(name.to_string(), value);
        self
    }
}

/// Chain reader backed by in-memory fixtures.
///
/// Unknown assets, actors, settlements and holders revert, as do calls whose
/// name was passed to [`MockChainReader::revert`].
#[derive(Default)]
pub struct MockChainReader {
    assets: Mutex<HashMap<AssetId, MockAsset>>,
    actors: Mutex<HashMap<Address, Address>>,
    settlements: Mutex<HashMap<U256, SettlementSnapshot>>,
    holders: Mutex<HashMap<(Address, Address), (U256, U256)>>,
    reverting: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<&'static str>>,
}

impl MockChainReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_asset(&self, asset_id: AssetId, asset: MockAsset) {
        self.assets.lock().unwrap().insert(asset_id, asset);
    }

    pub fn set_actor(&self, actor: Address, registry: Address) {
        self.actors.lock().unwrap().insert(actor, registry);
    }

    pub fn set_settlement(&self, settlement_id: U256, settlement: SettlementSnapshot) {
        self.settlements
            .lock()
            .unwrap()
            .insert(settlement_id, settlement);
    }

    pub fn set_holder(&self, token: Address, holder: Address, balance: U256, withdrawable: U256) {
        self.holders
            .lock()
            .unwrap()
            .insert((token, holder), (balance, withdrawable));
    }

    /// Make every call to `call` revert from now on.
    pub fn revert(&self, call: &'static str) {
        self.reverting.lock().unwrap().insert(call);
    }

    /// Names of the calls made so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn enter(&self, call: &'static str) -> CallResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.reverting.lock().unwrap().contains(call) {
            return Err(CallError::Reverted(format!("{} scripted to revert", call)));
        }
        Ok(())
    }

    fn asset(&self, call: &'static str, asset_id: AssetId) -> CallResult<MockAsset> {
        self.enter(call)?;
        self.assets
            .lock()
            .unwrap()
            .get(&asset_id)
            .cloned()
            .ok_or_else(|| CallError::Reverted(format!("{}: unknown asset", call)))
    }
}

#[async_trait]
impl ChainReader for MockChainReader {
    async fn get_ownership(
        &self,
        _target: CallTarget,
        asset_id: AssetId,
    ) -> CallResult<OwnershipSnapshot> {
        Ok(self.asset("getOwnership", asset_id)?.ownership)
    }

    async fn get_terms(
        &self,
        _target: CallTarget,
        _family: &'static FamilySchema,
        asset_id: AssetId,
    ) -> CallResult<TermsSnapshot> {
        Ok(self.asset("getTerms", asset_id)?.terms)
    }

    async fn get_state(
        &self,
        _target: CallTarget,
        _family: &'static FamilySchema,
        asset_id: AssetId,
    ) -> CallResult<StateSnapshot> {
        Ok(self.asset("getState", asset_id)?.state)
    }

    async fn get_schedule(&self, _target: CallTarget, asset_id: AssetId) -> CallResult<Vec<B256>> {
        Ok(self.asset("getSchedule", asset_id)?.schedule)
    }

    async fn get_engine(&self, _target: CallTarget, asset_id: AssetId) -> CallResult<Address> {
        Ok(self.asset("getEngine", asset_id)?.engine)
    }

    async fn get_actor(&self, _target: CallTarget, asset_id: AssetId) -> CallResult<Address> {
        Ok(self.asset("getActor", asset_id)?.actor)
    }

    async fn get_extension(&self, _target: CallTarget, asset_id: AssetId) -> CallResult<Address> {
        Ok(self.asset("getExtension", asset_id)?.extension)
    }

    async fn get_next_schedule_index(
        &self,
        _target: CallTarget,
        asset_id: AssetId,
    ) -> CallResult<U256> {
        Ok(self
            .asset("getNextScheduleIndex", asset_id)?
            .pointers
            .next_schedule_index)
    }

    async fn get_pending_event(&self, _target: CallTarget, asset_id: AssetId) -> CallResult<B256> {
        Ok(self.asset("getPendingEvent", asset_id)?.pointers.pending_event)
    }

    async fn get_next_scheduled_event(
        &self,
        _target: CallTarget,
        asset_id: AssetId,
    ) -> CallResult<B256> {
        Ok(self
            .asset("getNextScheduledEvent", asset_id)?
            .pointers
            .next_scheduled_event)
    }

    async fn get_next_underlying_event(
        &self,
        _target: CallTarget,
        asset_id: AssetId,
    ) -> CallResult<B256> {
        Ok(self
            .asset("getNextUnderlyingEvent", asset_id)?
            .pointers
            .next_underlying_event)
    }

    async fn asset_registry(&self, target: CallTarget) -> CallResult<Address> {
        self.enter("assetRegistry")?;
        self.actors
            .lock()
            .unwrap()
            .get(&target.address)
            .copied()
            .ok_or_else(|| CallError::Reverted("assetRegistry: unknown actor".to_string()))
    }

    async fn settlements(
        &self,
        _target: CallTarget,
        settlement_id: U256,
    ) -> CallResult<SettlementSnapshot> {
        self.enter("settlements")?;
        self.settlements
            .lock()
            .unwrap()
            .get(&settlement_id)
            .cloned()
            .ok_or_else(|| CallError::Reverted("settlements: unknown id".to_string()))
    }

    async fn balance_of(&self, target: CallTarget, holder: Address) -> CallResult<U256> {
        self.enter("balanceOf")?;
        Ok(self
            .holders
            .lock()
            .unwrap()
            .get(&(target.address, holder))
            .map(|(balance, _)| *balance)
            .unwrap_or_default())
    }

    async fn withdrawable_funds_of(&self, target: CallTarget, holder: Address) -> CallResult<U256> {
        self.enter("withdrawableFundsOf")?;
        Ok(self
            .holders
            .lock()
            .unwrap()
            .get(&(target.address, holder))
            .map(|(_, withdrawable)| *withdrawable)
            .unwrap_or_default())
    }
}

pub fn context<'a>(
    store: &'a MemoryEntityStore,
    reader: &'a MockChainReader,
    policy: RevertPolicy,
) -> TransformationContext<'a> {
    TransformationContext {
        chain_name: "testnet",
        chain_id: 1337,
        policy,
        store,
        reader,
    }
}

pub fn event(
    source: &str,
    event_name: &str,
    contract_address: Address,
    block_number: u64,
    params: Vec<(&str, DecodedValue)>,
) -> DecodedEvent {
    DecodedEvent {
        block_number,
        block_timestamp: 1_600_000_000 + block_number * 12,
        transaction_hash: B256::ZERO,
        log_index: 0,
        contract_address,
        source_name: source.to_string(),
        event_name: event_name.to_string(),
        params: params
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
    }
}

/// An event whose only parameter is `assetId`.
pub fn asset_event(
    source: &str,
    event_name: &str,
    contract_address: Address,
    block_number: u64,
    asset_id: AssetId,
) -> DecodedEvent {
    event(
        source,
        event_name,
        contract_address,
        block_number,
        vec![("assetId", DecodedValue::Bytes32(asset_id))],
    )
}
