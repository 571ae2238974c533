//! Re-read and persist per-asset sub-records.
//!
//! Writers always go through `load_or_create`: an update event may be
//! processed before the registration that would otherwise create the record.
//! Each writer touches only the fields it is given.

use alloy::primitives::B256;

use crate::store::{load_or_create, save, EntityStore, StoreError};
use crate::transformations::chain::{
    CallTarget, ChainReader, OwnershipSnapshot, RevertedAsNone, SchedulePointers,
    StateSnapshot, TermsComponent, TermsSnapshot,
};
use crate::transformations::error::TransformationError;
use crate::types::entities::{
    Admins, AssetId, AssetKey, AssetOwnership, ContractReference, Cycle, Period, Schedule, State,
    Terms,
};
use crate::types::family::FamilySchema;

/// Which ownership pair a write covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipScope {
    All,
    Beneficiaries,
    Obligors,
}

/// Fetch the four schedule pointers. `None` if any of them reverted.
pub async fn fetch_schedule_pointers(
    reader: &dyn ChainReader,
    target: CallTarget,
    asset_id: AssetId,
) -> Result<Option<SchedulePointers>, TransformationError> {
    let Some(next_schedule_index) = reader
        .get_next_schedule_index(target, asset_id)
        .await
        .reverted_as_none("getNextScheduleIndex")?
    else {
        return Ok(None);
    };
    let Some(pending_event) = reader
        .get_pending_event(target, asset_id)
        .await
        .reverted_as_none("getPendingEvent")?
    else {
        return Ok(None);
    };
    let Some(next_scheduled_event) = reader
        .get_next_scheduled_event(target, asset_id)
        .await
        .reverted_as_none("getNextScheduledEvent")?
    else {
        return Ok(None);
    };
    let Some(next_underlying_event) = reader
        .get_next_underlying_event(target, asset_id)
        .await
        .reverted_as_none("getNextUnderlyingEvent")?
    else {
        return Ok(None);
    };

    Ok(Some(SchedulePointers {
        next_schedule_index,
        pending_event,
        next_scheduled_event,
        next_underlying_event,
    }))
}

/// Fetch the full schedule plus its pointers. `None` if any call reverted.
pub async fn fetch_schedule(
    reader: &dyn ChainReader,
    target: CallTarget,
    asset_id: AssetId,
) -> Result<Option<(Vec<B256>, SchedulePointers)>, TransformationError> {
    let Some(events) = reader
        .get_schedule(target, asset_id)
        .await
        .reverted_as_none("getSchedule")?
    else {
        return Ok(None);
    };
    Ok(fetch_schedule_pointers(reader, target, asset_id)
        .await?
        .map(|pointers| (events, pointers)))
}

/// Overwrite terms and their nested components. Returns the terms id.
pub async fn write_terms(
    store: &dyn EntityStore,
    family: &FamilySchema,
    key: &AssetKey,
    snapshot: &TermsSnapshot,
) -> Result<String, StoreError> {
    let (mut terms, _) = load_or_create::<Terms>(store, &key.terms()).await?;
    terms.family = family.name.to_string();
    terms.fields = snapshot.fields.clone();
    terms.components.clear();

    for (name, component) in &snapshot.components {
        let id = key.terms_component(name);
        match component {
            TermsComponent::Period { i, p, is_set } => {
                let period = Period {
                    id: id.clone(),
                    i: *i,
                    p: *p,
                    is_set: *is_set,
                };
                save(store, &period).await?;
            }
            TermsComponent::Cycle { i, p, s, is_set } => {
                let cycle = Cycle {
                    id: id.clone(),
                    i: *i,
                    p: *p,
                    s: *s,
                    is_set: *is_set,
                };
                save(store, &cycle).await?;
            }
            TermsComponent::ContractReference {
                object,
                object2,
                reference_type,
                role,
            } => {
                let reference = ContractReference {
                    id: id.clone(),
                    object: *object,
                    object2: *object2,
                    reference_type: *reference_type,
                    role: *role,
                };
                save(store, &reference).await?;
            }
        }
        terms.components.insert(name.clone(), id);
    }

    save(store, &terms).await?;
    Ok(terms.id)
}

/// Overwrite every state field. Returns the state id.
pub async fn write_state(
    store: &dyn EntityStore,
    family: &FamilySchema,
    key: &AssetKey,
    snapshot: &StateSnapshot,
) -> Result<String, StoreError> {
    let (mut state, _) = load_or_create::<State>(store, &key.state()).await?;
    state.family = family.name.to_string();
    state.fields = snapshot.fields.clone();
    save(store, &state).await?;
    Ok(state.id)
}

/// Overwrite the ownership pair(s) in `scope`. Returns the ownership id.
pub async fn write_ownership(
    store: &dyn EntityStore,
    key: &AssetKey,
    snapshot: &OwnershipSnapshot,
    scope: OwnershipScope,
) -> Result<String, StoreError> {
    let (mut ownership, _) = load_or_create::<AssetOwnership>(store, &key.ownership()).await?;
    if matches!(scope, OwnershipScope::All | OwnershipScope::Obligors) {
        ownership.creator_obligor = snapshot.creator_obligor;
        ownership.counterparty_obligor = snapshot.counterparty_obligor;
    }
    if matches!(scope, OwnershipScope::All | OwnershipScope::Beneficiaries) {
        ownership.creator_beneficiary = snapshot.creator_beneficiary;
        ownership.counterparty_beneficiary = snapshot.counterparty_beneficiary;
    }
    save(store, &ownership).await?;
    Ok(ownership.id)
}

/// Overwrite the schedule pointers, and the event list when given.
/// Returns the schedule id.
pub async fn write_schedule(
    store: &dyn EntityStore,
    key: &AssetKey,
    events: Option<Vec<B256>>,
    pointers: &SchedulePointers,
) -> Result<String, StoreError> {
    let (mut schedule, _) = load_or_create::<Schedule>(store, &key.schedule()).await?;
    if let Some(events) = events {
        schedule.events = events;
    }
    schedule.next_schedule_index = pointers.next_schedule_index;
    schedule.pending_event = pointers.pending_event;
    schedule.next_scheduled_event = pointers.next_scheduled_event;
    schedule.next_underlying_event = pointers.next_underlying_event;
    save(store, &schedule).await?;
    Ok(schedule.id)
}

/// Make sure the admins record exists without touching its accounts.
/// Returns the admins id.
pub async fn ensure_admins(store: &dyn EntityStore, key: &AssetKey) -> Result<String, StoreError> {
    let (admins, created) = load_or_create::<Admins>(store, &key.admins()).await?;
    if created {
        save(store, &admins).await?;
    }
    Ok(admins.id)
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{Address, U256};

    use super::*;
    use crate::store::{load, Entity, MemoryEntityStore};
    use crate::types::entities::FieldValue;
    use crate::types::family::CEC;

    fn key() -> AssetKey {
        AssetKey::new(&B256::repeat_byte(0xaa))
    }

    #[tokio::test]
    async fn test_write_ownership_scope_keeps_other_pair() {
        let store = MemoryEntityStore::new();
        let first = OwnershipSnapshot {
            creator_obligor: Address::repeat_byte(1),
            creator_beneficiary: Address::repeat_byte(2),
            counterparty_obligor: Address::repeat_byte(3),
            counterparty_beneficiary: Address::repeat_byte(4),
        };
        write_ownership(&store, &key(), &first, OwnershipScope::All)
            .await
            .unwrap();

        let second = OwnershipSnapshot {
            creator_obligor: Address::repeat_byte(9),
            creator_beneficiary: Address::repeat_byte(8),
            counterparty_obligor: Address::repeat_byte(7),
            counterparty_beneficiary: Address::repeat_byte(6),
        };
        write_ownership(&store, &key(), &second, OwnershipScope::Beneficiaries)
            .await
            .unwrap();

        let ownership = load::<AssetOwnership>(&store, &key().ownership())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(ownership.creator_obligor, Address::repeat_byte(1));
        assert_eq!(ownership.counterparty_obligor, Address::repeat_byte(3));
        assert_eq!(ownership.creator_beneficiary, Address::repeat_byte(8));
        assert_eq!(ownership.counterparty_beneficiary, Address::repeat_byte(6));
    }

    #[tokio::test]
    async fn test_write_terms_stores_components_separately() {
        let store = MemoryEntityStore::new();
        let mut snapshot = TermsSnapshot::default();
        snapshot
            .fields
            .insert("feeRate".to_string(), FieldValue::Int(Default::default()));
        snapshot.components.insert(
            "contractReference_1".to_string(),
            TermsComponent::ContractReference {
                object: B256::repeat_byte(0x11),
                object2: B256::ZERO,
                reference_type: 2,
                role: 1,
            },
        );

        let id = write_terms(&store, &CEC, &key(), &snapshot).await.unwrap();
        let terms = load::<Terms>(&store, &id).await.unwrap().unwrap();
        assert_eq!(terms.family, "CEC");
        let reference_id = &terms.components["contractReference_1"];
        assert_eq!(reference_id, &key().terms_component("contractReference_1"));

        let reference = load::<ContractReference>(&store, reference_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reference.reference_type, 2);
        assert_eq!(reference.object, B256::repeat_byte(0x11));
    }

    #[tokio::test]
    async fn test_write_schedule_without_events_keeps_list() {
        let store = MemoryEntityStore::new();
        let pointers = SchedulePointers {
            next_schedule_index: U256::from(1),
            ..Default::default()
        };
        let events = vec![B256::repeat_byte(1), B256::repeat_byte(2)];
        write_schedule(&store, &key(), Some(events.clone()), &pointers)
            .await
            .unwrap();

        let advanced = SchedulePointers {
            next_schedule_index: U256::from(2),
            ..Default::default()
        };
        write_schedule(&store, &key(), None, &advanced).await.unwrap();

        let schedule = load::<Schedule>(&store, &key().schedule())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(schedule.events, events);
        assert_eq!(schedule.next_schedule_index, U256::from(2));
    }

    #[tokio::test]
    async fn test_ensure_admins_keeps_existing_accounts() {
        let store = MemoryEntityStore::new();
        let mut admins = Admins::new(key().admins());
        admins.grant(Address::repeat_byte(0xbe));
        save(&store, &admins).await.unwrap();

        ensure_admins(&store, &key()).await.unwrap();
        let loaded = load::<Admins>(&store, &key().admins()).await.unwrap().unwrap();
        assert_eq!(loaded.accounts, vec![Address::repeat_byte(0xbe)]);
    }
}
