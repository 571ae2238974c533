//! `RegisteredAsset`: first sighting of an asset in a registry.
//!
//! Re-reads every sub-record from the registry, writes them, and then writes
//! the root [`Asset`] pointing at them. The Asset is only written when every
//! reference resolves, so a reader never follows a dangling id.

use alloy::primitives::{Address, B256};
use async_trait::async_trait;

use crate::store::{load_or_create, save};
use crate::transformations::chain::{
    OwnershipSnapshot, RevertedAsNone, SchedulePointers, StateSnapshot, TermsSnapshot,
};
use crate::transformations::context::{DecodedEvent, TransformationContext};
use crate::transformations::error::TransformationError;
use crate::transformations::registry::TransformationRegistry;
use crate::transformations::traits::{
    EventHandler, EventTrigger, HandlerOutcome, TransformationHandler,
};
use crate::transformations::util::sync::{
    ensure_admins, fetch_schedule, write_ownership, write_schedule, write_state, write_terms,
    OwnershipScope,
};
use crate::types::config::RevertPolicy;
use crate::types::entities::{Asset, AssetKey};
use crate::types::family::FamilySchema;

pub struct RegisteredAssetHandler {
    source: String,
    family: &'static FamilySchema,
}

impl RegisteredAssetHandler {
    pub fn new(source: &str, family: &'static FamilySchema) -> Self {
        Self {
            source: source.to_string(),
            family,
        }
    }
}

/// Results of every registry read for one asset. `None` means reverted.
struct RegistrySnapshot {
    terms: Option<TermsSnapshot>,
    state: Option<StateSnapshot>,
    ownership: Option<OwnershipSnapshot>,
    schedule: Option<(Vec<B256>, SchedulePointers)>,
    engine: Option<Address>,
    actor: Option<Address>,
    extension: Option<Address>,
}

impl RegistrySnapshot {
    fn reverted(&self, family: &FamilySchema) -> Vec<&'static str> {
        let mut reverted = Vec::new();
        if self.terms.is_none() {
            reverted.push("terms");
        }
        if self.state.is_none() {
            reverted.push("state");
        }
        if self.ownership.is_none() {
            reverted.push("ownership");
        }
        if self.schedule.is_none() {
            reverted.push("schedule");
        }
        if self.engine.is_none() {
            reverted.push("engine");
        }
        if self.actor.is_none() {
            reverted.push("actor");
        }
        if family.has_extension && self.extension.is_none() {
            reverted.push("extension");
        }
        reverted
    }
}

impl RegisteredAssetHandler {
    async fn fetch(
        &self,
        ctx: &TransformationContext<'_>,
        event: &DecodedEvent,
    ) -> Result<RegistrySnapshot, TransformationError> {
        let reader = ctx.reader;
        let target = event.emitter();
        let asset_id = event.asset_id()?;

        let extension = if self.family.has_extension {
            reader
                .get_extension(target, asset_id)
                .await
                .reverted_as_none("getExtension")?
        } else {
            None
        };

        Ok(RegistrySnapshot {
            terms: reader
                .get_terms(target, self.family, asset_id)
                .await
                .reverted_as_none("getTerms")?,
            state: reader
                .get_state(target, self.family, asset_id)
                .await
                .reverted_as_none("getState")?,
            ownership: reader
                .get_ownership(target, asset_id)
                .await
                .reverted_as_none("getOwnership")?,
            schedule: fetch_schedule(reader, target, asset_id).await?,
            engine: reader
                .get_engine(target, asset_id)
                .await
                .reverted_as_none("getEngine")?,
            actor: reader
                .get_actor(target, asset_id)
                .await
                .reverted_as_none("getActor")?,
            extension,
        })
    }
}

#[async_trait]
impl TransformationHandler for RegisteredAssetHandler {
    fn name(&self) -> &'static str {
        "RegisteredAssetHandler"
    }

    async fn handle(
        &self,
        ctx: &TransformationContext<'_>,
        event: &DecodedEvent,
    ) -> Result<HandlerOutcome, TransformationError> {
        let asset_id = event.asset_id()?;
        let key = AssetKey::new(&asset_id);
        tracing::debug!("Process event (RegisteredAsset) for asset ({})", key);

        let snapshot = self.fetch(ctx, event).await?;
        let reverted = snapshot.reverted(self.family);

        if ctx.policy == RevertPolicy::Strict && !reverted.is_empty() {
            tracing::debug!(
                "Skipping registration of asset ({}), reverted: {}",
                key,
                reverted.join(", ")
            );
            return Ok(HandlerOutcome::Skipped("registry read reverted"));
        }

        let store = ctx.store;
        let terms = match &snapshot.terms {
            Some(terms) => Some(write_terms(store, self.family, &key, terms).await?),
            None => None,
        };
        let state = match &snapshot.state {
            Some(state) => Some(write_state(store, self.family, &key, state).await?),
            None => None,
        };
        let ownership = match &snapshot.ownership {
            Some(ownership) => {
                Some(write_ownership(store, &key, ownership, OwnershipScope::All).await?)
            }
            None => None,
        };
        let schedule = match snapshot.schedule {
            Some((events, pointers)) => {
                Some(write_schedule(store, &key, Some(events), &pointers).await?)
            }
            None => None,
        };
        // Grants may already have been indexed for this asset.
        let admins = ensure_admins(store, &key).await?;

        let (Some(terms), Some(state), Some(ownership), Some(schedule), Some(engine), Some(actor)) =
            (terms, state, ownership, schedule, snapshot.engine, snapshot.actor)
        else {
            tracing::debug!(
                "Asset ({}) not written, reverted: {}",
                key,
                reverted.join(", ")
            );
            return Ok(HandlerOutcome::Partial { reverted });
        };
        if self.family.has_extension && snapshot.extension.is_none() {
            tracing::debug!("Asset ({}) not written, reverted: extension", key);
            return Ok(HandlerOutcome::Partial { reverted });
        }

        let (mut asset, created) = load_or_create::<Asset>(store, &key.asset()).await?;
        asset.asset_id = asset_id;
        asset.family = self.family.name.to_string();
        asset.terms = terms;
        asset.state = state;
        asset.schedule = schedule;
        asset.ownership = ownership;
        asset.admins = admins;
        asset.engine = engine;
        asset.actor = actor;
        asset.registry = event.contract_address;
        asset.extension = snapshot.extension;
        if created {
            asset.created_on = event.block_timestamp;
        }
        save(store, &asset).await?;

        Ok(HandlerOutcome::Applied)
    }
}

impl EventHandler for RegisteredAssetHandler {
    fn triggers(&self) -> Vec<EventTrigger> {
        vec![EventTrigger::new(&self.source, "RegisteredAsset(bytes32)")]
    }
}

pub fn register_handlers(
    registry: &mut TransformationRegistry,
    source: &str,
    family: &'static FamilySchema,
) {
    registry.register_event_handler(RegisteredAssetHandler::new(source, family));
}
