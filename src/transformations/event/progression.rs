//! `ProgressedAsset`: an actor processed a scheduled lifecycle event.
//!
//! The actor does not hold the asset's records. Resolve its registry first,
//! then re-read state and schedule pointers from there.

use async_trait::async_trait;

use crate::transformations::chain::{CallTarget, RevertedAsNone};
use crate::transformations::context::{DecodedEvent, TransformationContext};
use crate::transformations::error::TransformationError;
use crate::transformations::registry::TransformationRegistry;
use crate::transformations::traits::{
    EventHandler, EventTrigger, HandlerOutcome, TransformationHandler,
};
use crate::transformations::util::sync::{fetch_schedule_pointers, write_schedule, write_state};
use crate::types::config::RevertPolicy;
use crate::types::entities::AssetKey;
use crate::types::family::FamilySchema;

pub struct ProgressedAssetHandler {
    source: String,
    family: &'static FamilySchema,
}

impl ProgressedAssetHandler {
    pub fn new(source: &str, family: &'static FamilySchema) -> Self {
        Self {
            source: source.to_string(),
            family,
        }
    }
}

#[async_trait]
impl TransformationHandler for ProgressedAssetHandler {
    fn name(&self) -> &'static str {
        "ProgressedAssetHandler"
    }

    async fn handle(
        &self,
        ctx: &TransformationContext<'_>,
        event: &DecodedEvent,
    ) -> Result<HandlerOutcome, TransformationError> {
        let asset_id = event.asset_id()?;
        let key = AssetKey::new(&asset_id);
        tracing::debug!("Process event (ProgressedAsset) for asset ({})", key);

        let Some(registry) = ctx
            .reader
            .asset_registry(event.emitter())
            .await
            .reverted_as_none("assetRegistry")?
        else {
            return Ok(HandlerOutcome::Skipped("actor has no registry"));
        };
        let target = CallTarget::new(registry, event.block_number);

        let state = ctx
            .reader
            .get_state(target, self.family, asset_id)
            .await
            .reverted_as_none("getState")?;
        let pointers = fetch_schedule_pointers(ctx.reader, target, asset_id).await?;

        let mut reverted = Vec::new();
        if state.is_none() {
            reverted.push("state");
        }
        if pointers.is_none() {
            reverted.push("schedule");
        }

        if reverted.len() == 2 {
            return Ok(HandlerOutcome::Skipped("state and schedule reverted"));
        }
        if ctx.policy == RevertPolicy::Strict && !reverted.is_empty() {
            tracing::debug!(
                "Skipping progression of asset ({}), reverted: {}",
                key,
                reverted.join(", ")
            );
            return Ok(HandlerOutcome::Skipped("registry read reverted"));
        }

        if let Some(state) = &state {
            write_state(ctx.store, self.family, &key, state).await?;
        }
        if let Some(pointers) = &pointers {
            write_schedule(ctx.store, &key, None, pointers).await?;
        }

        if reverted.is_empty() {
            Ok(HandlerOutcome::Applied)
        } else {
            Ok(HandlerOutcome::Partial { reverted })
        }
    }
}

impl EventHandler for ProgressedAssetHandler {
    fn triggers(&self) -> Vec<EventTrigger> {
        vec![EventTrigger::new(
            &self.source,
            "ProgressedAsset(bytes32,uint8,uint256,int256)",
        )]
    }
}

pub fn register_handlers(
    registry: &mut TransformationRegistry,
    source: &str,
    family: &'static FamilySchema,
) {
    registry.register_event_handler(ProgressedAssetHandler::new(source, family));
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{B256, U256};

    use super::*;
    use crate::store::{load, MemoryEntityStore};
    use crate::transformations::event::registration::RegisteredAssetHandler;
    use crate::transformations::testing::{
        asset_event, context, MockAsset, MockChainReader, ACTOR, REGISTRY,
    };
    use crate::types::entities::{FieldValue, Schedule, State};
    use crate::types::family::PAM;

    fn asset_id() -> B256 {
        B256::repeat_byte(0xaa)
    }

    fn progressed(block: u64) -> DecodedEvent {
        asset_event("PAMActor", "ProgressedAsset", ACTOR, block, asset_id())
    }

    /// Register the asset, then move the chain on to `statusDate = 200`
    /// and `nextScheduleIndex = 1`.
    async fn registered_then_progressed(store: &MemoryEntityStore, reader: &MockChainReader) {
        reader.set_actor(ACTOR, REGISTRY);
        reader.set_asset(asset_id(), MockAsset::sample(&PAM));
        RegisteredAssetHandler::new("PAMRegistry", &PAM)
            .handle(
                &context(store, reader, RevertPolicy::Partial),
                &asset_event("PAMRegistry", "RegisteredAsset", REGISTRY, 10, asset_id()),
            )
            .await
            .unwrap();

        let mut moved = MockAsset::sample(&PAM)
            .with_state_field("statusDate", FieldValue::Uint(U256::from(200)));
        moved.pointers.next_schedule_index = U256::from(1);
        reader.set_asset(asset_id(), moved);
    }

    async fn status_date(store: &MemoryEntityStore) -> FieldValue {
        load::<State>(store, &AssetKey::new(&asset_id()).state())
            .await
            .unwrap()
            .unwrap()
            .fields["statusDate"]
            .clone()
    }

    async fn schedule(store: &MemoryEntityStore) -> Schedule {
        load::<Schedule>(store, &AssetKey::new(&asset_id()).schedule())
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_progression_updates_state_and_pointers() {
        let store = MemoryEntityStore::new();
        let reader = MockChainReader::new();
        registered_then_progressed(&store, &reader).await;

        let outcome = ProgressedAssetHandler::new("PAMActor", &PAM)
            .handle(&context(&store, &reader, RevertPolicy::Partial), &progressed(20))
            .await
            .unwrap();
        assert_eq!(outcome, HandlerOutcome::Applied);
        assert_eq!(status_date(&store).await, FieldValue::Uint(U256::from(200)));

        let schedule = schedule(&store).await;
        assert_eq!(schedule.next_schedule_index, U256::from(1));
        // The event list itself is owned by registration.
        assert_eq!(schedule.events.len(), 2);
    }

    #[tokio::test]
    async fn test_state_revert_keeps_prior_state_but_updates_schedule() {
        let store = MemoryEntityStore::new();
        let reader = MockChainReader::new();
        registered_then_progressed(&store, &reader).await;
        reader.revert("getState");

        let outcome = ProgressedAssetHandler::new("PAMActor", &PAM)
            .handle(&context(&store, &reader, RevertPolicy::Partial), &progressed(20))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            HandlerOutcome::Partial {
                reverted: vec!["state"]
            }
        );
        assert_eq!(status_date(&store).await, FieldValue::Uint(U256::from(100)));
        assert_eq!(schedule(&store).await.next_schedule_index, U256::from(1));
    }

    #[tokio::test]
    async fn test_strict_policy_writes_nothing_on_revert() {
        let store = MemoryEntityStore::new();
        let reader = MockChainReader::new();
        registered_then_progressed(&store, &reader).await;
        reader.revert("getState");
        let before = store.snapshot().unwrap();

        let outcome = ProgressedAssetHandler::new("PAMActor", &PAM)
            .handle(&context(&store, &reader, RevertPolicy::Strict), &progressed(20))
            .await
            .unwrap();
        assert!(matches!(outcome, HandlerOutcome::Skipped(_)));
        assert_eq!(store.snapshot().unwrap(), before);
    }

    #[tokio::test]
    async fn test_unknown_actor_is_skipped() {
        let store = MemoryEntityStore::new();
        let reader = MockChainReader::new();
        reader.set_asset(asset_id(), MockAsset::sample(&PAM));

        let outcome = ProgressedAssetHandler::new("PAMActor", &PAM)
            .handle(&context(&store, &reader, RevertPolicy::Partial), &progressed(20))
            .await
            .unwrap();
        assert!(matches!(outcome, HandlerOutcome::Skipped(_)));
        assert!(store.is_empty().unwrap());
        assert_eq!(reader.calls(), vec!["assetRegistry"]);
    }

    #[tokio::test]
    async fn test_matured_asset_is_skipped() {
        let store = MemoryEntityStore::new();
        let reader = MockChainReader::new();
        reader.set_actor(ACTOR, REGISTRY);

        let outcome = ProgressedAssetHandler::new("PAMActor", &PAM)
            .handle(&context(&store, &reader, RevertPolicy::Partial), &progressed(20))
            .await
            .unwrap();
        assert!(matches!(outcome, HandlerOutcome::Skipped(_)));
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_progression_before_registration_creates_records() {
        let store = MemoryEntityStore::new();
        let reader = MockChainReader::new();
        reader.set_actor(ACTOR, REGISTRY);
        reader.set_asset(asset_id(), MockAsset::sample(&PAM));

        ProgressedAssetHandler::new("PAMActor", &PAM)
            .handle(&context(&store, &reader, RevertPolicy::Partial), &progressed(5))
            .await
            .unwrap();
        assert_eq!(status_date(&store).await, FieldValue::Uint(U256::from(100)));
        assert!(schedule(&store).await.events.is_empty());
    }
}
