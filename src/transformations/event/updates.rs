//! Terms-changed and state-changed handlers.
//!
//! Registries name these events inconsistently. `UpdatedTerms` always means
//! terms changed; `UpdatedState` and `UpdatedFinalizedState` always mean
//! state changed. Each handler re-reads and overwrites its whole record.

use async_trait::async_trait;

use crate::transformations::chain::RevertedAsNone;
use crate::transformations::context::{DecodedEvent, TransformationContext};
use crate::transformations::error::TransformationError;
use crate::transformations::registry::TransformationRegistry;
use crate::transformations::traits::{
    EventHandler, EventTrigger, HandlerOutcome, TransformationHandler,
};
use crate::transformations::util::sync::{write_state, write_terms};
use crate::types::entities::AssetKey;
use crate::types::family::FamilySchema;

pub struct StateChangedHandler {
    source: String,
    family: &'static FamilySchema,
}

impl StateChangedHandler {
    pub fn new(source: &str, family: &'static FamilySchema) -> Self {
        Self {
            source: source.to_string(),
            family,
        }
    }
}

#[async_trait]
impl TransformationHandler for StateChangedHandler {
    fn name(&self) -> &'static str {
        "StateChangedHandler"
    }

    async fn handle(
        &self,
        ctx: &TransformationContext<'_>,
        event: &DecodedEvent,
    ) -> Result<HandlerOutcome, TransformationError> {
        let asset_id = event.asset_id()?;
        let key = AssetKey::new(&asset_id);
        tracing::debug!("Process event ({}) for asset ({})", event.event_name, key);

        let Some(state) = ctx
            .reader
            .get_state(event.emitter(), self.family, asset_id)
            .await
            .reverted_as_none("getState")?
        else {
            return Ok(HandlerOutcome::Skipped("getState reverted"));
        };

        write_state(ctx.store, self.family, &key, &state).await?;
        Ok(HandlerOutcome::Applied)
    }
}

impl EventHandler for StateChangedHandler {
    fn triggers(&self) -> Vec<EventTrigger> {
        vec![
            EventTrigger::new(&self.source, "UpdatedState(bytes32,uint256)"),
            EventTrigger::new(&self.source, "UpdatedFinalizedState(bytes32,uint256)"),
        ]
    }
}

pub struct TermsChangedHandler {
    source: String,
    family: &'static FamilySchema,
}

impl TermsChangedHandler {
    pub fn new(source: &str, family: &'static FamilySchema) -> Self {
        Self {
            source: source.to_string(),
            family,
        }
    }
}

#[async_trait]
impl TransformationHandler for TermsChangedHandler {
    fn name(&self) -> &'static str {
        "TermsChangedHandler"
    }

    async fn handle(
        &self,
        ctx: &TransformationContext<'_>,
        event: &DecodedEvent,
    ) -> Result<HandlerOutcome, TransformationError> {
        let asset_id = event.asset_id()?;
        let key = AssetKey::new(&asset_id);
        tracing::debug!("Process event (UpdatedTerms) for asset ({})", key);

        let Some(terms) = ctx
            .reader
            .get_terms(event.emitter(), self.family, asset_id)
            .await
            .reverted_as_none("getTerms")?
        else {
            return Ok(HandlerOutcome::Skipped("getTerms reverted"));
        };

        write_terms(ctx.store, self.family, &key, &terms).await?;
        Ok(HandlerOutcome::Applied)
    }
}

impl EventHandler for TermsChangedHandler {
    fn triggers(&self) -> Vec<EventTrigger> {
        vec![EventTrigger::new(&self.source, "UpdatedTerms(bytes32)")]
    }
}

pub fn register_handlers(
    registry: &mut TransformationRegistry,
    source: &str,
    family: &'static FamilySchema,
) {
    if family.updates_state {
        registry.register_event_handler(StateChangedHandler::new(source, family));
    }
    if family.updates_terms {
        registry.register_event_handler(TermsChangedHandler::new(source, family));
    }
}
