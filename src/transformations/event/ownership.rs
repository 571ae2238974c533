//! `UpdatedBeneficiary` / `UpdatedObligor`: one ownership pair changed.

use async_trait::async_trait;

use crate::transformations::chain::RevertedAsNone;
use crate::transformations::context::{DecodedEvent, TransformationContext};
use crate::transformations::error::TransformationError;
use crate::transformations::registry::TransformationRegistry;
use crate::transformations::traits::{
    EventHandler, EventTrigger, HandlerOutcome, TransformationHandler,
};
use crate::transformations::util::sync::{write_ownership, OwnershipScope};
use crate::types::entities::AssetKey;
use crate::types::family::FamilySchema;

/// Re-reads ownership and overwrites only the pair named by `scope`.
pub struct OwnershipUpdateHandler {
    source: String,
    scope: OwnershipScope,
}

impl OwnershipUpdateHandler {
    pub fn beneficiaries(source: &str) -> Self {
        Self {
            source: source.to_string(),
            scope: OwnershipScope::Beneficiaries,
        }
    }

    pub fn obligors(source: &str) -> Self {
        Self {
            source: source.to_string(),
            scope: OwnershipScope::Obligors,
        }
    }

    fn event_name(&self) -> &'static str {
        match self.scope {
            OwnershipScope::Obligors => "UpdatedObligor",
            _ => "UpdatedBeneficiary",
        }
    }
}

#[async_trait]
impl TransformationHandler for OwnershipUpdateHandler {
    fn name(&self) -> &'static str {
        match self.scope {
            OwnershipScope::Obligors => "ObligorUpdateHandler",
            _ => "BeneficiaryUpdateHandler",
        }
    }

    async fn handle(
        &self,
        ctx: &TransformationContext<'_>,
        event: &DecodedEvent,
    ) -> Result<HandlerOutcome, TransformationError> {
        let asset_id = event.asset_id()?;
        let key = AssetKey::new(&asset_id);
        tracing::debug!("Process event ({}) for asset ({})", self.event_name(), key);

        let Some(snapshot) = ctx
            .reader
            .get_ownership(event.emitter(), asset_id)
            .await
            .reverted_as_none("getOwnership")?
        else {
            return Ok(HandlerOutcome::Skipped("getOwnership reverted"));
        };

        write_ownership(ctx.store, &key, &snapshot, self.scope).await?;
        Ok(HandlerOutcome::Applied)
    }
}

impl EventHandler for OwnershipUpdateHandler {
    fn triggers(&self) -> Vec<EventTrigger> {
        let signature = format!("{}(bytes32,address,address)", self.event_name());
        vec![EventTrigger::new(&self.source, signature)]
    }
}

pub fn register_handlers(
    registry: &mut TransformationRegistry,
    source: &str,
    family: &'static FamilySchema,
) {
    registry.register_event_handler(OwnershipUpdateHandler::beneficiaries(source));
    if family.updates_obligor {
        registry.register_event_handler(OwnershipUpdateHandler::obligors(source));
    }
}
