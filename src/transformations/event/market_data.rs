//! Provider changes on the data and market object registries.

use async_trait::async_trait;

use crate::store::{load_or_create, save};
use crate::transformations::context::{DecodedEvent, TransformationContext};
use crate::transformations::error::TransformationError;
use crate::transformations::registry::TransformationRegistry;
use crate::transformations::traits::{
    EventHandler, EventTrigger, HandlerOutcome, TransformationHandler,
};
use crate::transformations::util::format_bytes32;
use crate::types::entities::{DataSet, MarketObject};

pub struct UpdatedDataProviderHandler {
    source: String,
}

impl UpdatedDataProviderHandler {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
        }
    }
}

#[async_trait]
impl TransformationHandler for UpdatedDataProviderHandler {
    fn name(&self) -> &'static str {
        "UpdatedDataProviderHandler"
    }

    async fn handle(
        &self,
        ctx: &TransformationContext<'_>,
        event: &DecodedEvent,
    ) -> Result<HandlerOutcome, TransformationError> {
        let id = format_bytes32(&event.bytes32("setId")?);
        tracing::debug!("Process event (UpdatedDataProvider) for data set ({})", id);

        let (mut data_set, _) = load_or_create::<DataSet>(ctx.store, &id).await?;
        data_set.provider = event.address("provider")?;
        save(ctx.store, &data_set).await?;

        Ok(HandlerOutcome::Applied)
    }
}

impl EventHandler for UpdatedDataProviderHandler {
    fn triggers(&self) -> Vec<EventTrigger> {
        vec![EventTrigger::new(
            &self.source,
            "UpdatedDataProvider(bytes32,address)",
        )]
    }
}

pub struct UpdatedMarketObjectProviderHandler {
    source: String,
}

impl UpdatedMarketObjectProviderHandler {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
        }
    }
}

#[async_trait]
impl TransformationHandler for UpdatedMarketObjectProviderHandler {
    fn name(&self) -> &'static str {
        "UpdatedMarketObjectProviderHandler"
    }

    async fn handle(
        &self,
        ctx: &TransformationContext<'_>,
        event: &DecodedEvent,
    ) -> Result<HandlerOutcome, TransformationError> {
        let id = format_bytes32(&event.bytes32("marketObjectId")?);
        tracing::debug!(
            "Process event (UpdatedMarketObjectProvider) for market object ({})",
            id
        );

        let (mut market_object, _) = load_or_create::<MarketObject>(ctx.store, &id).await?;
        market_object.provider = event.address("provider")?;
        save(ctx.store, &market_object).await?;

        Ok(HandlerOutcome::Applied)
    }
}

impl EventHandler for UpdatedMarketObjectProviderHandler {
    fn triggers(&self) -> Vec<EventTrigger> {
        vec![EventTrigger::new(
            &self.source,
            "UpdatedMarketObjectProvider(bytes32,address)",
        )]
    }
}

pub fn register_data_registry_handlers(registry: &mut TransformationRegistry, source: &str) {
    registry.register_event_handler(UpdatedDataProviderHandler::new(source));
}

pub fn register_market_object_handlers(registry: &mut TransformationRegistry, source: &str) {
    registry.register_event_handler(UpdatedMarketObjectProviderHandler::new(source));
}
