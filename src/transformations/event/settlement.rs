//! DvP settlement lifecycle.
//!
//! Initialization carries the full settlement in the event. Execution and
//! expiry only carry the id, so the record is re-read from the contract.

use alloy::primitives::U256;
use async_trait::async_trait;

use crate::store::{load_or_create, save};
use crate::transformations::chain::{RevertedAsNone, SettlementSnapshot};
use crate::transformations::context::{DecodedEvent, TransformationContext};
use crate::transformations::error::TransformationError;
use crate::transformations::registry::TransformationRegistry;
use crate::transformations::traits::{
    EventHandler, EventTrigger, HandlerOutcome, TransformationHandler,
};
use crate::types::entities::Settlement;

const SETTLEMENT_TUPLE: &str =
    "(address,address,uint256,address,address,address,uint256,uint256,uint8)";

fn apply(settlement: &mut Settlement, settlement_id: U256, snapshot: SettlementSnapshot) {
    settlement.settlement_id = settlement_id;
    settlement.creator = snapshot.creator;
    settlement.creator_token = snapshot.creator_token;
    settlement.creator_amount = snapshot.creator_amount;
    settlement.creator_beneficiary = snapshot.creator_beneficiary;
    settlement.counterparty = snapshot.counterparty;
    settlement.counterparty_token = snapshot.counterparty_token;
    settlement.counterparty_amount = snapshot.counterparty_amount;
    settlement.expiration_date = snapshot.expiration_date;
    settlement.status = snapshot.status;
}

fn snapshot_from_params(event: &DecodedEvent) -> Result<SettlementSnapshot, TransformationError> {
    Ok(SettlementSnapshot {
        creator: event.address("settlement.creator")?,
        creator_token: event.address("settlement.creatorToken")?,
        creator_amount: event.uint256("settlement.creatorAmount")?,
        creator_beneficiary: event.address("settlement.creatorBeneficiary")?,
        counterparty: event.address("settlement.counterparty")?,
        counterparty_token: event.address("settlement.counterpartyToken")?,
        counterparty_amount: event.uint256("settlement.counterpartyAmount")?,
        expiration_date: event.uint256("settlement.expirationDate")?,
        status: event.uint8("settlement.status")?,
    })
}

pub struct SettlementInitializedHandler {
    source: String,
}

impl SettlementInitializedHandler {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
        }
    }
}

#[async_trait]
impl TransformationHandler for SettlementInitializedHandler {
    fn name(&self) -> &'static str {
        "SettlementInitializedHandler"
    }

    async fn handle(
        &self,
        ctx: &TransformationContext<'_>,
        event: &DecodedEvent,
    ) -> Result<HandlerOutcome, TransformationError> {
        let settlement_id = event.uint256("settlementId")?;
        tracing::debug!(
            "Process event (SettlementInitialized) for settlementId ({})",
            settlement_id
        );

        let snapshot = snapshot_from_params(event)?;
        let (mut settlement, _) =
            load_or_create::<Settlement>(ctx.store, &Settlement::id_for(settlement_id)).await?;
        apply(&mut settlement, settlement_id, snapshot);
        save(ctx.store, &settlement).await?;

        Ok(HandlerOutcome::Applied)
    }
}

impl EventHandler for SettlementInitializedHandler {
    fn triggers(&self) -> Vec<EventTrigger> {
        vec![EventTrigger::new(
            &self.source,
            format!("SettlementInitialized(uint256,{})", SETTLEMENT_TUPLE),
        )]
    }
}

/// `SettlementExecuted` and `SettlementExpired`.
pub struct SettlementRefreshHandler {
    source: String,
}

impl SettlementRefreshHandler {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
        }
    }
}

#[async_trait]
impl TransformationHandler for SettlementRefreshHandler {
    fn name(&self) -> &'static str {
        "SettlementRefreshHandler"
    }

    async fn handle(
        &self,
        ctx: &TransformationContext<'_>,
        event: &DecodedEvent,
    ) -> Result<HandlerOutcome, TransformationError> {
        let settlement_id = event.uint256("settlementId")?;
        tracing::debug!(
            "Process event ({}) for settlementId ({})",
            event.event_name,
            settlement_id
        );

        let Some(snapshot) = ctx
            .reader
            .settlements(event.emitter(), settlement_id)
            .await
            .reverted_as_none("settlements")?
        else {
            return Ok(HandlerOutcome::Skipped("settlements reverted"));
        };

        let (mut settlement, _) =
            load_or_create::<Settlement>(ctx.store, &Settlement::id_for(settlement_id)).await?;
        apply(&mut settlement, settlement_id, snapshot);
        save(ctx.store, &settlement).await?;

        Ok(HandlerOutcome::Applied)
    }
}

impl EventHandler for SettlementRefreshHandler {
    fn triggers(&self) -> Vec<EventTrigger> {
        vec![
            EventTrigger::new(&self.source, "SettlementExecuted(uint256,address)"),
            EventTrigger::new(&self.source, "SettlementExpired(uint256)"),
        ]
    }
}

pub fn register_handlers(registry: &mut TransformationRegistry, source: &str) {
    registry.register_event_handler(SettlementInitializedHandler::new(source));
    registry.register_event_handler(SettlementRefreshHandler::new(source));
}
