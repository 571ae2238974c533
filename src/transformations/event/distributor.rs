//! Funds distribution tokens: deployment, transfers and withdrawals.
//!
//! A holder record keeps the balance and withdrawable funds read back from
//! the token at the event's block. Transfers touch both parties; mints and
//! burns involve the zero address, which is never tracked as a holder.
//!
//! A token source configured without addresses follows the factory: its
//! events only count once `DeployedDistributor` has created the token's
//! [`Distributor`]. Tokens listed by address are tracked unconditionally.

use alloy::primitives::Address;
use async_trait::async_trait;

use crate::store::{load, load_or_create, save};
use crate::transformations::chain::{CallTarget, RevertedAsNone};
use crate::transformations::context::{DecodedEvent, TransformationContext};
use crate::transformations::error::TransformationError;
use crate::transformations::registry::TransformationRegistry;
use crate::transformations::traits::{
    EventHandler, EventTrigger, HandlerOutcome, TransformationHandler,
};
use crate::transformations::util::format_address;
use crate::types::entities::{Distributor, Holder};

pub struct DeployedDistributorHandler {
    source: String,
}

impl DeployedDistributorHandler {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
        }
    }
}

#[async_trait]
impl TransformationHandler for DeployedDistributorHandler {
    fn name(&self) -> &'static str {
        "DeployedDistributorHandler"
    }

    async fn handle(
        &self,
        ctx: &TransformationContext<'_>,
        event: &DecodedEvent,
    ) -> Result<HandlerOutcome, TransformationError> {
        let address = event.address("distributor")?;
        tracing::debug!(
            "Process event (DeployedDistributor) for distributor ({})",
            format_address(&address)
        );

        let (mut distributor, created) =
            load_or_create::<Distributor>(ctx.store, &Distributor::id_for(address)).await?;
        if !created {
            return Ok(HandlerOutcome::Skipped("distributor already known"));
        }
        distributor.address = address;
        save(ctx.store, &distributor).await?;

        Ok(HandlerOutcome::Applied)
    }
}

impl EventHandler for DeployedDistributorHandler {
    fn triggers(&self) -> Vec<EventTrigger> {
        vec![EventTrigger::new(
            &self.source,
            "DeployedDistributor(address,address)",
        )]
    }
}

/// `Transfer` and `FundsWithdrawn` on a distributor token.
pub struct HolderBalanceHandler {
    source: String,
    /// Ignore tokens no factory deployment has been seen for.
    factory_only: bool,
}

impl HolderBalanceHandler {
    pub fn new(source: &str, factory_only: bool) -> Self {
        Self {
            source: source.to_string(),
            factory_only,
        }
    }

    fn affected_holders(event: &DecodedEvent) -> Result<Vec<Address>, TransformationError> {
        let mut holders = match event.event_name.as_str() {
            "Transfer" => vec![event.address("from")?, event.address("to")?],
            _ => vec![event.address("by")?],
        };
        holders.retain(|holder| !holder.is_zero());
        holders.dedup();
        Ok(holders)
    }
}

#[async_trait]
impl TransformationHandler for HolderBalanceHandler {
    fn name(&self) -> &'static str {
        "HolderBalanceHandler"
    }

    async fn handle(
        &self,
        ctx: &TransformationContext<'_>,
        event: &DecodedEvent,
    ) -> Result<HandlerOutcome, TransformationError> {
        let token = event.contract_address;
        tracing::debug!(
            "Process event ({}) for distributor ({})",
            event.event_name,
            format_address(&token)
        );

        let distributor_id = Distributor::id_for(token);
        if self.factory_only && load::<Distributor>(ctx.store, &distributor_id).await?.is_none() {
            return Ok(HandlerOutcome::Skipped("token not deployed by a tracked factory"));
        }

        let holders = Self::affected_holders(event)?;
        let target = event.emitter();

        // All reads first: a single revert leaves every record untouched.
        let mut balances = Vec::with_capacity(holders.len());
        for holder in holders {
            let Some(record) = read_holder(ctx, target, token, holder).await? else {
                return Ok(HandlerOutcome::Skipped("holder balance reverted"));
            };
            balances.push(record);
        }

        let (mut distributor, _) = load_or_create::<Distributor>(ctx.store, &distributor_id).await?;
        distributor.address = token;
        for holder in &balances {
            save(ctx.store, holder).await?;
            distributor.track_holder(&holder.id);
        }
        save(ctx.store, &distributor).await?;

        Ok(HandlerOutcome::Applied)
    }
}

async fn read_holder(
    ctx: &TransformationContext<'_>,
    target: CallTarget,
    token: Address,
    holder: Address,
) -> Result<Option<Holder>, TransformationError> {
    let Some(balance) = ctx
        .reader
        .balance_of(target, holder)
        .await
        .reverted_as_none("balanceOf")?
    else {
        return Ok(None);
    };
    let Some(withdrawable_funds) = ctx
        .reader
        .withdrawable_funds_of(target, holder)
        .await
        .reverted_as_none("withdrawableFundsOf")?
    else {
        return Ok(None);
    };

    let (mut record, _) = load_or_create::<Holder>(ctx.store, &Holder::id_for(token, holder)).await?;
    record.address = holder;
    record.balance = balance;
    record.withdrawable_funds = withdrawable_funds;
    Ok(Some(record))
}

impl EventHandler for HolderBalanceHandler {
    fn triggers(&self) -> Vec<EventTrigger> {
        vec![
            EventTrigger::new(&self.source, "Transfer(address,address,uint256)"),
            EventTrigger::new(&self.source, "FundsWithdrawn(address,uint256)"),
        ]
    }
}

pub fn register_factory_handlers(registry: &mut TransformationRegistry, source: &str) {
    registry.register_event_handler(DeployedDistributorHandler::new(source));
}

pub fn register_token_handlers(
    registry: &mut TransformationRegistry,
    source: &str,
    factory_only: bool,
) {
    registry.register_event_handler(HolderBalanceHandler::new(source, factory_only));
}

#[cfg(test)]
mod tests {
    use alloy::primitives::U256;

    use super::*;
    use crate::store::MemoryEntityStore;
    use crate::transformations::context::DecodedValue;
    use crate::transformations::testing::{context, event, MockChainReader};
    use crate::types::config::RevertPolicy;

    const TOKEN: Address = Address::repeat_byte(0xf0);
    const ALICE: Address = Address::repeat_byte(0xa1);
    const BOB: Address = Address::repeat_byte(0xb0);

    fn transfer(from: Address, to: Address, block: u64) -> DecodedEvent {
        event(
            "FDT",
            "Transfer",
            TOKEN,
            block,
            vec![
                ("from", DecodedValue::Address(from)),
                ("to", DecodedValue::Address(to)),
                ("value", DecodedValue::Uint256(U256::from(10))),
            ],
        )
    }

    async fn holder(store: &MemoryEntityStore, account: Address) -> Option<Holder> {
        load::<Holder>(store, &Holder::id_for(TOKEN, account)).await.unwrap()
    }

    async fn distributor(store: &MemoryEntityStore) -> Distributor {
        load::<Distributor>(store, &Distributor::id_for(TOKEN))
            .await
            .unwrap()
            .unwrap()
    }

    fn deployed() -> DecodedEvent {
        event(
            "FDTFactory",
            "DeployedDistributor",
            Address::repeat_byte(0xfa),
            1,
            vec![
                ("distributor", DecodedValue::Address(TOKEN)),
                ("owner", DecodedValue::Address(ALICE)),
            ],
        )
    }

    #[tokio::test]
    async fn test_deployed_distributor_is_created_once() {
        let store = MemoryEntityStore::new();
        let reader = MockChainReader::new();
        let ctx = context(&store, &reader, RevertPolicy::Partial);
        let handler = DeployedDistributorHandler::new("FDTFactory");
        let deployed = deployed();

        assert_eq!(
            handler.handle(&ctx, &deployed).await.unwrap(),
            HandlerOutcome::Applied
        );
        assert!(matches!(
            handler.handle(&ctx, &deployed).await.unwrap(),
            HandlerOutcome::Skipped(_)
        ));
        assert_eq!(distributor(&store).await.address, TOKEN);
    }

    #[tokio::test]
    async fn test_transfer_updates_both_holders() {
        let store = MemoryEntityStore::new();
        let reader = MockChainReader::new();
        reader.set_holder(TOKEN, ALICE, U256::from(90), U256::from(3));
        reader.set_holder(TOKEN, BOB, U256::from(10), U256::from(1));
        let ctx = context(&store, &reader, RevertPolicy::Partial);
        let handler = HolderBalanceHandler::new("FDT", false);

        handler.handle(&ctx, &transfer(ALICE, BOB, 5)).await.unwrap();
        handler.handle(&ctx, &transfer(ALICE, BOB, 6)).await.unwrap();

        let bob = holder(&store, BOB).await.unwrap();
        assert_eq!(bob.address, BOB);
        assert_eq!(bob.balance, U256::from(10));
        assert_eq!(bob.withdrawable_funds, U256::from(1));
        assert_eq!(holder(&store, ALICE).await.unwrap().balance, U256::from(90));

        let holders = distributor(&store).await.holders;
        assert_eq!(
            holders,
            vec![Holder::id_for(TOKEN, ALICE), Holder::id_for(TOKEN, BOB)]
        );
    }

    #[tokio::test]
    async fn test_mint_skips_zero_address() {
        let store = MemoryEntityStore::new();
        let reader = MockChainReader::new();
        reader.set_holder(TOKEN, ALICE, U256::from(100), U256::ZERO);

        HolderBalanceHandler::new("FDT", false)
            .handle(
                &context(&store, &reader, RevertPolicy::Partial),
                &transfer(Address::ZERO, ALICE, 5),
            )
            .await
            .unwrap();
        assert!(holder(&store, Address::ZERO).await.is_none());
        assert_eq!(distributor(&store).await.holders.len(), 1);
    }

    #[tokio::test]
    async fn test_reverted_balance_writes_nothing() {
        let store = MemoryEntityStore::new();
        let reader = MockChainReader::new();
        reader.revert("withdrawableFundsOf");
        let withdrawn = event(
            "FDT",
            "FundsWithdrawn",
            TOKEN,
            5,
            vec![
                ("by", DecodedValue::Address(ALICE)),
                ("fundsWithdrawn", DecodedValue::Uint256(U256::from(3))),
            ],
        );

        let outcome = HolderBalanceHandler::new("FDT", false)
            .handle(&context(&store, &reader, RevertPolicy::Partial), &withdrawn)
            .await
            .unwrap();
        assert!(matches!(outcome, HandlerOutcome::Skipped(_)));
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_factory_only_ignores_undeployed_token() {
        let store = MemoryEntityStore::new();
        let reader = MockChainReader::new();
        reader.set_holder(TOKEN, ALICE, U256::from(90), U256::ZERO);
        reader.set_holder(TOKEN, BOB, U256::from(10), U256::ZERO);
        let ctx = context(&store, &reader, RevertPolicy::Partial);
        let handler = HolderBalanceHandler::new("FDT", true);

        let outcome = handler.handle(&ctx, &transfer(ALICE, BOB, 5)).await.unwrap();
        assert!(matches!(outcome, HandlerOutcome::Skipped(_)));
        assert!(store.is_empty().unwrap());

        DeployedDistributorHandler::new("FDTFactory")
            .handle(&ctx, &deployed())
            .await
            .unwrap();
        assert_eq!(
            handler.handle(&ctx, &transfer(ALICE, BOB, 6)).await.unwrap(),
            HandlerOutcome::Applied
        );
        assert_eq!(distributor(&store).await.holders.len(), 2);
    }
}
