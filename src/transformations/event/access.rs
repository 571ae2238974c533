//! Admin grants and revokes.
//!
//! Only grants of root access (method signature `0x00000000`) touch
//! [`Admins`]; access scoped to a single method is not tracked.

use alloy::primitives::FixedBytes;
use async_trait::async_trait;

use crate::store::{load, load_or_create, save};
use crate::transformations::context::{DecodedEvent, TransformationContext};
use crate::transformations::error::TransformationError;
use crate::transformations::registry::TransformationRegistry;
use crate::transformations::traits::{
    EventHandler, EventTrigger, HandlerOutcome, TransformationHandler,
};
use crate::types::entities::{Admins, AssetKey};

/// Method signature standing for access to every method.
pub const ROOT_ACCESS: FixedBytes<4> = FixedBytes::ZERO;

fn is_root(event: &DecodedEvent) -> Result<bool, TransformationError> {
    // SetRootAccess carries no signature.
    if event.try_get("methodSignature").is_none() && event.event_name == "SetRootAccess" {
        return Ok(true);
    }
    Ok(event.bytes4("methodSignature")? == ROOT_ACCESS)
}

pub struct GrantedAccessHandler {
    source: String,
}

impl GrantedAccessHandler {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
        }
    }
}

#[async_trait]
impl TransformationHandler for GrantedAccessHandler {
    fn name(&self) -> &'static str {
        "GrantedAccessHandler"
    }

    async fn handle(
        &self,
        ctx: &TransformationContext<'_>,
        event: &DecodedEvent,
    ) -> Result<HandlerOutcome, TransformationError> {
        let key = AssetKey::new(&event.asset_id()?);
        tracing::debug!("Process event ({}) for asset ({})", event.event_name, key);

        if !is_root(event)? {
            return Ok(HandlerOutcome::Skipped("not root access"));
        }
        let account = event.address("account")?;

        let (mut admins, _) = load_or_create::<Admins>(ctx.store, &key.admins()).await?;
        admins.grant(account);
        save(ctx.store, &admins).await?;

        Ok(HandlerOutcome::Applied)
    }
}

impl EventHandler for GrantedAccessHandler {
    fn triggers(&self) -> Vec<EventTrigger> {
        vec![
            EventTrigger::new(&self.source, "GrantedAccess(bytes32,address,bytes4)"),
            EventTrigger::new(&self.source, "SetRootAccess(bytes32,address)"),
        ]
    }
}

pub struct RevokedAccessHandler {
    source: String,
}

impl RevokedAccessHandler {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
        }
    }
}

#[async_trait]
impl TransformationHandler for RevokedAccessHandler {
    fn name(&self) -> &'static str {
        "RevokedAccessHandler"
    }

    async fn handle(
        &self,
        ctx: &TransformationContext<'_>,
        event: &DecodedEvent,
    ) -> Result<HandlerOutcome, TransformationError> {
        let key = AssetKey::new(&event.asset_id()?);
        tracing::debug!("Process event (RevokedAccess) for asset ({})", key);

        if !is_root(event)? {
            return Ok(HandlerOutcome::Skipped("not root access"));
        }
        let account = event.address("account")?;

        let Some(mut admins) = load::<Admins>(ctx.store, &key.admins()).await? else {
            return Ok(HandlerOutcome::Skipped("no admins to revoke from"));
        };
        admins.revoke(account);
        save(ctx.store, &admins).await?;

        Ok(HandlerOutcome::Applied)
    }
}

impl EventHandler for RevokedAccessHandler {
    fn triggers(&self) -> Vec<EventTrigger> {
        vec![EventTrigger::new(
            &self.source,
            "RevokedAccess(bytes32,address,bytes4)",
        )]
    }
}

pub fn register_handlers(registry: &mut TransformationRegistry, source: &str) {
    registry.register_event_handler(GrantedAccessHandler::new(source));
    registry.register_event_handler(RevokedAccessHandler::new(source));
}
