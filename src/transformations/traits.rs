//! Core traits for transformation handlers.
//!
//! Handlers implement these traits to receive decoded events, re-read the
//! affected contract state and write entity records.

use async_trait::async_trait;

use super::context::{DecodedEvent, TransformationContext};
use super::error::TransformationError;

/// What a handler did with one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// All records the handler owns were written.
    Applied,
    /// Some records were written. The named sub-entities could not be read
    /// back and were left untouched.
    Partial { reverted: Vec<&'static str> },
    /// Nothing was written.
    Skipped(&'static str),
}

/// Core trait that all transformation handlers must implement.
#[async_trait]
pub trait TransformationHandler: Send + Sync + 'static {
    /// Unique name for this handler (used in logging).
    fn name(&self) -> &'static str;

    /// Process one decoded event.
    ///
    /// Reverted read-calls are never errors: they surface as
    /// [`HandlerOutcome::Partial`] or [`HandlerOutcome::Skipped`]. An `Err`
    /// means the store or the RPC transport failed and the event must be
    /// retried.
    async fn handle(
        &self,
        ctx: &TransformationContext<'_>,
        event: &DecodedEvent,
    ) -> Result<HandlerOutcome, TransformationError>;
}

/// Trigger for event-based handlers.
#[derive(Debug, Clone)]
pub struct EventTrigger {
    /// Contract name from config.
    pub source: String,
    /// Event signature (e.g., "RegisteredAsset(bytes32)").
    pub event_signature: String,
}

impl EventTrigger {
    pub fn new(source: impl Into<String>, event_signature: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            event_signature: event_signature.into(),
        }
    }
}

/// Marker trait for handlers that respond to events.
pub trait EventHandler: TransformationHandler {
    /// Event triggers this handler responds to.
    fn triggers(&self) -> Vec<EventTrigger>;
}
