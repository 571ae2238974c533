//! Reconciliation of decoded events into entity records.
//!
//! This module provides:
//! - Handler traits and the registry that maps events to handlers
//! - The chain-reader seam handlers use to re-read contract state
//! - An engine that feeds events through the handlers in order
//!
//! # Architecture
//!
//! ```text
//! Decoded Events ──► TransformationEngine ──► Handlers ──► EntityStore
//!                          │                     │
//!                          │                     └─► ChainReader (eth_call at the event's block)
//!                          └─► IndexerCursor
//! ```
//!
//! # Example Handler
//!
//! ```ignore
//! use async_trait::async_trait;
//! use actus_indexer::transformations::{
//!     DecodedEvent, EventHandler, EventTrigger, HandlerOutcome,
//!     TransformationContext, TransformationError, TransformationHandler,
//! };
//!
//! pub struct MyHandler;
//!
//! #[async_trait]
//! impl TransformationHandler for MyHandler {
//!     fn name(&self) -> &'static str { "MyHandler" }
//!
//!     async fn handle(
//!         &self,
//!         ctx: &TransformationContext<'_>,
//!         event: &DecodedEvent,
//!     ) -> Result<HandlerOutcome, TransformationError> {
//!         // Re-read through ctx.reader, write through ctx.store
//!         Ok(HandlerOutcome::Applied)
//!     }
//! }
//!
//! impl EventHandler for MyHandler {
//!     fn triggers(&self) -> Vec<EventTrigger> {
//!         vec![EventTrigger::new("PAMRegistry", "RegisteredAsset(bytes32)")]
//!     }
//! }
//! ```

pub mod chain;
pub mod context;
pub mod engine;
pub mod error;
pub mod event;
pub mod registry;
pub mod traits;
pub mod util;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use chain::{CallError, CallTarget, ChainReader};
pub use context::{DecodedEvent, DecodedValue, TransformationContext};
pub use engine::{RunSummary, TransformationEngine};
pub use error::TransformationError;
pub use registry::{build_registry, TransformationRegistry};
pub use traits::{EventHandler, EventTrigger, HandlerOutcome, TransformationHandler};
