//! Transformation engine that routes decoded events to their handlers.
//!
//! Events are processed strictly one at a time, in delivery order. Progress
//! is a single cursor per chain holding the highest `(block, log)` processed
//! so far, saved in the entity store after every event. Only the cursor found
//! at startup filters events, so a registration delivered ahead of an earlier
//! grant in the same run does not drop the grant.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::mpsc::Receiver;

use super::chain::ChainReader;
use super::context::{DecodedEvent, TransformationContext};
use super::error::TransformationError;
use super::registry::TransformationRegistry;
use super::traits::HandlerOutcome;
use crate::store::{load, save, Entity, EntityStore};
use crate::types::config::{ChainConfig, ContractConfig, RevertPolicy};
use crate::types::entities::IndexerCursor;

/// Counters reported when a run finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: u64,
    /// Already covered by the cursor.
    pub skipped: u64,
    pub applied: u64,
    pub partial: u64,
    pub ignored: u64,
}

impl RunSummary {
    fn record(&mut self, outcomes: &[HandlerOutcome]) {
        self.processed += 1;
        for outcome in outcomes {
            match outcome {
                HandlerOutcome::Applied => self.applied += 1,
                HandlerOutcome::Partial { .. } => self.partial += 1,
                HandlerOutcome::Skipped(_) => self.ignored += 1,
            }
        }
    }
}

pub struct TransformationEngine {
    registry: Arc<TransformationRegistry>,
    store: Arc<dyn EntityStore>,
    reader: Arc<dyn ChainReader>,
    chain_name: String,
    chain_id: u64,
    contracts: BTreeMap<String, ContractConfig>,
    policy: RevertPolicy,
}

impl TransformationEngine {
    pub fn new(
        registry: Arc<TransformationRegistry>,
        store: Arc<dyn EntityStore>,
        reader: Arc<dyn ChainReader>,
        chain: &ChainConfig,
        policy: RevertPolicy,
    ) -> Self {
        Self {
            registry,
            store,
            reader,
            chain_name: chain.name.clone(),
            chain_id: chain.chain_id,
            contracts: chain.contracts.clone(),
            policy,
        }
    }

    fn context(&self) -> TransformationContext<'_> {
        TransformationContext {
            chain_name: &self.chain_name,
            chain_id: self.chain_id,
            policy: self.policy,
            store: self.store.as_ref(),
            reader: self.reader.as_ref(),
        }
    }

    /// Run every handler registered for this event, in registration order.
    ///
    /// Events from unknown sources, from an address the source is not
    /// configured with, or from before the source's start block are dropped
    /// and produce no outcomes. The first handler error aborts the event.
    pub async fn process_event(
        &self,
        event: &DecodedEvent,
    ) -> Result<Vec<HandlerOutcome>, TransformationError> {
        let Some(contract) = self.contracts.get(&event.source_name) else {
            tracing::trace!("No contract configured for source {}", event.source_name);
            return Ok(Vec::new());
        };
        if !contract.accepts(event.contract_address, event.block_number) {
            tracing::debug!(
                "Dropping {}/{} from {} at block {}",
                event.source_name,
                event.event_name,
                event.contract_address,
                event.block_number
            );
            return Ok(Vec::new());
        }

        let ctx = self.context();
        let handlers = self
            .registry
            .handlers_for_event(&event.source_name, &event.event_name);
        let mut outcomes = Vec::with_capacity(handlers.len());

        for handler in handlers {
            tracing::trace!(
                "Invoking handler {} for event {}/{}",
                handler.name(),
                event.source_name,
                event.event_name
            );

            match handler.handle(&ctx, event).await {
                Ok(outcome) => {
                    if let HandlerOutcome::Skipped(reason) = &outcome {
                        tracing::debug!(
                            "Handler {} skipped {}/{} at block {}: {}",
                            handler.name(),
                            event.source_name,
                            event.event_name,
                            event.block_number,
                            reason
                        );
                    }
                    outcomes.push(outcome);
                }
                Err(e) => {
                    tracing::error!(
                        "Handler {} failed for event {}/{} at block {} (log {}): {}",
                        handler.name(),
                        event.source_name,
                        event.event_name,
                        event.block_number,
                        event.log_index,
                        e
                    );
                    return Err(e);
                }
            }
        }

        Ok(outcomes)
    }

    /// Consume events until the channel closes.
    ///
    /// Events at or before the cursor stored when the run starts are skipped.
    /// Out-of-order events within the run are processed. A handler error
    /// stops the run without recording the failed event in the cursor.
    pub async fn run(
        &self,
        mut events_rx: Receiver<DecodedEvent>,
    ) -> Result<RunSummary, TransformationError> {
        let resume_from = load::<IndexerCursor>(self.store.as_ref(), &self.chain_name).await?;
        let mut cursor = resume_from
            .clone()
            .unwrap_or_else(|| IndexerCursor::new(self.chain_name.clone()));

        match &resume_from {
            Some(c) => tracing::info!(
                "Transformation engine started for chain {}, resuming after block {} (log {})",
                self.chain_name,
                c.block_number,
                c.log_index
            ),
            None => tracing::info!(
                "Transformation engine started for chain {} with {} handlers",
                self.chain_name,
                self.registry.handler_count()
            ),
        }

        let mut summary = RunSummary::default();

        while let Some(event) = events_rx.recv().await {
            if resume_from
                .as_ref()
                .is_some_and(|c| c.covers(event.block_number, event.log_index))
            {
                summary.skipped += 1;
                continue;
            }

            let outcomes = self.process_event(&event).await?;
            summary.record(&outcomes);

            cursor.advance(event.block_number, event.log_index);
            save(self.store.as_ref(), &cursor).await?;

            if summary.processed % 1000 == 0 {
                tracing::info!(
                    "Chain {}: processed {} events, at block {}",
                    self.chain_name,
                    summary.processed,
                    event.block_number
                );
            }
        }

        tracing::info!(
            "Transformation engine completed for chain {}: {} events processed, {} skipped, \
             {} applied, {} partial, {} ignored",
            self.chain_name,
            summary.processed,
            summary.skipped,
            summary.applied,
            summary.partial,
            summary.ignored
        );
        Ok(summary)
    }
}
