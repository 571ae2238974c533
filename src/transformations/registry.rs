//! Handler registration system.
//!
//! The registry maps `(source, event name)` pairs to their handlers. It is
//! built per chain from the configured contracts.

use std::collections::HashMap;
use std::sync::Arc;

use super::traits::EventHandler;
use crate::types::config::ChainConfig;

/// Registry of all transformation handlers, built at startup.
pub struct TransformationRegistry {
    /// Event handlers indexed by (source, event_name), in registration order
    event_handlers: HashMap<(String, String), Vec<Arc<dyn EventHandler>>>,
    handler_count: usize,
}

impl TransformationRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            event_handlers: HashMap::new(),
            handler_count: 0,
        }
    }

    /// Register an event handler.
    ///
    /// The handler will be invoked for all events matching its triggers.
    pub fn register_event_handler<H: EventHandler + 'static>(&mut self, handler: H) {
        let handler = Arc::new(handler);
        let triggers = handler.triggers();

        for trigger in triggers {
            let key = (trigger.source.clone(), extract_event_name(&trigger.event_signature));
            self.event_handlers
                .entry(key)
                .or_default()
                .push(handler.clone());
        }

        self.handler_count += 1;
    }

    /// Get handlers for a specific event.
    pub fn handlers_for_event(&self, source: &str, event_name: &str) -> &[Arc<dyn EventHandler>] {
        self.event_handlers
            .get(&(source.to_string(), event_name.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Get all registered event triggers.
    pub fn all_event_triggers(&self) -> Vec<(String, String)> {
        self.event_handlers.keys().cloned().collect()
    }

    /// Check if any handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handler_count == 0
    }

    /// Get count of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handler_count
    }
}

impl Default for TransformationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract event name from signature.
/// e.g., "RegisteredAsset(bytes32)" -> "RegisteredAsset"
fn extract_event_name(signature: &str) -> String {
    signature
        .split('(')
        .next()
        .unwrap_or(signature)
        .to_string()
}

/// Build the transformation registry for one chain.
///
/// Every configured contract registers the handlers for its kind.
pub fn build_registry(chain: &ChainConfig) -> TransformationRegistry {
    let mut registry = TransformationRegistry::new();

    for (source, contract) in &chain.contracts {
        super::event::register_handlers(&mut registry, source, contract);
    }

    tracing::info!(
        "Built transformation registry for {} with {} handlers ({} event triggers)",
        chain.name,
        registry.handler_count(),
        registry.all_event_triggers().len()
    );

    registry
}
