pub mod chain;
pub mod contract;
pub mod indexer;

pub use chain::ChainConfig;
pub use contract::{ContractConfig, ContractKind};
pub use indexer::{IndexerConfig, ReconciliationConfig, RevertPolicy};
