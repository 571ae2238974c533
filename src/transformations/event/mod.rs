//! Event handlers for transformation.
//!
//! Each configured contract registers the handlers for its kind in
//! [`register_handlers`]. Handlers for the same asset may run in any order,
//! so each one owns a fixed set of fields and never writes anything else:
//!
//! | Handler | Writes |
//! |---|---|
//! | `RegisteredAsset` | Terms (+ components), State, Ownership, Schedule, Admins (create only), Asset |
//! | `ProgressedAsset` | State, Schedule pointers |
//! | `UpdatedBeneficiary` | Ownership beneficiaries |
//! | `UpdatedObligor` | Ownership obligors |
//! | `UpdatedState` / `UpdatedFinalizedState` | State |
//! | `UpdatedTerms` | Terms (+ components) |
//! | `GrantedAccess` / `SetRootAccess` | Admins accounts (append) |
//! | `RevokedAccess` | Admins accounts (remove) |

pub mod access;
pub mod distributor;
pub mod market_data;
pub mod ownership;
pub mod progression;
pub mod registration;
pub mod settlement;
pub mod updates;

use super::registry::TransformationRegistry;
use crate::types::config::{ContractConfig, ContractKind};

/// Register the handlers for one configured contract.
pub fn register_handlers(
    registry: &mut TransformationRegistry,
    source: &str,
    contract: &ContractConfig,
) {
    match contract.kind {
        ContractKind::Registry(family) => {
            registration::register_handlers(registry, source, family);
            ownership::register_handlers(registry, source, family);
            updates::register_handlers(registry, source, family);
            access::register_handlers(registry, source);
        }
        ContractKind::Actor(family) => {
            progression::register_handlers(registry, source, family);
        }
        ContractKind::DataRegistry => {
            market_data::register_data_registry_handlers(registry, source);
        }
        ContractKind::MarketObjectRegistry => {
            market_data::register_market_object_handlers(registry, source);
        }
        ContractKind::DvpSettlement => {
            settlement::register_handlers(registry, source);
        }
        ContractKind::FdtFactory => {
            distributor::register_factory_handlers(registry, source);
        }
        ContractKind::Fdt => {
            distributor::register_token_handlers(registry, source, contract.addresses.is_empty());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::family::{COLLA, PAM};

    fn contract(kind: ContractKind) -> ContractConfig {
        ContractConfig {
            kind,
            addresses: Vec::new(),
            start_block: None,
        }
    }

    fn handler_names(registry: &TransformationRegistry, source: &str, event: &str) -> Vec<&'static str> {
        registry
            .handlers_for_event(source, event)
            .iter()
            .map(|handler| handler.name())
            .collect()
    }

    #[test]
    fn test_registry_contract_handlers() {
        let mut registry = TransformationRegistry::new();
        register_handlers(&mut registry, "PAMRegistry", &contract(ContractKind::Registry(&PAM)));

        assert_eq!(
            handler_names(&registry, "PAMRegistry", "RegisteredAsset"),
            vec!["RegisteredAssetHandler"]
        );
        assert_eq!(
            handler_names(&registry, "PAMRegistry", "GrantedAccess"),
            vec!["GrantedAccessHandler"]
        );
        assert_eq!(
            handler_names(&registry, "PAMRegistry", "RevokedAccess"),
            vec!["RevokedAccessHandler"]
        );
        assert!(handler_names(&registry, "PAMRegistry", "UpdatedState").is_empty());
        assert!(handler_names(&registry, "PAMRegistry", "ProgressedAsset").is_empty());
    }

    #[test]
    fn test_actor_contract_handlers() {
        let mut registry = TransformationRegistry::new();
        register_handlers(&mut registry, "COLLAActor", &contract(ContractKind::Actor(&COLLA)));

        assert_eq!(registry.handler_count(), 1);
        assert_eq!(
            handler_names(&registry, "COLLAActor", "ProgressedAsset"),
            vec!["ProgressedAssetHandler"]
        );
    }

    #[test]
    fn test_supplemented_contract_handlers() {
        let mut registry = TransformationRegistry::new();
        register_handlers(&mut registry, "DvP", &contract(ContractKind::DvpSettlement));
        register_handlers(&mut registry, "Factory", &contract(ContractKind::FdtFactory));
        register_handlers(&mut registry, "Token", &contract(ContractKind::Fdt));

        assert_eq!(
            handler_names(&registry, "DvP", "SettlementExpired"),
            vec!["SettlementRefreshHandler"]
        );
        assert_eq!(
            handler_names(&registry, "Factory", "DeployedDistributor"),
            vec!["DeployedDistributorHandler"]
        );
        assert_eq!(
            handler_names(&registry, "Token", "FundsWithdrawn"),
            vec!["HolderBalanceHandler"]
        );
    }
}
