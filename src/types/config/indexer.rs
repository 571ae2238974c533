use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::types::config::chain::{resolve_chain_config, ChainConfig, ChainConfigRaw};

/// How a handler that needs several read-calls reacts when some revert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevertPolicy {
    /// Write every sub-entity whose calls succeeded. The root Asset is only
    /// written when all of its references resolve.
    #[default]
    Partial,
    /// Any revert aborts the handler before anything is written.
    Strict,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReconciliationConfig {
    #[serde(default)]
    pub revert_policy: RevertPolicy,
}

fn default_database_url_env_var() -> String {
    "DATABASE_URL".to_string()
}

#[derive(Debug, Deserialize)]
pub struct IndexerConfigRaw {
    pub chains: Vec<ChainConfigRaw>,
    #[serde(default = "default_database_url_env_var")]
    pub database_url_env_var: String,
    #[serde(default)]
    pub reconciliation: ReconciliationConfig,
}

#[derive(Debug)]
pub struct IndexerConfig {
    pub chains: Vec<ChainConfig>,
    pub database_url_env_var: String,
    pub reconciliation: ReconciliationConfig,
}

impl IndexerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let base_dir = path.parent().unwrap_or(Path::new("."));
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        Self::parse(&content, base_dir)
            .with_context(|| format!("Failed to load config file at {}", path.display()))
    }

    /// Parse config JSON. Relative paths inside it resolve against `base_dir`.
    pub fn parse(content: &str, base_dir: &Path) -> anyhow::Result<Self> {
        let raw_config: IndexerConfigRaw =
            serde_json::from_str(content).context("Failed to parse config")?;

        let chains = raw_config
            .chains
            .into_iter()
            .map(|chain| resolve_chain_config(chain, base_dir))
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(IndexerConfig {
            chains,
            database_url_env_var: raw_config.database_url_env_var,
            reconciliation: raw_config.reconciliation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::ContractKind;

    const CONFIG: &str = r#"{
        "chains": [{
            "name": "goerli",
            "chain_id": 5,
            "rpc_url_env_var": "RPC_URL_GOERLI",
            "events_path": "events/goerli.jsonl",
            "contracts": {
                "PAMRegistry": {
                    "kind": "registry",
                    "family": "PAM",
                    "address": "0x0000000000000000000000000000000000000001",
                    "start_block": 100
                },
                "PAMActor": {
                    "kind": "actor",
                    "family": "pam",
                    "address": ["0x0000000000000000000000000000000000000002", "0x0000000000000000000000000000000000000003"]
                },
                "DataRegistry": { "kind": "data_registry" }
            }
        }]
    }"#;

    #[test]
    fn test_parse_defaults() {
        let config = IndexerConfig::parse(CONFIG, Path::new("/etc/actus")).unwrap();
        assert_eq!(config.database_url_env_var, "DATABASE_URL");
        assert_eq!(config.reconciliation.revert_policy, RevertPolicy::Partial);

        let chain = &config.chains[0];
        assert_eq!(chain.chain_id, 5);
        assert_eq!(chain.events_path, Path::new("/etc/actus/events/goerli.jsonl"));
        assert_eq!(chain.rpc_requests_per_second, None);

        let registry = &chain.contracts["PAMRegistry"];
        assert!(matches!(registry.kind, ContractKind::Registry(f) if f.name == "PAM"));
        assert_eq!(registry.addresses.len(), 1);
        assert_eq!(registry.start_block, Some(100));

        let actor = &chain.contracts["PAMActor"];
        assert!(matches!(actor.kind, ContractKind::Actor(f) if f.name == "PAM"));
        assert_eq!(actor.addresses.len(), 2);

        assert!(chain.contracts["DataRegistry"].addresses.is_empty());
    }

    #[test]
    fn test_parse_strict_policy() {
        let content = r#"{"chains": [], "reconciliation": {"revert_policy": "strict"}}"#;
        let config = IndexerConfig::parse(content, Path::new(".")).unwrap();
        assert_eq!(config.reconciliation.revert_policy, RevertPolicy::Strict);
    }

    #[test]
    fn test_chain_id_beyond_bigint_rejected() {
        let content = CONFIG.replace("\"chain_id\": 5", "\"chain_id\": 18446744073709551615");
        let err = IndexerConfig::parse(&content, Path::new(".")).unwrap_err();
        assert!(format!("{:#}", err).contains("does not fit in a BIGINT"));
    }

    #[test]
    fn test_unknown_family_rejected() {
        let content = CONFIG.replace("\"family\": \"PAM\"", "\"family\": \"SWAPS\"");
        let err = IndexerConfig::parse(&content, Path::new(".")).unwrap_err();
        assert!(format!("{:#}", err).contains("SWAPS"));
    }

    #[test]
    fn test_missing_family_rejected() {
        let content = CONFIG.replace("\"family\": \"pam\",", "");
        assert!(IndexerConfig::parse(&content, Path::new(".")).is_err());
    }
}
