use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::types::config::contract::{
    load_contracts_from_path, resolve_contract_config, ContractConfig, ContractsOrPath,
};

#[derive(Debug, Deserialize)]
pub struct ChainConfigRaw {
    pub name: String,
    pub chain_id: u64,
    pub rpc_url_env_var: String,
    /// JSON-lines file of decoded events, relative to the config file
    pub events_path: String,
    pub contracts: ContractsOrPath,
    #[serde(default)]
    pub rpc_requests_per_second: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub name: String,
    pub chain_id: u64,
    pub rpc_url_env_var: String,
    pub events_path: PathBuf,
    /// Contracts keyed by source name, the name events are tagged with
    pub contracts: BTreeMap<String, ContractConfig>,
    pub rpc_requests_per_second: Option<u32>,
}

pub fn resolve_chain_config(
    raw_config: ChainConfigRaw,
    base_dir: &Path,
) -> anyhow::Result<ChainConfig> {
    let raw_contracts = match raw_config.contracts {
        ContractsOrPath::Inline(contracts) => contracts,
        ContractsOrPath::Path(p) => load_contracts_from_path(base_dir, &p)
            .with_context(|| format!("Failed to load contracts from path {}", p))?,
    };

    let contracts = raw_contracts
        .into_iter()
        .map(|(name, raw)| {
            let contract = resolve_contract_config(raw).with_context(|| {
                format!("Invalid contract '{}' on chain {}", name, raw_config.name)
            })?;
            Ok((name, contract))
        })
        .collect::<anyhow::Result<BTreeMap<_, _>>>()?;

    i64::try_from(raw_config.chain_id).with_context(|| {
        format!(
            "chain_id {} of chain {} does not fit in a BIGINT",
            raw_config.chain_id, raw_config.name
        )
    })?;

    Ok(ChainConfig {
        name: raw_config.name,
        chain_id: raw_config.chain_id,
        rpc_url_env_var: raw_config.rpc_url_env_var,
        events_path: base_dir.join(raw_config.events_path),
        contracts,
        rpc_requests_per_second: raw_config.rpc_requests_per_second,
    })
}
