use std::collections::BTreeMap;
use std::path::Path;

use alloy_primitives::Address;
use anyhow::{anyhow, Context};
use serde::Deserialize;

use crate::types::family::FamilySchema;

/// What a configured contract is, as written in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractKindRaw {
    Registry,
    Actor,
    DataRegistry,
    MarketObjectRegistry,
    DvpSettlement,
    FdtFactory,
    Fdt,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractConfigRaw {
    pub kind: ContractKindRaw,
    /// Contract family, required for registries and actors
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub address: Option<AddressOrAddresses>,
    #[serde(default)]
    pub start_block: Option<u64>,
}

#[derive(Debug, Clone, Copy)]
pub enum ContractKind {
    Registry(&'static FamilySchema),
    Actor(&'static FamilySchema),
    DataRegistry,
    MarketObjectRegistry,
    DvpSettlement,
    FdtFactory,
    Fdt,
}

#[derive(Debug, Clone)]
pub struct ContractConfig {
    pub kind: ContractKind,
    /// Accepted emitter addresses. Empty accepts any.
    pub addresses: Vec<Address>,
    pub start_block: Option<u64>,
}

impl ContractConfig {
    /// Whether an event from `address` at `block_number` belongs to this contract.
    pub fn accepts(&self, address: Address, block_number: u64) -> bool {
        let address_ok = self.addresses.is_empty() || self.addresses.contains(&address);
        let block_ok = self.start_block.map_or(true, |start| block_number >= start);
        address_ok && block_ok
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AddressOrAddresses {
    Single(Address),
    Multiple(Vec<Address>),
}

impl AddressOrAddresses {
    pub fn into_vec(self) -> Vec<Address> {
        match self {
            Self::Single(address) => vec![address],
            Self::Multiple(addresses) => addresses,
        }
    }
}

pub type Contracts = BTreeMap<String, ContractConfigRaw>;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ContractsOrPath {
    Inline(Contracts),
    Path(String),
}

pub fn resolve_contract_config(raw: ContractConfigRaw) -> anyhow::Result<ContractConfig> {
    let kind = match raw.kind {
        ContractKindRaw::Registry => ContractKind::Registry(resolve_family(raw.family.as_deref())?),
        ContractKindRaw::Actor => ContractKind::Actor(resolve_family(raw.family.as_deref())?),
        ContractKindRaw::DataRegistry => ContractKind::DataRegistry,
        ContractKindRaw::MarketObjectRegistry => ContractKind::MarketObjectRegistry,
        ContractKindRaw::DvpSettlement => ContractKind::DvpSettlement,
        ContractKindRaw::FdtFactory => ContractKind::FdtFactory,
        ContractKindRaw::Fdt => ContractKind::Fdt,
    };

    Ok(ContractConfig {
        kind,
        addresses: raw.address.map(AddressOrAddresses::into_vec).unwrap_or_default(),
        start_block: raw.start_block,
    })
}

fn resolve_family(name: Option<&str>) -> anyhow::Result<&'static FamilySchema> {
    let name = name.ok_or_else(|| anyhow!("missing 'family'"))?;
    FamilySchema::by_name(name).ok_or_else(|| anyhow!("unknown contract family '{}'", name))
}

/// Load contracts from a JSON file, or from every `.json` file in a directory.
pub fn load_contracts_from_path(base_dir: &Path, path: &str) -> anyhow::Result<Contracts> {
    let full_path = base_dir.join(path);

    if full_path.is_dir() {
        load_contracts_from_dir(&full_path)
    } else {
        load_contracts_from_file(&full_path)
    }
}

fn load_contracts_from_file(path: &Path) -> anyhow::Result<Contracts> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read contracts file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse contracts file {}", path.display()))
}

fn load_contracts_from_dir(dir: &Path) -> anyhow::Result<Contracts> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map(|x| x == "json").unwrap_or(false))
        .collect();
    entries.sort();

    let mut contracts = Contracts::new();
    for path in entries {
        contracts.extend(load_contracts_from_file(&path)?);
    }
    Ok(contracts)
}
