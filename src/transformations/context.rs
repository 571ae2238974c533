//! Transformation context and decoded event types.
//!
//! The TransformationContext gives handlers what they need beyond the event
//! itself: chain info, the entity store, the chain reader and the revert
//! policy.

use std::collections::HashMap;

use alloy::primitives::{Address, FixedBytes, B256, I256, U256};
use serde::{Deserialize, Serialize};

use super::chain::{CallTarget, ChainReader};
use super::error::TransformationError;
use crate::store::EntityStore;
use crate::types::config::RevertPolicy;
use crate::types::entities::AssetId;

/// A decoded event parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DecodedValue {
    Address(Address),
    Bytes32(B256),
    Bytes4(FixedBytes<4>),
    Uint256(U256),
    Int256(I256),
    Bool(bool),
    String(String),
}

impl DecodedValue {
    /// Try to get as an address.
    pub fn as_address(&self) -> Option<Address> {
        match self {
            DecodedValue::Address(a) => Some(*a),
            _ => None,
        }
    }

    /// Try to get as bytes32.
    pub fn as_bytes32(&self) -> Option<B256> {
        match self {
            DecodedValue::Bytes32(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as bytes4 (function selectors).
    pub fn as_bytes4(&self) -> Option<FixedBytes<4>> {
        match self {
            DecodedValue::Bytes4(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as U256.
    pub fn as_uint256(&self) -> Option<U256> {
        match self {
            DecodedValue::Uint256(v) => Some(*v),
            DecodedValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Try to get as u8.
    pub fn as_u8(&self) -> Option<u8> {
        match self {
            DecodedValue::Uint256(v) => v.try_into().ok(),
            _ => None,
        }
    }
}

/// A decoded event ready for transformation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedEvent {
    pub block_number: u64,
    pub block_timestamp: u64,
    #[serde(default)]
    pub transaction_hash: B256,
    pub log_index: u32,
    pub contract_address: Address,
    /// Contract name from config
    pub source_name: String,
    /// Event name (e.g., "RegisteredAsset")
    pub event_name: String,
    /// Decoded parameter values keyed by field name.
    /// Uses flattened field names like "settlement.creator" for nested tuples.
    #[serde(default)]
    pub params: HashMap<String, DecodedValue>,
}

impl DecodedEvent {
    /// Get a parameter by name, returning an error if missing.
    pub fn get(&self, name: &str) -> Result<&DecodedValue, TransformationError> {
        self.params
            .get(name)
            .ok_or_else(|| TransformationError::MissingField(name.to_string()))
    }

    /// Try to get a parameter by name.
    pub fn try_get(&self, name: &str) -> Option<&DecodedValue> {
        self.params.get(name)
    }

    pub fn address(&self, name: &str) -> Result<Address, TransformationError> {
        self.get(name)?
            .as_address()
            .ok_or_else(|| type_error(name, "address"))
    }

    pub fn bytes32(&self, name: &str) -> Result<B256, TransformationError> {
        self.get(name)?
            .as_bytes32()
            .ok_or_else(|| type_error(name, "bytes32"))
    }

    pub fn bytes4(&self, name: &str) -> Result<FixedBytes<4>, TransformationError> {
        self.get(name)?
            .as_bytes4()
            .ok_or_else(|| type_error(name, "bytes4"))
    }

    pub fn uint256(&self, name: &str) -> Result<U256, TransformationError> {
        self.get(name)?
            .as_uint256()
            .ok_or_else(|| type_error(name, "uint256"))
    }

    pub fn uint8(&self, name: &str) -> Result<u8, TransformationError> {
        self.get(name)?
            .as_u8()
            .ok_or_else(|| type_error(name, "uint8"))
    }

    /// The `assetId` parameter shared by all registry and actor events.
    pub fn asset_id(&self) -> Result<AssetId, TransformationError> {
        self.bytes32("assetId")
    }

    /// Read-call target at the emitting contract and this event's block.
    pub fn emitter(&self) -> CallTarget {
        CallTarget::new(self.contract_address, self.block_number)
    }
}

fn type_error(name: &str, expected: &str) -> TransformationError {
    TransformationError::TypeConversion(format!("parameter '{}' is not {}", name, expected))
}

/// Context provided to transformation handlers.
pub struct TransformationContext<'a> {
    pub chain_name: &'a str,
    pub chain_id: u64,
    pub policy: RevertPolicy,
    pub store: &'a dyn EntityStore,
    pub reader: &'a dyn ChainReader,
}
