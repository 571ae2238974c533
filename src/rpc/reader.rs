//! [`ChainReader`] over JSON-RPC `eth_call`.
//!
//! Calls are described with `name(inputs)(outputs)` signatures, encoded and
//! decoded with alloy's dynamic ABI types. Terms and state signatures are
//! derived from the family schema.

use std::collections::BTreeMap;

use alloy::dyn_abi::{DynSolType, DynSolValue};
use alloy::primitives::{keccak256, Address, Bytes, B256, I256, U256};
use alloy::rpc::types::{BlockId, TransactionInput, TransactionRequest};
use async_trait::async_trait;

use super::RpcClient;
use crate::transformations::chain::{
    CallError, CallResult, CallTarget, ChainReader, OwnershipSnapshot, SettlementSnapshot,
    StateSnapshot, TermsComponent, TermsSnapshot,
};
use crate::types::entities::{AssetId, FieldMap, FieldValue};
use crate::types::family::{ComponentKind, FamilySchema, FieldKind, FieldSpec, TermsField};

pub struct RpcChainReader {
    client: RpcClient,
}

impl RpcChainReader {
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }

    /// Execute `signature` against `target` and return the decoded outputs.
    async fn call(
        &self,
        target: CallTarget,
        signature: &str,
        args: Vec<DynSolValue>,
    ) -> CallResult<Vec<DynSolValue>> {
        let (selector, output_type) = parse_function_signature(signature)?;
        let calldata = encode_calldata(&selector, args);

        let tx = TransactionRequest::default()
            .to(target.address)
            .input(TransactionInput::new(Bytes::from(calldata)));
        let raw = self
            .client
            .call(&tx, BlockId::number(target.block_number))
            .await?;

        decode_return(signature, &output_type, &raw)
    }

    async fn call_single(
        &self,
        target: CallTarget,
        signature: &str,
        args: Vec<DynSolValue>,
    ) -> CallResult<DynSolValue> {
        self.call(target, signature, args)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CallError::Decode(format!("{} returned no values", signature)))
    }

    async fn call_by_asset(
        &self,
        target: CallTarget,
        signature: &str,
        asset_id: AssetId,
    ) -> CallResult<DynSolValue> {
        self.call_single(target, signature, vec![bytes32_arg(asset_id)])
            .await
    }
}

#[async_trait]
impl ChainReader for RpcChainReader {
    async fn get_ownership(
        &self,
        target: CallTarget,
        asset_id: AssetId,
    ) -> CallResult<OwnershipSnapshot> {
        let value = self
            .call_by_asset(
                target,
                "getOwnership(bytes32)((address,address,address,address))",
                asset_id,
            )
            .await?;
        let members = tuple(&value, 4, "ownership")?;
        Ok(OwnershipSnapshot {
            creator_obligor: address(&members[0], "creatorObligor")?,
            creator_beneficiary: address(&members[1], "creatorBeneficiary")?,
            counterparty_obligor: address(&members[2], "counterpartyObligor")?,
            counterparty_beneficiary: address(&members[3], "counterpartyBeneficiary")?,
        })
    }

    async fn get_terms(
        &self,
        target: CallTarget,
        family: &'static FamilySchema,
        asset_id: AssetId,
    ) -> CallResult<TermsSnapshot> {
        let signature = format!("getTerms(bytes32)({})", family.terms_abi());
        let value = self.call_by_asset(target, &signature, asset_id).await?;
        decode_terms(family, &value)
    }

    async fn get_state(
        &self,
        target: CallTarget,
        family: &'static FamilySchema,
        asset_id: AssetId,
    ) -> CallResult<StateSnapshot> {
        let signature = format!("getState(bytes32)({})", family.state_abi());
        let value = self.call_by_asset(target, &signature, asset_id).await?;
        decode_state(family, &value)
    }

    async fn get_schedule(&self, target: CallTarget, asset_id: AssetId) -> CallResult<Vec<B256>> {
        let value = self
            .call_by_asset(target, "getSchedule(bytes32)(bytes32[])", asset_id)
            .await?;
        let items = value
            .as_array()
            .ok_or_else(|| CallError::Decode("schedule is not an array".to_string()))?;
        items.iter().map(|item| bytes32(item, "schedule")).collect()
    }

    async fn get_engine(&self, target: CallTarget, asset_id: AssetId) -> CallResult<Address> {
        let value = self
            .call_by_asset(target, "getEngine(bytes32)(address)", asset_id)
            .await?;
        address(&value, "engine")
    }

    async fn get_actor(&self, target: CallTarget, asset_id: AssetId) -> CallResult<Address> {
        let value = self
            .call_by_asset(target, "getActor(bytes32)(address)", asset_id)
            .await?;
        address(&value, "actor")
    }

    async fn get_extension(&self, target: CallTarget, asset_id: AssetId) -> CallResult<Address> {
        let value = self
            .call_by_asset(target, "getExtension(bytes32)(address)", asset_id)
            .await?;
        address(&value, "extension")
    }

    async fn get_next_schedule_index(
        &self,
        target: CallTarget,
        asset_id: AssetId,
    ) -> CallResult<U256> {
        let value = self
            .call_by_asset(target, "getNextScheduleIndex(bytes32)(uint256)", asset_id)
            .await?;
        uint(&value, "nextScheduleIndex")
    }

    async fn get_pending_event(&self, target: CallTarget, asset_id: AssetId) -> CallResult<B256> {
        let value = self
            .call_by_asset(target, "getPendingEvent(bytes32)(bytes32)", asset_id)
            .await?;
        bytes32(&value, "pendingEvent")
    }

    async fn get_next_scheduled_event(
        &self,
        target: CallTarget,
        asset_id: AssetId,
    ) -> CallResult<B256> {
        let value = self
            .call_by_asset(target, "getNextScheduledEvent(bytes32)(bytes32)", asset_id)
            .await?;
        bytes32(&value, "nextScheduledEvent")
    }

    async fn get_next_underlying_event(
        &self,
        target: CallTarget,
        asset_id: AssetId,
    ) -> CallResult<B256> {
        let value = self
            .call_by_asset(target, "getNextUnderlyingEvent(bytes32)(bytes32)", asset_id)
            .await?;
        bytes32(&value, "nextUnderlyingEvent")
    }

    async fn asset_registry(&self, target: CallTarget) -> CallResult<Address> {
        let value = self
            .call_single(target, "assetRegistry()(address)", Vec::new())
            .await?;
        address(&value, "assetRegistry")
    }

    async fn settlements(
        &self,
        target: CallTarget,
        settlement_id: U256,
    ) -> CallResult<SettlementSnapshot> {
        let members = self
            .call(
                target,
                "settlements(uint256)(address,address,uint256,address,address,address,uint256,uint256,uint8)",
                vec![DynSolValue::Uint(settlement_id, 256)],
            )
            .await?;
        if members.len() != 9 {
            return Err(CallError::Decode(format!(
                "settlement has {} members, expected 9",
                members.len()
            )));
        }
        Ok(SettlementSnapshot {
            creator: address(&members[0], "creator")?,
            creator_token: address(&members[1], "creatorToken")?,
            creator_amount: uint(&members[2], "creatorAmount")?,
            creator_beneficiary: address(&members[3], "creatorBeneficiary")?,
            counterparty: address(&members[4], "counterparty")?,
            counterparty_token: address(&members[5], "counterpartyToken")?,
            counterparty_amount: uint(&members[6], "counterpartyAmount")?,
            expiration_date: uint(&members[7], "expirationDate")?,
            status: small_uint(&members[8], "status")?,
        })
    }

    async fn balance_of(&self, target: CallTarget, holder: Address) -> CallResult<U256> {
        let value = self
            .call_single(
                target,
                "balanceOf(address)(uint256)",
                vec![DynSolValue::Address(holder)],
            )
            .await?;
        uint(&value, "balanceOf")
    }

    async fn withdrawable_funds_of(&self, target: CallTarget, holder: Address) -> CallResult<U256> {
        let value = self
            .call_single(
                target,
                "withdrawableFundsOf(address)(uint256)",
                vec![DynSolValue::Address(holder)],
            )
            .await?;
        uint(&value, "withdrawableFundsOf")
    }
}

/// Split `name(inputs)(outputs)` into a selector and the output tuple type.
fn parse_function_signature(sig: &str) -> CallResult<([u8; 4], DynSolType)> {
    let Some((input, output)) = sig.split_once(")(") else {
        return Err(CallError::Decode(format!(
            "Invalid function signature, missing output type: {}",
            sig
        )));
    };
    let input_sig = format!("{})", input);
    let output_sig = output.strip_suffix(')').unwrap_or(output);

    let hash = keccak256(input_sig.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);

    let output_type = DynSolType::parse(&format!("({})", output_sig)).map_err(|e| {
        CallError::Decode(format!("Failed to parse output type '{}': {}", output_sig, e))
    })?;

    Ok((selector, output_type))
}

fn encode_calldata(selector: &[u8; 4], params: Vec<DynSolValue>) -> Vec<u8> {
    let mut calldata = selector.to_vec();
    if !params.is_empty() {
        calldata.extend(DynSolValue::Tuple(params).abi_encode_params());
    }
    calldata
}

/// Decode raw return data. Empty return data means the callee does not
/// implement the function (or is not a contract) and counts as a revert.
fn decode_return(
    signature: &str,
    output_type: &DynSolType,
    raw: &[u8],
) -> CallResult<Vec<DynSolValue>> {
    if raw.is_empty() {
        return Err(CallError::Reverted(format!("{} returned no data", signature)));
    }
    let decoded = output_type
        .abi_decode_params(raw)
        .map_err(|e| CallError::Decode(format!("{}: {}", signature, e)))?;
    match decoded {
        DynSolValue::Tuple(values) => Ok(values),
        other => Ok(vec![other]),
    }
}

fn bytes32_arg(value: B256) -> DynSolValue {
    DynSolValue::FixedBytes(value, 32)
}

fn decode_terms(family: &FamilySchema, value: &DynSolValue) -> CallResult<TermsSnapshot> {
    let members = tuple(value, family.terms.len(), "terms")?;
    let mut fields = FieldMap::new();
    let mut components = BTreeMap::new();
    for (field, member) in family.terms.iter().zip(members) {
        match field {
            TermsField::Scalar(spec) => {
                fields.insert(spec.name.to_string(), decode_field(spec, member)?);
            }
            TermsField::Component { name, kind } => {
                components.insert(name.to_string(), decode_component(*kind, member, name)?);
            }
        }
    }
    Ok(TermsSnapshot { fields, components })
}

fn decode_state(family: &FamilySchema, value: &DynSolValue) -> CallResult<StateSnapshot> {
    let members = tuple(value, family.state.len(), "state")?;
    let fields = family
        .state
        .iter()
        .zip(members)
        .map(|(spec, member)| Ok((spec.name.to_string(), decode_field(spec, member)?)))
        .collect::<CallResult<FieldMap>>()?;
    Ok(StateSnapshot { fields })
}

fn decode_field(spec: &FieldSpec, value: &DynSolValue) -> CallResult<FieldValue> {
    let name = spec.name;
    Ok(match spec.kind {
        FieldKind::Enum => FieldValue::Enum(small_uint(value, name)?),
        FieldKind::Address => FieldValue::Address(address(value, name)?),
        FieldKind::Bytes32 => FieldValue::Bytes32(bytes32(value, name)?),
        FieldKind::Uint => FieldValue::Uint(uint(value, name)?),
        FieldKind::Int => FieldValue::Int(int(value, name)?),
        FieldKind::Bool => FieldValue::Bool(boolean(value, name)?),
    })
}

fn decode_component(
    kind: ComponentKind,
    value: &DynSolValue,
    name: &str,
) -> CallResult<TermsComponent> {
    Ok(match kind {
        ComponentKind::Period => {
            let m = tuple(value, 3, name)?;
            TermsComponent::Period {
                i: uint(&m[0], name)?,
                p: small_uint(&m[1], name)?,
                is_set: boolean(&m[2], name)?,
            }
        }
        ComponentKind::Cycle => {
            let m = tuple(value, 4, name)?;
            TermsComponent::Cycle {
                i: uint(&m[0], name)?,
                p: small_uint(&m[1], name)?,
                s: small_uint(&m[2], name)?,
                is_set: boolean(&m[3], name)?,
            }
        }
        ComponentKind::ContractReference => {
            let m = tuple(value, 4, name)?;
            TermsComponent::ContractReference {
                object: bytes32(&m[0], name)?,
                object2: bytes32(&m[1], name)?,
                reference_type: small_uint(&m[2], name)?,
                role: small_uint(&m[3], name)?,
            }
        }
    })
}

fn mismatch(what: &str, expected: &str, value: &DynSolValue) -> CallError {
    CallError::Decode(format!("{}: expected {}, got {:?}", what, expected, value))
}

fn tuple<'a>(value: &'a DynSolValue, len: usize, what: &str) -> CallResult<&'a [DynSolValue]> {
    match value.as_tuple() {
        Some(members) if members.len() == len => Ok(members),
        _ => Err(mismatch(what, &format!("tuple of {}", len), value)),
    }
}

fn address(value: &DynSolValue, what: &str) -> CallResult<Address> {
    value
        .as_address()
        .ok_or_else(|| mismatch(what, "address", value))
}

fn bytes32(value: &DynSolValue, what: &str) -> CallResult<B256> {
    match value {
        DynSolValue::FixedBytes(word, 32) => Ok(*word),
        _ => Err(mismatch(what, "bytes32", value)),
    }
}

fn uint(value: &DynSolValue, what: &str) -> CallResult<U256> {
    value
        .as_uint()
        .map(|(v, _)| v)
        .ok_or_else(|| mismatch(what, "uint", value))
}

fn small_uint(value: &DynSolValue, what: &str) -> CallResult<u8> {
    let v = uint(value, what)?;
    u8::try_from(v).map_err(|_| CallError::Decode(format!("{}: {} does not fit uint8", what, v)))
}

fn int(value: &DynSolValue, what: &str) -> CallResult<I256> {
    value
        .as_int()
        .map(|(v, _)| v)
        .ok_or_else(|| mismatch(what, "int", value))
}

fn boolean(value: &DynSolValue, what: &str) -> CallResult<bool> {
    value.as_bool().ok_or_else(|| mismatch(what, "bool", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::family::{COLLA, PAM};

    /// Deterministic sample value for one scalar field.
    fn sample_scalar(spec: &FieldSpec, seed: u64) -> DynSolValue {
        match spec.kind {
            FieldKind::Enum => DynSolValue::Uint(U256::from(seed % 7), 8),
            FieldKind::Address => DynSolValue::Address(Address::repeat_byte(seed as u8)),
            FieldKind::Bytes32 => DynSolValue::FixedBytes(B256::repeat_byte(seed as u8), 32),
            FieldKind::Uint => DynSolValue::Uint(U256::from(seed * 100), 256),
            FieldKind::Int => DynSolValue::Int(I256::try_from(-(seed as i64)).unwrap(), 256),
            FieldKind::Bool => DynSolValue::Bool(seed % 2 == 0),
        }
    }

    fn sample_component(kind: ComponentKind) -> DynSolValue {
        match kind {
            ComponentKind::Period => DynSolValue::Tuple(vec![
                DynSolValue::Uint(U256::from(30), 256),
                DynSolValue::Uint(U256::from(2), 8),
                DynSolValue::Bool(true),
            ]),
            ComponentKind::Cycle => DynSolValue::Tuple(vec![
                DynSolValue::Uint(U256::from(1), 256),
                DynSolValue::Uint(U256::from(4), 8),
                DynSolValue::Uint(U256::from(1), 8),
                DynSolValue::Bool(false),
            ]),
            ComponentKind::ContractReference => DynSolValue::Tuple(vec![
                DynSolValue::FixedBytes(B256::repeat_byte(0x11), 32),
                DynSolValue::FixedBytes(B256::ZERO, 32),
                DynSolValue::Uint(U256::from(3), 8),
                DynSolValue::Uint(U256::from(1), 8),
            ]),
        }
    }

    fn sample_terms(family: &FamilySchema) -> DynSolValue {
        DynSolValue::Tuple(
            family
                .terms
                .iter()
                .enumerate()
                .map(|(i, field)| match field {
                    TermsField::Scalar(spec) => sample_scalar(spec, i as u64 + 1),
                    TermsField::Component { kind, .. } => sample_component(*kind),
                })
                .collect(),
        )
    }

    #[test]
    fn test_parse_function_signature_nested_output() {
        let sig = format!("getTerms(bytes32)({})", PAM.terms_abi());
        let (selector, output) = parse_function_signature(&sig).unwrap();
        assert_eq!(selector, keccak256("getTerms(bytes32)".as_bytes())[..4]);
        match output {
            DynSolType::Tuple(inner) => {
                assert_eq!(inner.len(), 1);
                assert!(matches!(&inner[0], DynSolType::Tuple(m) if m.len() == PAM.terms.len()));
            }
            other => panic!("unexpected output type {:?}", other),
        }
    }

    #[test]
    fn test_parse_function_signature_multiple_outputs() {
        let (_, output) =
            parse_function_signature("settlements(uint256)(address,uint256,uint8)").unwrap();
        assert!(matches!(output, DynSolType::Tuple(m) if m.len() == 3));
        assert!(parse_function_signature("getEngine(bytes32)").is_err());
    }

    #[test]
    fn test_encode_calldata_appends_args() {
        let selector = [0xde, 0xad, 0xbe, 0xef];
        let calldata = encode_calldata(&selector, vec![bytes32_arg(B256::repeat_byte(0xaa))]);
        assert_eq!(calldata.len(), 36);
        assert_eq!(&calldata[..4], &selector);
        assert_eq!(&calldata[4..], B256::repeat_byte(0xaa).as_slice());
        assert_eq!(encode_calldata(&selector, Vec::new()), selector.to_vec());
    }

    #[test]
    fn test_decode_terms_from_abi_encoded_return() {
        let sig = format!("getTerms(bytes32)({})", COLLA.terms_abi());
        let (_, output_type) = parse_function_signature(&sig).unwrap();
        let raw = DynSolValue::Tuple(vec![sample_terms(&COLLA)]).abi_encode_params();

        let values = decode_return(&sig, &output_type, &raw).unwrap();
        let terms = decode_terms(&COLLA, &values[0]).unwrap();

        assert_eq!(terms.fields.len(), COLLA.scalar_terms().count());
        assert_eq!(terms.components.len(), COLLA.components().count());
        assert_eq!(terms.fields["contractType"], FieldValue::Enum(1));
        assert_eq!(
            terms.fields["currency"],
            FieldValue::Address(Address::repeat_byte(8))
        );
        assert_eq!(
            terms.components["gracePeriod"],
            TermsComponent::Period {
                i: U256::from(30),
                p: 2,
                is_set: true
            }
        );
    }

    #[test]
    fn test_decode_state_rejects_wrong_arity() {
        let short = DynSolValue::Tuple(vec![DynSolValue::Uint(U256::from(1), 8)]);
        assert!(matches!(
            decode_state(&PAM, &short),
            Err(CallError::Decode(_))
        ));
    }

    #[test]
    fn test_empty_return_data_is_revert() {
        let (_, output_type) = parse_function_signature("getEngine(bytes32)(address)").unwrap();
        assert!(matches!(
            decode_return("getEngine(bytes32)(address)", &output_type, &[]),
            Err(CallError::Reverted(_))
        ));
    }

    #[test]
    fn test_enum_out_of_range_is_decode_error() {
        let value = DynSolValue::Uint(U256::from(300), 256);
        assert!(small_uint(&value, "contractType").is_err());
    }
}
