use std::collections::BTreeMap;

use alloy_primitives::{Address, B256, I256, U256};
use serde::{Deserialize, Serialize};

/// A scalar terms or state field as read from chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Enum(u8),
    Address(Address),
    Bytes32(B256),
    Uint(U256),
    Int(I256),
    Bool(bool),
}

/// Field name to value, ordered so serialized records are stable.
pub type FieldMap = BTreeMap<String, FieldValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_json_shape() {
        let value = serde_json::to_value(FieldValue::Enum(3)).unwrap();
        assert_eq!(value, serde_json::json!({"type": "enum", "value": 3}));

        let negative = FieldValue::Int(I256::try_from(-5i64).unwrap());
        let json = serde_json::to_string(&negative).unwrap();
        let back: FieldValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, negative);
    }
}
