//! Utility functions for transformations.

pub mod sync;

use alloy::primitives::{Address, B256};

/// Format an address as a lowercase hex string with 0x prefix.
pub fn format_address(addr: &Address) -> String {
    format!("0x{}", hex::encode(addr))
}

/// Format a bytes32 as a lowercase hex string with 0x prefix.
pub fn format_bytes32(bytes: &B256) -> String {
    format!("0x{}", hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_address_is_lowercase_hex() {
        let addr: Address = "0x000000000000000000000000000000000000BEEF".parse().unwrap();
        assert_eq!(format_address(&addr), "0x000000000000000000000000000000000000beef");
    }
}
