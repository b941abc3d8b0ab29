use ethers::types::{Address, H256};

use crate::error::OrderBookError;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Maps a customer id onto a child index of the wallet root (32-bit FNV-1a).
///
/// Indexes at or above 2^31 land on hardened children, which is fine since
/// the service holds the private root.
pub fn customer_index(customer_id: &str) -> u32 {
    customer_id.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

pub fn parse_address(address: &str) -> Result<Address, OrderBookError> {
    address
        .trim()
        .parse()
        .map_err(|_| OrderBookError::InvalidAddress(address.to_owned()))
}

pub fn parse_tx_hash(hash: &str) -> Option<H256> {
    let hex_str = hash.trim().trim_start_matches("0x");
    if hex_str.len() != 64 {
        return None;
    }
    hex_str.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_index_fnv1a_vectors() {
        assert_eq!(customer_index(""), 0x811c9dc5);
        assert_eq!(customer_index("a"), 0xe40c292c);
        assert_eq!(customer_index("foobar"), 0xbf9cf968);
    }

    #[test]
    fn test_parse_address() {
        assert!(parse_address("0x5FbDB2315678afecb367f032d93F642f64180aa3").is_ok());
        assert!(parse_address(" 0x5fbdb2315678afecb367f032d93f642f64180aa3 ").is_ok());
        assert!(matches!(
            parse_address("0x1234"),
            Err(OrderBookError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_parse_tx_hash() {
        let hash = "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b";
        assert_eq!(
            parse_tx_hash(hash),
            Some(H256::from_slice(&hex::decode(&hash[2..]).unwrap()))
        );
        assert_eq!(parse_tx_hash(&hash[2..]), parse_tx_hash(hash));
        assert_eq!(parse_tx_hash("0x1234"), None);
        assert_eq!(parse_tx_hash(&format!("0x{}", "zz".repeat(32))), None);
    }
}
