use serde::{Deserialize, Serialize};

pub const DEFAULT_TX_GAS_LIMIT: u64 = 300_000;
pub const DEFAULT_GAS_PRICE_MULTIPLIER_PCT: u64 = 150;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContractNetworkConfig {
    pub contract_address: String,
    #[serde(default)]
    pub tx: TransactionOptions,
}

/// Knobs for transactions the service signs on behalf of customers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionOptions {
    /// gas units per transaction
    pub gas_limit: u64,
    /// applied to the node's suggested gas price, in percent
    pub gas_price_multiplier_pct: u64,
}

impl Default for TransactionOptions {
    fn default() -> Self {
        Self {
            gas_limit: DEFAULT_TX_GAS_LIMIT,
            gas_price_multiplier_pct: DEFAULT_GAS_PRICE_MULTIPLIER_PCT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_options_default_when_absent() {
        let config: ContractNetworkConfig = serde_json::from_str(
            r#"{"contract_address": "0x5FbDB2315678afecb367f032d93F642f64180aa3"}"#,
        )
        .unwrap();
        assert_eq!(config.tx.gas_limit, 300_000);
        assert_eq!(config.tx.gas_price_multiplier_pct, 150);

        let partial: TransactionOptions = serde_json::from_str(r#"{"gas_limit": 21000}"#).unwrap();
        assert_eq!(partial.gas_limit, 21_000);
        assert_eq!(partial.gas_price_multiplier_pct, 150);
    }
}
