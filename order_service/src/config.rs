use std::path::PathBuf;

use dotenv::dotenv;
use order_book::config::{
    ContractNetworkConfig, TransactionOptions, DEFAULT_GAS_PRICE_MULTIPLIER_PCT,
    DEFAULT_TX_GAS_LIMIT,
};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "ORDER_SERVICE_";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_NETWORK: &str = "goerli";
const DEFAULT_DEPLOY_CONFIG: &str = "deploy.toml";

/// Service settings, read from `ORDER_SERVICE_*` env vars. Provider secrets
/// are not part of it: they come from the deployment profile's env vars.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// address of the deployed order book
    pub contract_address: String,
    /// network profile of the deployment config to connect with
    #[serde(default = "default_network")]
    pub network: String,
    #[serde(default = "default_deploy_config")]
    pub deploy_config: PathBuf,
    #[serde(default = "default_tx_gas_limit")]
    pub tx_gas_limit: u64,
    #[serde(default = "default_gas_price_multiplier_pct")]
    pub gas_price_multiplier_pct: u64,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenv().ok();
        envy::prefixed(ENV_PREFIX).from_env()
    }

    pub fn from_iter<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX).from_iter(vars)
    }

    pub fn contract_network_config(&self) -> ContractNetworkConfig {
        ContractNetworkConfig {
            contract_address: self.contract_address.clone(),
            tx: TransactionOptions {
                gas_limit: self.tx_gas_limit,
                gas_price_multiplier_pct: self.gas_price_multiplier_pct,
            },
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_owned()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_owned()
}

fn default_network() -> String {
    DEFAULT_NETWORK.to_owned()
}

fn default_deploy_config() -> PathBuf {
    PathBuf::from(DEFAULT_DEPLOY_CONFIG)
}

fn default_tx_gas_limit() -> u64 {
    DEFAULT_TX_GAS_LIMIT
}

fn default_gas_price_multiplier_pct() -> u64 {
    DEFAULT_GAS_PRICE_MULTIPLIER_PCT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_iter(vars(&[(
            "ORDER_SERVICE_CONTRACT_ADDRESS",
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
        )]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.network, "goerli");
        assert_eq!(config.deploy_config, PathBuf::from("deploy.toml"));
        assert_eq!(config.contract_network_config().tx, TransactionOptions::default());
    }

    #[test]
    fn test_overrides() {
        let config = ServiceConfig::from_iter(vars(&[
            ("ORDER_SERVICE_CONTRACT_ADDRESS", "0xabc"),
            ("ORDER_SERVICE_PORT", "3000"),
            ("ORDER_SERVICE_NETWORK", "development"),
            ("ORDER_SERVICE_TX_GAS_LIMIT", "500000"),
            ("UNRELATED", "ignored"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.network, "development");
        assert_eq!(config.contract_network_config().tx.gas_limit, 500_000);
        assert_eq!(config.contract_network_config().contract_address, "0xabc");
    }

    #[test]
    fn test_contract_address_is_required() {
        assert!(ServiceConfig::from_iter(vars(&[("ORDER_SERVICE_PORT", "3000")])).is_err());
    }

    #[test]
    fn test_bad_port_is_rejected() {
        assert!(ServiceConfig::from_iter(vars(&[
            ("ORDER_SERVICE_CONTRACT_ADDRESS", "0xabc"),
            ("ORDER_SERVICE_PORT", "not-a-port"),
        ]))
        .is_err());
    }
}
