use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    compiler::Compilers,
    error::{ConfigError, ConfigResult},
    network::NetworkProfile,
};

pub const DEFAULT_NETWORK: &str = "goerli";
pub const DEFAULT_CONTRACTS_DIRECTORY: &str = "./contract/";
pub const DEFAULT_CONTRACTS_BUILD_DIRECTORY: &str = "./contract/abi";

/// Deployment configuration for the contract toolchain: network profiles,
/// source/build directories and compiler selection.
///
/// The directories are declared only; nothing here creates or checks them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    pub contracts_directory: String,
    pub contracts_build_directory: String,
    pub networks: BTreeMap<String, NetworkProfile>,
    pub compilers: Compilers,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            contracts_directory: DEFAULT_CONTRACTS_DIRECTORY.to_owned(),
            contracts_build_directory: DEFAULT_CONTRACTS_BUILD_DIRECTORY.to_owned(),
            networks: BTreeMap::from([(DEFAULT_NETWORK.to_owned(), NetworkProfile::goerli())]),
            compilers: Compilers::default(),
        }
    }
}

impl DeploymentConfig {
    pub fn network(&self, name: &str) -> ConfigResult<&NetworkProfile> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_owned()))
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.contracts_directory.trim().is_empty() {
            return Err(ConfigError::Validation(
                "contracts_directory must not be empty".to_owned(),
            ));
        }

        if self.contracts_build_directory.trim().is_empty() {
            return Err(ConfigError::Validation(
                "contracts_build_directory must not be empty".to_owned(),
            ));
        }

        if self.networks.is_empty() {
            return Err(ConfigError::Validation(
                "at least one network profile is required".to_owned(),
            ));
        }

        for (name, profile) in &self.networks {
            Self::validate_network(name, profile)?;
        }

        let solc = &self.compilers.solc;
        solc.version_req().map_err(|e| {
            ConfigError::Validation(format!(
                "compilers.solc.version '{}' is not a valid semver range: {e}",
                solc.version
            ))
        })?;

        if solc.optimizer.enabled && solc.optimizer.runs == 0 {
            return Err(ConfigError::Validation(
                "compilers.solc.optimizer.runs must be at least 1 when the optimizer is enabled"
                    .to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_network(name: &str, profile: &NetworkProfile) -> ConfigResult<()> {
        if name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "network profile names must not be empty".to_owned(),
            ));
        }

        if profile.port == 0 {
            return Err(ConfigError::Validation(format!(
                "networks.{name}.port must be within 1..=65535"
            )));
        }

        if profile.gas == 0 {
            return Err(ConfigError::Validation(format!(
                "networks.{name}.gas must be positive"
            )));
        }

        if profile.host.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "networks.{name}.host must not be empty"
            )));
        }

        if profile.provider.url_env.trim().is_empty()
            || profile.provider.mnemonic_env.trim().is_empty()
        {
            return Err(ConfigError::Validation(format!(
                "networks.{name}.provider must name both env vars"
            )));
        }

        Ok(())
    }
}
