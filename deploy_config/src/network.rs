use std::{env, fmt, str::FromStr, sync::Arc};

use dotenv::dotenv;
use ethers::{
    core::k256::ecdsa::SigningKey,
    middleware::SignerMiddleware,
    providers::{Http, Provider},
    signers::{coins_bip39::English, MnemonicBuilder, Signer, Wallet},
};
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

pub const DEFAULT_URL_ENV_VAR: &str = "NODE_URL";
pub const DEFAULT_MNEMONIC_ENV_VAR: &str = "MNEMONIC";
pub const DEFAULT_HOST: &str = "127.0.0.1";

pub type EtherSigner = SignerMiddleware<Provider<Http>, Wallet<SigningKey>>;

/// Network identifier of a profile. `*` matches whatever chain the node reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawNetworkId", into = "String")]
pub enum NetworkId {
    Any,
    Id(u64),
}

impl NetworkId {
    pub fn matches(&self, chain_id: u64) -> bool {
        match self {
            NetworkId::Any => true,
            NetworkId::Id(id) => *id == chain_id,
        }
    }

    pub fn chain_id(&self) -> Option<u64> {
        match self {
            NetworkId::Any => None,
            NetworkId::Id(id) => Some(*id),
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkId::Any => write!(f, "*"),
            NetworkId::Id(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for NetworkId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "*" => Ok(NetworkId::Any),
            id => id
                .parse()
                .map(NetworkId::Id)
                .map_err(|_| format!("invalid network id '{s}', expected a chain id or '*'")),
        }
    }
}

impl From<NetworkId> for String {
    fn from(id: NetworkId) -> Self {
        id.to_string()
    }
}

// files may carry the id quoted ("5") or bare (5)
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNetworkId {
    Number(u64),
    Text(String),
}

impl TryFrom<RawNetworkId> for NetworkId {
    type Error = String;

    fn try_from(raw: RawNetworkId) -> Result<Self, Self::Error> {
        match raw {
            RawNetworkId::Number(id) => Ok(NetworkId::Id(id)),
            RawNetworkId::Text(s) => s.parse(),
        }
    }
}

/// Where a profile's provider gets its secrets, and which HD account signs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSpec {
    #[serde(default = "default_url_env")]
    pub url_env: String,
    #[serde(default = "default_mnemonic_env")]
    pub mnemonic_env: String,
    #[serde(default)]
    pub address_index: u32,
}

impl Default for ProviderSpec {
    fn default() -> Self {
        Self {
            url_env: default_url_env(),
            mnemonic_env: default_mnemonic_env(),
            address_index: 0,
        }
    }
}

fn default_url_env() -> String {
    DEFAULT_URL_ENV_VAR.to_owned()
}

fn default_mnemonic_env() -> String {
    DEFAULT_MNEMONIC_ENV_VAR.to_owned()
}

fn default_host() -> String {
    DEFAULT_HOST.to_owned()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkProfile {
    pub network_id: NetworkId,
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    /// gas limit for deployments
    pub gas: u64,
    /// wei
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u32>,
    #[serde(default)]
    pub skip_dry_run: bool,
    #[serde(default)]
    pub provider: ProviderSpec,
}

impl NetworkProfile {
    /// The goerli test network profile.
    pub fn goerli() -> Self {
        Self {
            network_id: NetworkId::Id(5),
            host: default_host(),
            port: 8545,
            gas: 4465030,
            gas_price: None,
            confirmations: None,
            skip_dry_run: false,
            provider: ProviderSpec::default(),
        }
    }

    pub fn local_endpoint(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Reads this profile's secrets from the process environment (and `.env`).
    pub fn secrets_from_env(&self) -> Secrets {
        Secrets::from_env(&self.provider)
    }

    /// Builds the signing connection for this profile.
    ///
    /// Nothing is dialed here; a wrong url or unreachable node shows up on the
    /// first request. An empty url falls back to `http://{host}:{port}`.
    pub fn provider(&self, secrets: &Secrets) -> Result<Arc<EtherSigner>, ProviderError> {
        let phrase = secrets.mnemonic.trim();
        if phrase.is_empty() {
            return Err(ProviderError::MissingSecret(self.provider.mnemonic_env.clone()));
        }

        let url = match secrets.node_url.trim() {
            "" => {
                tracing::warn!(
                    "{} is not set, falling back to {}",
                    self.provider.url_env,
                    self.local_endpoint()
                );
                self.local_endpoint()
            }
            url => url.to_owned(),
        };

        let mut wallet = MnemonicBuilder::<English>::default()
            .phrase(phrase)
            .index(self.provider.address_index)?
            .build()?;
        if let Some(chain_id) = self.network_id.chain_id() {
            wallet = wallet.with_chain_id(chain_id);
        }

        let provider =
            Provider::<Http>::try_from(url.as_str()).map_err(|e| ProviderError::InvalidRpcUrl {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Arc::new(SignerMiddleware::new(provider, wallet)))
    }
}

/// Secret half of a provider: never written to config files.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secrets {
    pub node_url: String,
    pub mnemonic: String,
}

impl Secrets {
    /// Missing variables come back empty rather than failing.
    pub fn from_env(spec: &ProviderSpec) -> Self {
        dotenv().ok();

        Self {
            node_url: env::var(&spec.url_env).unwrap_or_default(),
            mnemonic: env::var(&spec.mnemonic_env).unwrap_or_default(),
        }
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = if self.mnemonic.is_empty() {
            ""
        } else {
            "<redacted>"
        };
        f.debug_struct("Secrets")
            .field("node_url", &self.node_url)
            .field("mnemonic", &mnemonic)
            .finish()
    }
}
