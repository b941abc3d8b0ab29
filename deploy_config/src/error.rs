use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Unsupported config file extension: {0}")]
    InvalidFormat(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unknown network profile: {0}")]
    UnknownNetwork(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failures of the lazy provider factory. These only surface when a profile's
/// provider is actually built, never while loading the record.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Missing secret: env var {0} is empty or unset")]
    MissingSecret(String),

    #[error("Invalid RPC url {url}: {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    #[error("Wallet error: {0}")]
    Wallet(#[from] ethers::signers::WalletError),
}
