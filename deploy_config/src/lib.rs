pub mod compiler;
pub mod config;
pub mod error;
pub mod loader;
pub mod network;

pub use config::DeploymentConfig;
pub use error::{ConfigError, ConfigResult, ProviderError};
pub use network::{EtherSigner, NetworkId, NetworkProfile, ProviderSpec, Secrets};
