use std::{fs, path::Path};

use crate::{
    config::DeploymentConfig,
    error::{ConfigError, ConfigResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> ConfigResult<Option<Self>> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Some(ConfigFormat::Toml)),
            Some("json") => Ok(Some(ConfigFormat::Json)),
            Some(ext) => Err(ConfigError::InvalidFormat(ext.to_owned())),
            None => Ok(None),
        }
    }
}

impl DeploymentConfig {
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_string_as(&self, format: ConfigFormat) -> ConfigResult<String> {
        match format {
            ConfigFormat::Toml => self.to_toml_string(),
            ConfigFormat::Json => self.to_json_string(),
        }
    }

    /// Load and validate a config file, picking the format from the extension.
    /// Files without an extension are tried as TOML first, then JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;
        let config = match ConfigFormat::from_path(path)? {
            Some(ConfigFormat::Toml) => Self::from_toml_str(&content)?,
            Some(ConfigFormat::Json) => Self::from_json_str(&content)?,
            None => match Self::from_toml_str(&content) {
                Ok(config) => config,
                Err(_) => Self::from_json_str(&content)?,
            },
        };

        config.validate()?;
        tracing::debug!(
            "loaded deployment config from {} ({} network profiles)",
            path.display(),
            config.networks.len()
        );

        Ok(config)
    }

    /// Write the config, picking the format from the extension (TOML if none).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?.unwrap_or(ConfigFormat::Toml);

        fs::write(path, self.to_string_as(format)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::network::{NetworkId, NetworkProfile};

    use super::*;

    const TOML_CONFIG: &str = r#"
contracts_directory = "./contract/"
contracts_build_directory = "./contract/abi"

[networks.goerli]
network_id = "5"
port = 8545
gas = 4465030

[compilers.solc]
version = "^0.8.0"

[compilers.solc.optimizer]
enabled = false
runs = 200
"#;

    #[test]
    fn test_parse_complete_toml() {
        let config = DeploymentConfig::from_toml_str(TOML_CONFIG).unwrap();

        assert_eq!(config, DeploymentConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_bare_network_id() {
        let config =
            DeploymentConfig::from_toml_str(&TOML_CONFIG.replace("\"5\"", "5")).unwrap();

        assert_eq!(config.network("goerli").unwrap().network_id, NetworkId::Id(5));
    }

    #[test]
    fn test_missing_required_field_fails() {
        let without_gas = TOML_CONFIG.replace("gas = 4465030\n", "");
        assert!(matches!(
            DeploymentConfig::from_toml_str(&without_gas),
            Err(ConfigError::Toml(_))
        ));

        let without_version = TOML_CONFIG.replace("version = \"^0.8.0\"\n", "");
        assert!(DeploymentConfig::from_toml_str(&without_version).is_err());
    }

    #[test]
    fn test_out_of_range_port_fails_to_parse() {
        let config = TOML_CONFIG.replace("port = 8545", "port = 70000");
        assert!(DeploymentConfig::from_toml_str(&config).is_err());
    }

    #[test]
    fn test_toml_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deploy.toml");

        let mut config = DeploymentConfig::default();
        let mut local = NetworkProfile::goerli();
        local.network_id = NetworkId::Any;
        local.gas_price = Some(20_000_000_000);
        local.skip_dry_run = true;
        config.networks.insert("development".to_owned(), local);
        config.compilers.solc.optimizer.enabled = true;

        config.save(&path).unwrap();
        let reloaded = DeploymentConfig::load(&path).unwrap();

        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deploy.json");

        let config = DeploymentConfig::default();
        config.save(&path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"network_id\": \"5\""));
        assert_eq!(DeploymentConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_without_extension_falls_back_to_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployrc");
        fs::write(&path, DeploymentConfig::default().to_json_string().unwrap()).unwrap();

        assert_eq!(
            DeploymentConfig::load(&path).unwrap(),
            DeploymentConfig::default()
        );
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deploy.yaml");
        fs::write(&path, "networks: {}").unwrap();

        assert!(matches!(
            DeploymentConfig::load(&path),
            Err(ConfigError::InvalidFormat(ext)) if ext == "yaml"
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            DeploymentConfig::load("/definitely/not/here/deploy.toml"),
            Err(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_load_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deploy.toml");
        fs::write(&path, TOML_CONFIG.replace("gas = 4465030", "gas = 0")).unwrap();

        assert!(matches!(
            DeploymentConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }
}
