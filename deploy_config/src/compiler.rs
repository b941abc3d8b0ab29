use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOLC_VERSION: &str = "^0.8.0";
pub const DEFAULT_OPTIMIZER_RUNS: u32 = 200;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compilers {
    pub solc: SolcSettings,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolcSettings {
    /// semver constraint, e.g. `^0.8.0`
    pub version: String,
    #[serde(default)]
    pub optimizer: OptimizerSettings,
}

impl Default for SolcSettings {
    fn default() -> Self {
        Self {
            version: DEFAULT_SOLC_VERSION.to_owned(),
            optimizer: OptimizerSettings::default(),
        }
    }
}

impl SolcSettings {
    pub fn version_req(&self) -> Result<VersionReq, semver::Error> {
        VersionReq::parse(self.version.trim())
    }

    /// Whether a concrete compiler release satisfies the configured constraint.
    pub fn accepts(&self, version: &str) -> Result<bool, semver::Error> {
        let version = Version::parse(version.trim().trim_start_matches('v'))?;
        Ok(self.version_req()?.matches(&version))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    pub enabled: bool,
    pub runs: u32,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            runs: DEFAULT_OPTIMIZER_RUNS,
        }
    }
}
