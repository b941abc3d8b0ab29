use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use deploy_config::{loader::ConfigFormat, DeploymentConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "deploy-config")]
#[command(about = "Inspect and validate contract deployment configuration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a config file
    Check {
        path: PathBuf,
        /// Also build the provider of this network profile from the environment
        #[arg(short, long)]
        network: Option<String>,
        /// Check that a compiler release satisfies the configured constraint
        #[arg(long)]
        solc: Option<String>,
    },
    /// Print the normalized config
    Show {
        path: PathBuf,
        #[arg(short, long, value_enum, default_value = "toml")]
        format: Format,
    },
    /// Write the default config
    Init {
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Toml,
    Json,
}

impl From<Format> for ConfigFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Toml => ConfigFormat::Toml,
            Format::Json => ConfigFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            path,
            network,
            solc,
        } => {
            let config = DeploymentConfig::load(&path)
                .with_context(|| format!("invalid config {}", path.display()))?;

            if let Some(version) = solc {
                if !config.compilers.solc.accepts(&version)? {
                    bail!(
                        "solc {version} does not satisfy {}",
                        config.compilers.solc.version
                    );
                }
            }

            if let Some(name) = network {
                let profile = config.network(&name)?;
                let signer = profile.provider(&profile.secrets_from_env())?;
                println!("{name}: signer {:?}", signer.address());
            }

            println!("{} is valid", path.display());
        }
        Commands::Show { path, format } => {
            let config = DeploymentConfig::load(&path)?;
            println!("{}", config.to_string_as(format.into())?);
        }
        Commands::Init { path, force } => {
            if path.exists() && !force {
                bail!("{} already exists, pass --force to overwrite", path.display());
            }
            DeploymentConfig::default().save(&path)?;
            println!("wrote {}", path.display());
        }
    }

    Ok(())
}
