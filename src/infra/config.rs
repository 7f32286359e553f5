use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::{AppContext, InitArgs};
use crate::core::features::FeatureConfig;
use crate::core::similarity::TokenPolicy;

/// File names probed in the working directory, first match wins
pub const CONFIG_FILES: [&str; 4] = ["simprint.toml", "simprint.yaml", "simprint.json", ".simprint.toml"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Extra ignore globs for directory arguments (in addition to .gitignore)
    pub ignore_patterns: Vec<String>,

    /// How documents are split into features
    pub features: FeatureConfig,

    /// Default fingerprint settings
    pub fingerprint: FingerprintConfig,

    /// Default compare settings
    pub compare: CompareConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerprintConfig
{
    /// Print tokens zero-padded to 16 digits (display only)
    pub pad: bool,
    pub include_hidden: bool,
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig
{
    /// Treatment of malformed tokens
    pub policy: TokenPolicy,

    /// Similarity (percent) at or above which a pair counts as near-duplicate
    pub threshold: f64,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            ignore_patterns: vec![
                "target/".to_string(),
                "node_modules/".to_string(),
                ".git/".to_string(),
                "*.pyc".to_string(),
                ".DS_Store".to_string(),
            ],
            features: FeatureConfig::default(),
            fingerprint: FingerprintConfig::default(),
            compare: CompareConfig::default(),
        }
    }
}

impl Default for FingerprintConfig
{
    fn default() -> Self
    {
        Self { pad: false, include_hidden: false, max_depth: None }
    }
}

impl Default for CompareConfig
{
    fn default() -> Self
    {
        Self { policy: TokenPolicy::Strict, threshold: 90.0 }
    }
}

/// Load configuration from an explicit file, or the first of
/// [`CONFIG_FILES`] found in the working directory, then `SIMPRINT_*`
/// environment variables (`SIMPRINT_FEATURES__MODE=shingles`).
pub fn load_config(explicit: Option<&Path>) -> Result<Config>
{
    let mut builder = config::Config::builder();

    match explicit
    {
        Some(path) =>
        {
            debug!(path = %path.display(), "loading explicit config");
            builder = builder.add_source(config::File::from(path));
        }
        None =>
        {
            for path in &CONFIG_FILES
            {
                if Path::new(path).exists()
                {
                    debug!(path, "loading config");
                    builder = builder.add_source(config::File::with_name(path));
                    break;
                }
            }
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("SIMPRINT")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path: PathBuf = args
        .path
        .join("simprint.toml");

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let toml_string =
        toml::to_string_pretty(&Config::default()).context("Failed to serialize default config")?;

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
