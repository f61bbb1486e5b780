//! Configuration file management for autocrate.
//!
//! Provides a TOML config file at `~/.config/autocrate/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.
//!
//! ```toml
//! [costs]
//! sheet_price = 50.0
//! cleat_price_per_ft = 2.0
//! klimp_price = 5.0
//! labor_ratio = 0.3
//!
//! [output]
//! directory = "/srv/nx/expressions"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use autocrate_core::CostRates;

/// Env var naming an alternate config file
pub const CONFIG_ENV_VAR: &str = "AUTOCRATE_CONFIG";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub costs: CostRates,
    pub output: OutputSection,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Directory `calc` exports into when no `--output` is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the autocrate config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/autocrate` or
/// `~/.config/autocrate`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("autocrate");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("autocrate")
}

/// Return the path to the default config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse a config file. Returns an error if it does not exist.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(config)
}

/// Serialize and write a config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    autocrate_core::file_io::write_atomic(path, contents.as_bytes())
        .with_context(|| format!("failed to write config file at {}", path.display()))?;
    Ok(())
}

/// Write the default config file. Refuses to overwrite unless `force`.
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "config file already exists at {}; pass --force to overwrite",
            path.display()
        );
    }
    save_config(&ConfigFile::default(), path)?;
    tracing::info!(path = %path.display(), "config file written");
    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Where the resolved settings came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Flag(PathBuf),
    Env(PathBuf),
    File(PathBuf),
    Defaults,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug, Clone, PartialEq)]
pub struct AutocrateConfig {
    pub costs: CostRates,
    pub output_dir: Option<PathBuf>,
    pub source: ConfigSource,
}

impl AutocrateConfig {
    /// Resolve using the chain: CLI flag > `AUTOCRATE_CONFIG` > default file > defaults.
    pub fn resolve(cli_config: Option<&Path>) -> Result<Self> {
        let env_config = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::resolve_from(cli_config, env_config, &config_path())
    }

    /// Resolution with the env value and default path supplied by the caller.
    ///
    /// A path named by the flag or env var must exist; the default file is
    /// optional.
    pub fn resolve_from(
        cli_config: Option<&Path>,
        env_config: Option<PathBuf>,
        default_path: &Path,
    ) -> Result<Self> {
        let source = if let Some(path) = cli_config {
            ConfigSource::Flag(path.to_path_buf())
        } else if let Some(path) = env_config {
            ConfigSource::Env(path)
        } else if default_path.exists() {
            ConfigSource::File(default_path.to_path_buf())
        } else {
            ConfigSource::Defaults
        };

        let file = match &source {
            ConfigSource::Flag(path) | ConfigSource::Env(path) | ConfigSource::File(path) => {
                load_config(path)?
            }
            ConfigSource::Defaults => ConfigFile::default(),
        };

        tracing::debug!(?source, "config resolved");

        Ok(Self {
            costs: file.costs,
            output_dir: file.output.directory,
            source,
        })
    }
}
