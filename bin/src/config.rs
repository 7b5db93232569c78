use anyhow::Result;
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings read from the config file and the environment. Command-line flags override these.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory of `*.txt` word packs.
    pub packs_dir: PathBuf,
    /// Banned-word list, or `None` to play without one.
    pub bans: Option<PathBuf>,
    /// Pack to select as soon as it loads.
    pub default_pack: Option<String>,
    /// Default `env_logger` filter, used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            packs_dir: PathBuf::from("data"),
            bans: Some(PathBuf::from("data/bans/en.txt")),
            default_pack: None,
            log_level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads defaults, then `config.toml` (from `explicit_path`, or the platform config
    /// directory if it exists there), then `WORD_SCRAMBLE_*` environment variables.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let defaults = AppConfig::default();

        let mut builder = Config::builder()
            .set_default("packs_dir", defaults.packs_dir.to_string_lossy().into_owned())?
            .set_default("log_level", defaults.log_level)?;
        if let Some(bans) = defaults.bans {
            builder = builder.set_default("bans", bans.to_string_lossy().into_owned())?;
        }

        if let Some(path) = explicit_path {
            builder = builder.add_source(File::from(path).required(true));
        } else if let Some(proj_dirs) = ProjectDirs::from("", "", "word-scramble") {
            let config_path = proj_dirs.config_dir().join("config.toml");

            if config_path.exists() {
                builder = builder.add_source(File::from(config_path));
            }
        }

        let cfg = builder
            .add_source(Environment::with_prefix("WORD_SCRAMBLE"))
            .build()?;

        Ok(cfg.try_deserialize()?)
    }
}
