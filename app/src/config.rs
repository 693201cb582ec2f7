use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use terrain_core::GenerationConfig;
use tracing::{error, info};

pub const DEFAULT_CONFIG_FILE: &str = "terrain.toml";

// First command line argument, or terrain.toml in the working directory
pub fn config_path() -> PathBuf {
    env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

// Never fails: unreadable or malformed files fall back to the defaults
pub fn load(path: &Path) -> GenerationConfig {
    match fs::read(path) {
        Ok(data) => {
            info!("found config at {}", path.display());
            match parse(&data) {
                Ok(config) => config,
                Err(err) => {
                    error!("failed to parse config: {:#}", err);
                    GenerationConfig::default()
                }
            }
        }
        Err(ref e) if e.kind() == io::ErrorKind::NotFound => {
            info!("{} not found, using defaults", path.display());
            GenerationConfig::default()
        }
        Err(err) => {
            error!("failed to read config: {}: {}", path.display(), err);
            GenerationConfig::default()
        }
    }
}

pub fn parse(data: &[u8]) -> anyhow::Result<GenerationConfig> {
    let text = std::str::from_utf8(data).context("config is not UTF-8")?;
    let config: GenerationConfig = toml::from_str(text).context("invalid TOML")?;
    config.validate()?;
    Ok(config)
}

pub fn save(path: &Path, config: &GenerationConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let serialized = toml::to_string_pretty(config)?;
    fs::write(path, serialized).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
