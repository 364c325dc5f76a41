use serde::Deserialize;
use std::path::PathBuf;
use directories::ProjectDirs;
use anyhow::Result;
use std::fs;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct GeneralConfig {
    /// Resolve and print icon paths when listing.
    #[serde(default)]
    pub icons: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct FilterConfig {
    /// Regexes matched against label and path.
    #[serde(default)]
    pub blacklist: Vec<String>,
    /// Substrings; when non-empty an entry must contain one of them.
    #[serde(default)]
    pub whitelist: Vec<String>,
}

pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "launcher-creator", "launcher-creator")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

/// Listing is the only consumer, so a broken file must not block other commands.
pub fn load_config() -> Config {
    load_config_or_default(&config_path())
}

pub fn load_config_or_default(path: &std::path::Path) -> Config {
    load_config_from(path).unwrap_or_else(|e| {
        log::warn!("Ignoring unreadable config {:?}: {}", path, e);
        Config::default()
    })
}

pub fn load_config_from(config_path: &std::path::Path) -> Result<Config> {
    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}
